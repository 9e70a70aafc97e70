//! Per-venue configuration.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::section::Section;

/// Settings for one venue connector.
pub type VenueConfig<'a> = Section<'a>;

/// The `[venues.<name>]` tables.
///
/// A venue is enabled only when its table is present and non-empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct VenuesConfig {
    venues: BTreeMap<String, toml::Table>,
}

impl VenuesConfig {
    /// Configuration for `name`, if the table is present (it may be empty).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<VenueConfig<'_>> {
        self.venues
            .get_key_value(name)
            .map(|(owner, table)| Section::new(owner, table))
    }

    /// Whether `name` is present with at least one key.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.get(name).is_some_and(|section| !section.is_empty())
    }

    /// Every configured venue name, enabled or not.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.venues.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.venues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}
