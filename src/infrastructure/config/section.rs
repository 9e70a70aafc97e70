//! Free-form configuration sections.
//!
//! Venue connectors and algorithms are supplied by library users, so their
//! settings are carried as raw TOML tables and decoded into the consumer's
//! own typed struct on demand.

use serde::de::DeserializeOwned;

use crate::error::{ConfigError, Result};

/// Borrowed view of one named settings table.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    owner: &'a str,
    table: &'a toml::Table,
}

impl<'a> Section<'a> {
    pub(crate) fn new(owner: &'a str, table: &'a toml::Table) -> Self {
        Self { owner, table }
    }

    /// Name of the venue or algorithm the section belongs to.
    #[must_use]
    pub fn owner(&self) -> &'a str {
        self.owner
    }

    /// True when the section has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a toml::Value> {
        self.table.get(key)
    }

    /// Decode the section into a typed settings struct.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the table does not match `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        toml::Value::Table(self.table.clone())
            .try_into()
            .map_err(|e: toml::de::Error| {
                ConfigError::InvalidValue {
                    field: "section",
                    reason: format!("{}: {}", self.owner, e.message()),
                }
                .into()
            })
    }
}
