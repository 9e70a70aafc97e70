//! Venue registry.
//!
//! Venue connectors are linked in by library users. The binary registers a
//! constructor per venue name in a [`VenueCatalog`]; configuration decides
//! which of them are actually connected:
//!
//! ```text
//! (name, Option<VenueConfig>, VenueFactory)
//!   config absent or empty  ──▶ skipped
//!   factory fails           ──▶ Error::VenueCreate (fatal)
//!   otherwise               ──▶ venue.initialize(handler) ──▶ VenueSet
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::infrastructure::config::venue::{VenueConfig, VenuesConfig};
use crate::port::{StreamingHandler, Venue, VenueSet};

/// Builds a connector from its `[venues.<name>]` table.
pub type VenueFactory = Arc<dyn Fn(VenueConfig<'_>) -> Result<Arc<dyn Venue>> + Send + Sync>;

/// Every venue connector the binary knows how to build, keyed by name.
#[derive(Clone, Default)]
pub struct VenueCatalog {
    factories: BTreeMap<String, VenueFactory>,
}

/// One row of the resolved venue table.
pub struct VenueEntry<'a> {
    pub name: &'a str,
    /// `None` when the venue has no configuration table.
    pub config: Option<VenueConfig<'a>>,
    pub factory: &'a VenueFactory,
}

impl VenueCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connector constructor under `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(VenueConfig<'_>) -> Result<Arc<dyn Venue>> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
        self
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Pair every registered constructor with its configuration, in name order.
    pub fn entries<'a>(&'a self, config: &'a VenuesConfig) -> Vec<VenueEntry<'a>> {
        self.factories
            .iter()
            .map(|(name, factory)| VenueEntry {
                name,
                config: config.get(name),
                factory,
            })
            .collect()
    }
}

/// Builds the live [`VenueSet`] from a catalog and configuration.
pub struct VenueRegistry;

impl VenueRegistry {
    /// Construct and initialize every configured venue.
    ///
    /// Venues without a configuration table, or with an empty one, are
    /// skipped. Configured names with no registered constructor are skipped
    /// with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VenueCreate`] naming the first venue whose
    /// constructor fails. Venues built before it are dropped.
    pub fn connect(
        catalog: &VenueCatalog,
        config: &VenuesConfig,
        handler: &Arc<dyn StreamingHandler>,
    ) -> Result<VenueSet> {
        for name in config.names().filter(|name| !catalog.contains(name)) {
            warn!(venue = %name, "Venue configured but no connector is registered, skipping");
        }

        let mut venues = VenueSet::new();
        for entry in catalog.entries(config) {
            let Some(settings) = entry.config.filter(|section| !section.is_empty()) else {
                debug!(venue = %entry.name, "Venue not configured, skipping");
                continue;
            };

            let venue = (entry.factory)(settings).map_err(|e| Error::VenueCreate {
                venue: entry.name.to_string(),
                source: Box::new(e),
            })?;
            venue.initialize(Arc::clone(handler));
            info!(venue = %entry.name, "Venue connected");
            venues.insert(entry.name, venue);
        }

        Ok(venues)
    }
}
