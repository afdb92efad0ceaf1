//! Generic adapter registry
//!
//! Holds the external framework configurations keyed by the canonical string
//! of their Group-Version-Kind and hands out [`GenericAdapter`] handles.

use crate::config::ExternalFramework;
use crate::gvk::GroupVersionKind;
use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;

/// Placeholder used in diagnostics when an entry has no usable name
const UNNAMED: &str = "<unnamed>";

/// Handle signalling that a configuration exists for a GVK.
///
/// Carries no behaviour; callers dispatch on [`GenericAdapter::gvk`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GenericAdapter {
    gvk: GroupVersionKind,
}

impl GenericAdapter {
    /// The GVK this adapter was looked up or listed for
    pub fn gvk(&self) -> &GroupVersionKind {
        &self.gvk
    }
}

/// Registry of external framework configurations
#[derive(Debug, Clone, Default)]
pub struct FrameworkRegistry {
    configs: HashMap<String, ExternalFramework>,
}

impl FrameworkRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a batch, returning it alongside the batch outcome
    pub fn from_batch<I>(entries: I) -> (Self, Result<()>)
    where
        I: IntoIterator<Item = ExternalFramework>,
    {
        let mut registry = Self::new();
        let outcome = registry.load(entries);
        (registry, outcome)
    }

    /// Replace the registry contents with a new batch of configurations.
    ///
    /// Invalid entries are logged and skipped; the rest are stored. When the
    /// same GVK appears more than once the later entry wins. Returns
    /// [`Error::BatchPartialFailure`] carrying only the number of rejected
    /// entries; details go to the log.
    pub fn load<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = ExternalFramework>,
    {
        self.configs = HashMap::new();
        let mut failures = 0usize;

        for config in entries {
            let gvk = match validate_config(&config) {
                Ok(gvk) => gvk,
                Err(e) => {
                    let name = if config.name.is_empty() { UNNAMED } else { config.name.as_str() };
                    tracing::error!(name = %name, reason = %e, "Invalid external framework configuration");
                    failures += 1;
                    continue;
                }
            };

            let key = gvk.canonical();
            tracing::debug!(name = %config.name, gvk = %key, "Registered external framework");
            if self.configs.insert(key, config).is_some() {
                tracing::debug!(gvk = %gvk, "Replaced earlier configuration for the same GVK");
            }
        }

        tracing::info!(
            registered = self.configs.len(),
            rejected = failures,
            "Loaded external framework configurations"
        );

        if failures > 0 {
            return Err(Error::BatchPartialFailure { count: failures });
        }
        Ok(())
    }

    /// Get a generic adapter for the given GVK if one is configured
    pub fn lookup(&self, gvk: &GroupVersionKind) -> Option<GenericAdapter> {
        self.configs
            .contains_key(&gvk.canonical())
            .then(|| GenericAdapter { gvk: gvk.clone() })
    }

    /// Get the stored configuration for a GVK
    pub fn get_config(&self, gvk: &GroupVersionKind) -> Option<&ExternalFramework> {
        self.configs.get(&gvk.canonical())
    }

    /// Get all configured generic adapters, in no particular order
    pub fn list_all(&self) -> Vec<GenericAdapter> {
        self.configs
            .values()
            .filter_map(|config| match GroupVersionKind::parse_kind_arg(&config.name) {
                Ok(gvk) => Some(GenericAdapter { gvk }),
                Err(e) => {
                    tracing::error!(name = %config.name, reason = %e, "Failed to parse stored GVK");
                    None
                }
            })
            .collect()
    }

    /// Number of stored configurations
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Check if no configuration is stored
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

/// Validate an external framework configuration, yielding its GVK
fn validate_config(config: &ExternalFramework) -> Result<GroupVersionKind> {
    if config.name.is_empty() {
        return Err(Error::EmptyName);
    }
    GroupVersionKind::parse_kind_arg(&config.name)
}
