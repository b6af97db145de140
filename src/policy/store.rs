//! Persistent warning-threshold policy
//!
//! Two versioned records live in the backing store: the global default and
//! the map of exact-hostname overrides. The overrides map is rewritten as a
//! whole on every change, relying on the store's atomic per-key replace.

use crate::models::{IntoThreshold, Threshold, ThresholdPolicy, FALLBACK_THRESHOLD};
use crate::store::KeyValueStore;
use crate::utils::{PolicyError, StoreError};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// Store key of the global default threshold
pub const GLOBAL_DEFAULT_KEY: &str = "default_warn_threshold.v1";
/// Store key of the hostname -> threshold map
pub const OVERRIDES_KEY: &str = "warn_thresholds.v1";

/// Global default plus per-hostname overrides, backed by a [`KeyValueStore`]
#[derive(Debug)]
pub struct PolicyStore<S> {
    backend: S,
}

impl<S: KeyValueStore> PolicyStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// The configured global default, `None` if unset
    pub fn global_default(&self) -> Result<Option<Threshold>, PolicyError> {
        Ok(self.load(GLOBAL_DEFAULT_KEY)?)
    }

    /// Validate and persist a new global default
    pub fn set_global_default<T: IntoThreshold>(&mut self, value: T) -> Result<(), PolicyError> {
        let threshold = value.into_threshold()?;
        self.backend
            .set(GLOBAL_DEFAULT_KEY, serde_json::Value::from(threshold.days()))?;
        tracing::debug!("Global default threshold set to {}", threshold);
        Ok(())
    }

    /// Persist the fallback as global default if none is configured yet.
    ///
    /// Returns whether anything was written.
    pub fn seed_default(&mut self) -> Result<bool, PolicyError> {
        if self.global_default()?.is_some() {
            return Ok(false);
        }
        self.set_global_default(FALLBACK_THRESHOLD)?;
        Ok(true)
    }

    /// Override for exactly `hostname`. No normalization is applied.
    pub fn override_for(&self, hostname: &str) -> Result<Option<Threshold>, PolicyError> {
        Ok(self.overrides()?.get(hostname).copied())
    }

    /// Insert or replace the override for `hostname`
    pub fn set_override<T: IntoThreshold>(
        &mut self,
        hostname: &str,
        value: T,
    ) -> Result<(), PolicyError> {
        let threshold = value.into_threshold()?;
        let (mut overrides, _) = self.overrides_for_update()?;
        overrides.insert(hostname.to_string(), threshold);
        self.save_overrides(&overrides)?;
        tracing::debug!("Override for {} set to {}", hostname, threshold);
        Ok(())
    }

    /// Start customizing `hostname` with the current default threshold.
    ///
    /// Fails if `hostname` already has an override.
    pub fn add_override(&mut self, hostname: &str) -> Result<Threshold, PolicyError> {
        let (mut overrides, _) = self.overrides_for_update()?;
        if overrides.contains_key(hostname) {
            return Err(PolicyError::AlreadyCustomized {
                hostname: hostname.to_string(),
            });
        }
        let threshold = self.global_default()?.unwrap_or(FALLBACK_THRESHOLD);
        overrides.insert(hostname.to_string(), threshold);
        self.save_overrides(&overrides)?;
        Ok(threshold)
    }

    /// Remove the override for `hostname`; a missing entry is not an error
    pub fn delete_override(&mut self, hostname: &str) -> Result<(), PolicyError> {
        let (mut overrides, dropped) = self.overrides_for_update()?;
        if overrides.remove(hostname).is_none() && !dropped {
            return Ok(());
        }
        self.save_overrides(&overrides)?;
        tracing::debug!("Override for {} removed", hostname);
        Ok(())
    }

    /// Snapshot of all overrides
    pub fn overrides(&self) -> Result<BTreeMap<String, Threshold>, PolicyError> {
        Ok(self.load(OVERRIDES_KEY)?.unwrap_or_default())
    }

    /// Snapshot of the whole policy
    pub fn snapshot(&self) -> Result<ThresholdPolicy, PolicyError> {
        Ok(ThresholdPolicy {
            global_default: self.global_default()?,
            overrides: self.overrides()?,
        })
    }

    /// Overrides to rewrite on a mutation.
    ///
    /// Entries that are not valid thresholds are dropped (and logged) so a
    /// damaged record can be repaired through the normal operations. The
    /// flag tells whether anything was dropped.
    fn overrides_for_update(&self) -> Result<(BTreeMap<String, Threshold>, bool), PolicyError> {
        let entries = match self.backend.get(OVERRIDES_KEY)? {
            None | Some(serde_json::Value::Null) => return Ok((BTreeMap::new(), false)),
            Some(serde_json::Value::Object(entries)) => entries,
            Some(other) => {
                return Err(StoreError::Corrupt {
                    key: OVERRIDES_KEY.to_string(),
                    message: format!("expected an object, found {}", other),
                }
                .into())
            }
        };

        let mut overrides = BTreeMap::new();
        let mut dropped = false;
        for (hostname, value) in entries {
            match serde_json::from_value::<Threshold>(value) {
                Ok(threshold) => {
                    overrides.insert(hostname, threshold);
                }
                Err(e) => {
                    tracing::warn!("Dropping invalid override for {}: {}", hostname, e);
                    dropped = true;
                }
            }
        }
        Ok((overrides, dropped))
    }

    fn save_overrides(&mut self, overrides: &BTreeMap<String, Threshold>) -> Result<(), PolicyError> {
        let value = serde_json::to_value(overrides).map_err(|e| StoreError::Write {
            key: OVERRIDES_KEY.to_string(),
            message: e.to_string(),
        })?;
        self.backend.set(OVERRIDES_KEY, value)?;
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.backend.get(key)? {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| StoreError::Corrupt {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
        }
    }
}
