//! Effective threshold resolution
//!
//! Precedence: exact-hostname override, then global default, then
//! [`FALLBACK_THRESHOLD`]. Store failures never escape: they are logged
//! and resolution moves on to the next step.

use super::PolicyStore;
use crate::models::{Resolution, ThresholdSource, FALLBACK_THRESHOLD};
use crate::store::KeyValueStore;

/// Resolves thresholds against the current state of a [`PolicyStore`]
pub struct ThresholdResolver<'a, S> {
    policy: &'a PolicyStore<S>,
}

impl<'a, S: KeyValueStore> ThresholdResolver<'a, S> {
    pub fn new(policy: &'a PolicyStore<S>) -> Self {
        Self { policy }
    }

    /// Effective threshold for `hostname`, read fresh from the store
    pub fn resolve(&self, hostname: &str) -> Resolution {
        match self.policy.override_for(hostname) {
            Ok(Some(threshold)) => {
                return Resolution {
                    threshold,
                    source: ThresholdSource::Override,
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to load override for {}: {}", hostname, e),
        }

        self.resolve_default()
    }

    /// Threshold for a host without an override: global default, else fallback
    pub fn resolve_default(&self) -> Resolution {
        match self.policy.global_default() {
            Ok(Some(threshold)) => {
                return Resolution {
                    threshold,
                    source: ThresholdSource::GlobalDefault,
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to load global default threshold: {}", e),
        }

        Resolution {
            threshold: FALLBACK_THRESHOLD,
            source: ThresholdSource::Fallback,
        }
    }
}
