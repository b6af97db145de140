//! Observation engine
//!
//! Drives one inbound event at a time through threshold resolution, expiry
//! evaluation and per-context aggregation, and tells the notification sink
//! about new counts. Events are processed to completion before the next one.

use crate::checks::ExpiryChecker;
use crate::clock::Clock;
use crate::context::ContextAggregator;
use crate::models::{
    CertificateRecord, ContextId, ObservationEvent, Resolution, ResponseObservation,
};
use crate::notify::NotificationSink;
use crate::policy::{PolicyStore, ThresholdResolver};
use crate::store::KeyValueStore;
use crate::utils::EventError;
use serde::Serialize;
use url::Url;

/// Why a response was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Served from cache, no handshake happened
    Cached,
    /// Not an https URL
    NotHttps,
}

/// Result of handling one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Skipped {
        context: ContextId,
        reason: SkipReason,
    },
    /// Nothing in the chain is close to expiry
    Clear {
        context: ContextId,
        host: String,
        resolution: Resolution,
    },
    Flagged {
        context: ContextId,
        host: String,
        resolution: Resolution,
        /// Certificates flagged by this response
        flagged: usize,
        /// Certificates now tracked for the context
        count: usize,
    },
    Reset {
        context: ContextId,
    },
}

/// Watches certificate chains and tracks the ones close to expiry
pub struct ExpiryWatcher<S, N, C> {
    policy: PolicyStore<S>,
    contexts: ContextAggregator,
    sink: N,
    clock: C,
    https_only: bool,
}

impl<S, N, C> ExpiryWatcher<S, N, C>
where
    S: KeyValueStore,
    N: NotificationSink,
    C: Clock,
{
    pub fn new(policy: PolicyStore<S>, sink: N, clock: C) -> Self {
        Self {
            policy,
            contexts: ContextAggregator::new(),
            sink,
            clock,
            https_only: true,
        }
    }

    /// Whether non-https responses are ignored (default: true)
    pub fn with_https_only(mut self, https_only: bool) -> Self {
        self.https_only = https_only;
        self
    }

    pub fn policy(&self) -> &PolicyStore<S> {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut PolicyStore<S> {
        &mut self.policy
    }

    pub fn contexts(&self) -> &ContextAggregator {
        &self.contexts
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    /// Handle one event from the capture hook
    pub fn handle(&mut self, event: ObservationEvent) -> Result<Outcome, EventError> {
        match event {
            ObservationEvent::Response(response) => self.observe(&response),
            ObservationEvent::Reset { context_id } => {
                self.contexts.reset_context(context_id);
                Ok(Outcome::Reset {
                    context: context_id,
                })
            }
        }
    }

    /// Evaluate a response's certificate chain and merge flagged certificates
    pub fn observe(&mut self, response: &ResponseObservation) -> Result<Outcome, EventError> {
        let context = response.context_id;
        if response.from_cache {
            return Ok(Outcome::Skipped {
                context,
                reason: SkipReason::Cached,
            });
        }

        let url = Url::parse(&response.url).map_err(|e| EventError::InvalidUrl {
            url: response.url.clone(),
            message: e.to_string(),
        })?;
        if self.https_only && url.scheme() != "https" {
            return Ok(Outcome::Skipped {
                context,
                reason: SkipReason::NotHttps,
            });
        }
        let host = url
            .host_str()
            .ok_or_else(|| EventError::InvalidUrl {
                url: response.url.clone(),
                message: "URL has no host".to_string(),
            })?
            .to_string();

        let resolution = ThresholdResolver::new(&self.policy).resolve(&host);
        tracing::debug!(
            "Threshold for {} is {} ({})",
            host,
            resolution.threshold,
            resolution.source
        );

        let now = self.clock.now();
        let checker = ExpiryChecker::new(resolution.threshold);
        let records: Vec<CertificateRecord> = checker
            .filter_expiring(&response.certificate_chain, &now)
            .into_iter()
            .map(|cert| CertificateRecord::observed(cert, &response.url, response.timestamp))
            .collect();

        if records.is_empty() {
            return Ok(Outcome::Clear {
                context,
                host,
                resolution,
            });
        }

        let flagged = records.len();
        let count = self.contexts.record_observation(context, records);
        if context.is_tab() {
            self.sink.set_badge(context, count);
        } else {
            tracing::debug!("Not badging context {}: not a tab", context);
        }

        Ok(Outcome::Flagged {
            context,
            host,
            resolution,
            flagged,
            count,
        })
    }
}
