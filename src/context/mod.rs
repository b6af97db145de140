//! Per-context tracking of flagged certificates
//!
//! Each browsing context keeps a set of flagged certificates keyed by
//! fingerprint. Sets are created on the first flagged observation and only
//! go away through [`ContextAggregator::reset_context`]; when that happens is
//! up to whoever drives the aggregator.

use crate::models::{CertificateRecord, ContextId};
use std::collections::HashMap;

/// Flagged certificates of one context, keyed by fingerprint
pub type ContextRecordSet = HashMap<String, CertificateRecord>;

#[derive(Debug, Default)]
pub struct ContextAggregator {
    contexts: HashMap<ContextId, ContextRecordSet>,
}

impl ContextAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge flagged certificates into `context` and return its new size.
    ///
    /// Known fingerprints keep their first-seen validity, issuer and
    /// subject; only the last URL and time of sighting move forward.
    pub fn record_observation<I>(&mut self, context: ContextId, records: I) -> usize
    where
        I: IntoIterator<Item = CertificateRecord>,
    {
        let mut records = records.into_iter().peekable();
        if records.peek().is_none() {
            return self.count(context);
        }

        let set = self.contexts.entry(context).or_default();
        for record in records {
            match set.get_mut(&record.fingerprint) {
                Some(existing) => {
                    existing.last_url = record.last_url;
                    existing.last_seen = record.last_seen;
                }
                None => {
                    set.insert(record.fingerprint.clone(), record);
                }
            }
        }

        tracing::debug!("Context {} now tracks {} certificate(s)", context, set.len());
        set.len()
    }

    /// Snapshot of the records of `context`; empty if the context is unknown
    pub fn records(&self, context: ContextId) -> ContextRecordSet {
        self.contexts.get(&context).cloned().unwrap_or_default()
    }

    /// Number of flagged certificates tracked for `context`
    pub fn count(&self, context: ContextId) -> usize {
        self.contexts.get(&context).map_or(0, HashMap::len)
    }

    /// Forget everything about `context`
    pub fn reset_context(&mut self, context: ContextId) {
        if self.contexts.remove(&context).is_some() {
            tracing::debug!("Context {} reset", context);
        }
    }

    /// Contexts with at least one tracked certificate, in ascending order
    pub fn contexts(&self) -> Vec<ContextId> {
        let mut ids: Vec<ContextId> = self.contexts.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}
