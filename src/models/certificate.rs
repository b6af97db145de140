//! Certificate information types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a browsing context (tab, worker, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextId(pub i64);

impl ContextId {
    /// Whether the context is a user-visible tab. Negative ids are used
    /// for requests that do not belong to a tab.
    pub fn is_tab(self) -> bool {
        self.0 >= 0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ContextId {
    fn from(id: i64) -> Self {
        ContextId(id)
    }
}

/// One certificate of an observed chain, already parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedCertificate {
    /// SHA-256 fingerprint
    pub fingerprint: String,
    /// Issuer distinguished name
    pub issuer: String,
    /// Subject distinguished name
    pub subject: String,
    /// Not valid before
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub validity_start: DateTime<Utc>,
    /// Not valid after
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub validity_end: DateTime<Utc>,
}

/// A flagged certificate as tracked for one context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateRecord {
    pub fingerprint: String,
    pub issuer: String,
    pub subject: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub validity_end: DateTime<Utc>,
    /// Most recent request URL that surfaced this certificate
    pub last_url: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_seen: DateTime<Utc>,
}

impl CertificateRecord {
    /// Build a record from an observation of `cert` at `url`
    pub fn observed(cert: &ObservedCertificate, url: &str, seen_at: DateTime<Utc>) -> Self {
        Self {
            fingerprint: cert.fingerprint.clone(),
            issuer: cert.issuer.clone(),
            subject: cert.subject.clone(),
            validity_end: cert.validity_end,
            last_url: url.to_string(),
            last_seen: seen_at,
        }
    }

    /// Whole days left relative to `now` (negative once expired)
    pub fn days_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        self.validity_end.signed_duration_since(now).num_days()
    }

    /// Check if the certificate is expired at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.validity_end
    }
}
