//! Expiry evaluation
//!
//! A certificate is flagged when its validity ends before `now` plus the
//! threshold. The day addition follows calendar days in the time zone of
//! `now`, so a day spanning a DST change is not exactly 24 hours.

use crate::models::{ObservedCertificate, Threshold};
use chrono::{DateTime, Days, Duration, TimeZone, Utc};

/// The point in time `threshold` calendar days after `now`
pub fn warning_horizon<Tz: TimeZone>(now: &DateTime<Tz>, threshold: Threshold) -> DateTime<Utc> {
    let days = threshold.days();
    if let Some(horizon) = now.clone().checked_add_days(Days::new(u64::from(days))) {
        return horizon.with_timezone(&Utc);
    }

    // Local result falls in a DST gap or out of range: add whole 24h days instead
    now.with_timezone(&Utc)
        .checked_add_signed(Duration::days(i64::from(days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Whether a certificate ending at `validity_end` must be flagged
pub fn expires_within<Tz: TimeZone>(
    validity_end: DateTime<Utc>,
    threshold: Threshold,
    now: &DateTime<Tz>,
) -> bool {
    validity_end < warning_horizon(now, threshold)
}

/// Filters certificate chains down to the certificates to flag
pub struct ExpiryChecker {
    threshold: Threshold,
}

impl ExpiryChecker {
    pub fn new(threshold: Threshold) -> Self {
        Self { threshold }
    }

    /// Check a single certificate
    pub fn is_flagged<Tz: TimeZone>(&self, cert: &ObservedCertificate, now: &DateTime<Tz>) -> bool {
        expires_within(cert.validity_end, self.threshold, now)
    }

    /// Certificates of `chain` that expire within the threshold, in chain order
    pub fn filter_expiring<'c, Tz: TimeZone>(
        &self,
        chain: &'c [ObservedCertificate],
        now: &DateTime<Tz>,
    ) -> Vec<&'c ObservedCertificate> {
        let horizon = warning_horizon(now, self.threshold);
        chain
            .iter()
            .filter(|cert| cert.validity_end < horizon)
            .collect()
    }
}
