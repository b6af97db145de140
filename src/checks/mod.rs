//! Check modules for cert-expiry-watch
//!
//! Certificate reading and the expiry predicate.

pub mod certificate;
pub mod expiry;

pub use certificate::{parse_certificates, parse_der, read_certificates};
pub use expiry::{expires_within, warning_horizon, ExpiryChecker};
