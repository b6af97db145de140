//! Data models for cert-expiry-watch
//!
//! This module contains the data structures shared by the policy store,
//! the evaluator and the context aggregator.

pub mod certificate;
pub mod event;
pub mod threshold;

pub use certificate::{CertificateRecord, ContextId, ObservedCertificate};
pub use event::{ObservationEvent, ResponseObservation};
pub use threshold::{
    IntoThreshold, Resolution, Threshold, ThresholdPolicy, ThresholdSource, FALLBACK_THRESHOLD,
};
