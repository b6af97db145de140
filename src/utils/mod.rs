//! Utility modules for cert-expiry-watch
//!
//! This module contains the error types shared across the crate.

pub mod error;

pub use error::{
    CertificateError, ConfigError, EventError, PolicyError, Result, StoreError, WatchError,
};
