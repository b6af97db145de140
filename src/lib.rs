//! cert-expiry-watch library
//!
//! Decides which certificates of an observed TLS chain are close to expiry
//! and keeps track of them per browsing context:
//! - Threshold policy: a global default plus exact-hostname overrides,
//!   persisted through a pluggable key-value store
//! - Threshold resolution with a built-in fallback of one day
//! - Expiry evaluation in calendar days
//! - Per-context aggregation keyed by certificate fingerprint
//!
//! # Usage
//!
//! ```rust,ignore
//! use cert_expiry_watch::clock::SystemClock;
//! use cert_expiry_watch::notify::TerminalBadge;
//! use cert_expiry_watch::policy::PolicyStore;
//! use cert_expiry_watch::runner::ExpiryWatcher;
//! use cert_expiry_watch::store::MemoryStore;
//!
//! let mut policy = PolicyStore::new(MemoryStore::new());
//! policy.set_global_default(30)?;
//! let mut watcher = ExpiryWatcher::new(policy, TerminalBadge::new(), SystemClock);
//! let outcome = watcher.handle(event)?;
//! ```

pub mod checks;
pub mod cli;
pub mod clock;
pub mod config;
pub mod context;
pub mod models;
pub mod notify;
pub mod output;
pub mod policy;
pub mod runner;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use cli::Cli;
pub use config::Settings;
pub use context::ContextAggregator;
pub use models::{CertificateRecord, ContextId, ObservationEvent, Threshold};
pub use policy::{PolicyStore, ThresholdResolver};
pub use runner::{ExpiryWatcher, Outcome};
pub use utils::{Result, WatchError};
