//! Command implementations for cert-expiry-watch

pub mod check;
pub mod policy;
pub mod watch;

pub use check::run_check;
pub use policy::{run_default, run_override, run_resolve};
pub use watch::run_watch;
