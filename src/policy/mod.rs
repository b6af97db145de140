//! Threshold policy: storage and resolution

pub mod resolver;
pub mod store;

pub use resolver::ThresholdResolver;
pub use store::{PolicyStore, GLOBAL_DEFAULT_KEY, OVERRIDES_KEY};
