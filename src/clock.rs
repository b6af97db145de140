//! Wall-clock source for expiry evaluation

use chrono::{DateTime, Local, Utc};

pub trait Clock {
    /// Current local wall-clock time
    fn now(&self) -> DateTime<Local>;
}

/// The system clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }
}
