//! Notification sinks for per-context counts

use crate::models::ContextId;
use console::style;

/// Receives the number of flagged certificates of a context
pub trait NotificationSink {
    fn set_badge(&mut self, context: ContextId, count: usize);
}

impl<T: NotificationSink + ?Sized> NotificationSink for &mut T {
    fn set_badge(&mut self, context: ContextId, count: usize) {
        (**self).set_badge(context, count)
    }
}

/// Prints badge updates to the terminal
#[derive(Debug, Default)]
pub struct TerminalBadge {
    quiet: bool,
}

impl TerminalBadge {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that swallows updates, for machine-readable output modes
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl NotificationSink for TerminalBadge {
    fn set_badge(&mut self, context: ContextId, count: usize) {
        if self.quiet {
            return;
        }
        println!(
            "  {} context {} has {} expiring certificate(s)",
            style(format!("[{}]", count)).black().on_yellow().bold(),
            style(context).bold(),
            count
        );
    }
}
