//! Player-facing announcements
//!
//! The core never draws text. It hands short messages to a `Notifier` at
//! fixed points (charge cancelled, inventory full, potion picked up) and
//! moves on; whether and when the player sees them is up to the host.

use std::cell::RefCell;

/// How loudly an announcement should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Fire-and-forget announcement sink
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}

/// Sends announcements to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => tracing::info!(target: "announce", "{message}"),
            Severity::Warning => tracing::warn!(target: "announce", "{message}"),
            Severity::Error => tracing::error!(target: "announce", "{message}"),
        }
    }
}

/// Keeps announcements for a UI to drain (floating text, toasts)
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: RefCell<Vec<(String, Severity)>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns everything logged so far
    pub fn drain(&self) -> Vec<(String, Severity)> {
        self.messages.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }

    /// True if any logged message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.borrow().iter().any(|(m, _)| m.contains(needle))
    }
}

impl Notifier for MessageLog {
    fn notify(&self, message: &str, severity: Severity) {
        self.messages.borrow_mut().push((message.to_string(), severity));
    }
}
