//! User-facing notification side channel.

use parking_lot::Mutex;
use tracing::{info, warn};

/// Sink for mutation outcome notifications (the console's toasts).
pub trait Notifier: Send + Sync {
    /// A mutation succeeded.
    fn success(&self, message: &str);

    /// A mutation failed.
    fn error(&self, message: &str);
}

/// One captured notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Success toast text.
    Success(String),
    /// Failure toast text.
    Error(String),
}

impl Notification {
    /// The toast text regardless of kind.
    pub fn message(&self) -> &str {
        match self {
            Notification::Success(m) | Notification::Error(m) => m,
        }
    }
}

/// Notifier that forwards to the tracing subscriber.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!(message, "mutation succeeded");
    }

    fn error(&self, message: &str) {
        warn!(message, "mutation failed");
    }
}

/// Notifier that records everything, for tests.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    events: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything notified so far, in order.
    pub fn notifications(&self) -> Vec<Notification> {
        self.events.lock().clone()
    }

    /// The most recent notification, if any.
    pub fn last(&self) -> Option<Notification> {
        self.events.lock().last().cloned()
    }
}

impl Notifier for MemoryNotifier {
    fn success(&self, message: &str) {
        self.events
            .lock()
            .push(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.events
            .lock()
            .push(Notification::Error(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_notifier_records_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.success("created");
        notifier.error("path not found");

        assert_eq!(
            notifier.notifications(),
            vec![
                Notification::Success("created".into()),
                Notification::Error("path not found".into()),
            ]
        );
        assert_eq!(notifier.last().unwrap().message(), "path not found");
    }
}
