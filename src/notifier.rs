use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

/// Fire-and-forget surface for user-facing notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, message: &str) {
        (**self).notify(message)
    }
}

/// Queues notices until the view drains them.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    pending: Mutex<Vec<String>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued notice, oldest first.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.pending.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, message: &str) {
        self.pending.lock().push(message.to_string());
    }
}

/// Sends notices to the log, for embedding without a display.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        info!(notice = message, "user notice");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_in_order_and_clears() {
        let notifier = MemoryNotifier::new();
        notifier.notify("first");
        notifier.notify("second");

        assert_eq!(notifier.drain(), vec!["first", "second"]);
        assert!(notifier.is_empty());
        assert!(notifier.drain().is_empty());
    }

    #[test]
    fn shared_handle_feeds_the_same_queue() {
        let notifier = Arc::new(MemoryNotifier::new());
        let handle: Arc<MemoryNotifier> = Arc::clone(&notifier);
        handle.notify("via arc");
        TracingNotifier.notify("logged only");

        assert_eq!(notifier.drain(), vec!["via arc"]);
    }
}
