//! One-way stop signal.

use tokio::sync::watch;

/// Coordinator for stopping a long-running task.
///
/// Unlike a broadcast, the latched value means a subscriber created after
/// `trigger()` still observes the stop.
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    /// Create a new, untriggered signal.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Subscribe to the stop signal.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Trigger the stop. Idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_late_subscriber_sees_trigger() {
        let shutdown = Shutdown::new();
        assert!(!shutdown.is_triggered());

        shutdown.trigger();
        shutdown.trigger();

        let rx = shutdown.subscribe();
        assert!(*rx.borrow());
        assert!(shutdown.is_triggered());
    }

    #[tokio::test]
    async fn test_waiting_subscriber_wakes() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();
        let waiter = tokio::spawn(async move { rx.wait_for(|stopped| *stopped).await.is_ok() });

        shutdown.trigger();
        assert!(waiter.await.unwrap());
    }
}
