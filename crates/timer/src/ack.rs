//! Acknowledgement timer adapter.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use oncall_pager::AckTimer;

/// Documented default acknowledgement window.
pub const DEFAULT_ACK_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// [`AckTimer`] backed by `tokio::time::sleep`.
///
/// Each arm call spawns a task that sleeps out the window and then pushes
/// the service id onto an unbounded channel; the paired receiver is drained
/// by [`TimeoutListener`](crate::TimeoutListener). One arm call produces
/// exactly one expiry. Timers are never cancelled — a stale expiry is
/// suppressed by the Pager's state checks, not here.
pub struct TokioAckTimer {
    delay: Duration,
    tx: mpsc::UnboundedSender<String>,
}

impl TokioAckTimer {
    /// Create a timer with the given acknowledgement window, returning the
    /// receiver end that the timeout listener drains.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { delay, tx }, rx)
    }
}

#[async_trait]
impl AckTimer for TokioAckTimer {
    async fn set_ack_timer(&self, service_id: &str) {
        let tx = self.tx.clone();
        let delay = self.delay;

        tracing::debug!(service_id, delay_secs = delay.as_secs(), "Arming acknowledgement timer");
        let service_id = service_id.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // A dropped receiver means the listener is shutting down and
            // the expiry is moot.
            let _ = tx.send(service_id);
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn timer_fires_after_the_window() {
        let (timer, mut rx) = TokioAckTimer::new(Duration::from_secs(60));
        timer.set_ack_timer("svc1").await;

        // Paused time auto-advances through the sleep.
        assert_eq!(rx.recv().await.as_deref(), Some("svc1"));
    }

    #[tokio::test(start_paused = true)]
    async fn timer_does_not_fire_early() {
        let (timer, mut rx) = TokioAckTimer::new(Duration::from_secs(60));
        timer.set_ack_timer("svc1").await;

        // Let the spawned task register its sleep before advancing.
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_secs(30)).await;

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn each_arm_call_fires_exactly_once() {
        let (timer, mut rx) = TokioAckTimer::new(Duration::from_secs(60));
        timer.set_ack_timer("svc1").await;
        timer.set_ack_timer("svc2").await;

        let mut fired = vec![
            rx.recv().await.expect("first expiry"),
            rx.recv().await.expect("second expiry"),
        ];
        fired.sort();
        assert_eq!(fired, vec!["svc1", "svc2"]);

        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
    }
}
