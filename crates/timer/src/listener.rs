//! Timeout expiry listener.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use oncall_pager::Pager;

/// Long-lived task that feeds timer expiries into the Pager.
///
/// Drains the channel filled by
/// [`TokioAckTimer`](crate::TokioAckTimer) and invokes
/// [`Pager::handle_ack_timeout`] for each expired service. An expiry for
/// an untracked service is a collaborator bug; it is logged at `error`
/// and the loop keeps running.
pub struct TimeoutListener;

impl TimeoutListener {
    /// Run the listener loop.
    ///
    /// Exits when the provided [`CancellationToken`] is cancelled or when
    /// every timer sender has been dropped.
    pub async fn run(
        pager: Arc<Pager>,
        mut expiries: mpsc::UnboundedReceiver<String>,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Timeout listener cancelled");
                    break;
                }
                expiry = expiries.recv() => {
                    match expiry {
                        Some(service_id) => {
                            if let Err(e) = pager.handle_ack_timeout(&service_id).await {
                                tracing::error!(
                                    service_id = %service_id,
                                    error = %e,
                                    "Acknowledgement timeout for untracked service"
                                );
                            }
                        }
                        None => {
                            tracing::info!("All timers dropped, timeout listener shutting down");
                            break;
                        }
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use oncall_core::{
        AckStatus, Channel, EscalationLevel, EscalationPolicy, HealthStatus, LevelId, Notifier,
    };
    use oncall_pager::{AckTimer, AlertStore};
    use oncall_store::MemoryAlertStore;

    use super::*;

    struct CountingTarget {
        messages: Mutex<Vec<String>>,
    }

    impl CountingTarget {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                messages: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Notifier for CountingTarget {
        fn channel(&self) -> Channel {
            Channel::Email
        }

        fn address(&self) -> &str {
            "oncall@example.com"
        }

        async fn notify(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    struct NoopTimer;

    #[async_trait]
    impl AckTimer for NoopTimer {
        async fn set_ack_timer(&self, _service_id: &str) {}
    }

    fn two_level_pager(
        store: Arc<MemoryAlertStore>,
    ) -> (Arc<Pager>, Arc<CountingTarget>, LevelId) {
        let second_target = CountingTarget::new();
        let policy = EscalationPolicy::new(vec![
            EscalationLevel {
                level: 1,
                targets: vec![],
            },
            EscalationLevel {
                level: 2,
                targets: vec![second_target.clone()],
            },
        ])
        .expect("two levels");
        let second = policy.next_level(policy.first_level()).expect("second level");
        let pager = Arc::new(Pager::new(policy, store, Arc::new(NoopTimer)));
        (pager, second_target, second)
    }

    #[tokio::test]
    async fn expiry_escalates_a_tracked_service() {
        let store = Arc::new(MemoryAlertStore::new());
        let (pager, second_target, second) = two_level_pager(store.clone());

        // Open an unacknowledged first-level alert.
        pager.report_unhealthy("svc1", "down").await;

        let (tx, rx) = mpsc::unbounded_channel();
        tx.send("svc1".to_string()).expect("queued expiry");
        drop(tx);

        TimeoutListener::run(pager, rx, CancellationToken::new()).await;

        let record = store.load("svc1").await.expect("stored record");
        assert_eq!(record.level, second);
        assert_eq!(record.health, HealthStatus::Unhealthy);
        assert_eq!(record.ack, AckStatus::Unacknowledged);
        assert_eq!(
            *second_target.messages.lock().unwrap(),
            vec!["down".to_string()]
        );
    }

    #[tokio::test]
    async fn unknown_expiry_is_logged_and_the_loop_continues() {
        let store = Arc::new(MemoryAlertStore::new());
        let (pager, second_target, second) = two_level_pager(store.clone());

        pager.report_unhealthy("svc1", "down").await;

        let (tx, rx) = mpsc::unbounded_channel();
        tx.send("ghost".to_string()).expect("queued expiry");
        tx.send("svc1".to_string()).expect("queued expiry");
        drop(tx);

        TimeoutListener::run(pager, rx, CancellationToken::new()).await;

        // The untracked expiry did not kill the loop: svc1 still escalated.
        let record = store.load("svc1").await.expect("stored record");
        assert_eq!(record.level, second);
        assert_eq!(second_target.messages.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cancellation_stops_the_listener() {
        let store = Arc::new(MemoryAlertStore::new());
        let (pager, _second_target, _second) = two_level_pager(store);

        let (_tx, rx) = mpsc::unbounded_channel::<String>();
        let cancel = CancellationToken::new();
        cancel.cancel();

        // Must return promptly even though the sender is still alive.
        TimeoutListener::run(pager, rx, cancel).await;
    }
}
