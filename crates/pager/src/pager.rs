//! The pager state machine.
//!
//! Each operation is atomic from the caller's perspective: load the full
//! record, decide, write the full record, then fire side effects. The
//! safety-critical rules live here:
//!
//! - a new unhealthy report while an incident is already open never
//!   re-pages or resets the ladder (it only records the newer message),
//! - acknowledgement or recovery silently turns later timeouts into no-ops,
//! - a timeout advances the ladder exactly one rung, and exhausting the
//!   ladder is a logged steady state, not an error.

use std::sync::Arc;

use oncall_core::{
    default_record, AckStatus, AlertRecord, CoreError, EscalationPolicy, HealthStatus,
};

use crate::store::AlertStore;
use crate::timer::AckTimer;

// ---------------------------------------------------------------------------
// Pager
// ---------------------------------------------------------------------------

/// Drives the health / acknowledgement / escalation transitions for all
/// monitored services against one immutable [`EscalationPolicy`].
pub struct Pager {
    policy: EscalationPolicy,
    store: Arc<dyn AlertStore>,
    timer: Arc<dyn AckTimer>,
}

impl Pager {
    /// Create a pager over the given policy and collaborators.
    pub fn new(
        policy: EscalationPolicy,
        store: Arc<dyn AlertStore>,
        timer: Arc<dyn AckTimer>,
    ) -> Self {
        Self {
            policy,
            store,
            timer,
        }
    }

    /// An external monitor reported `service_id` unhealthy.
    ///
    /// The new message is always recorded. If the service was already
    /// unhealthy the open incident stands as-is: no re-notification, no
    /// escalation reset. Otherwise the service becomes unhealthy at its
    /// currently recorded level (the first level for a fresh record), the
    /// level's targets are paged, and the acknowledgement timer is armed.
    pub async fn report_unhealthy(&self, service_id: &str, message: &str) {
        let mut record = self.service_record(service_id).await;
        record.message = message.to_string();
        record.updated_at = chrono::Utc::now();

        if record.health == HealthStatus::Unhealthy {
            // Incident already open and unresolved: record the newer
            // message only. Repeated reports must not cause alert storms.
            self.persist(&record).await;
            return;
        }

        record.health = HealthStatus::Unhealthy;
        self.save_and_notify(record).await;
    }

    /// An external monitor reported `service_id` healthy again.
    ///
    /// Acknowledgement status and escalation level are left untouched;
    /// any in-flight timeout for this service becomes a no-op through the
    /// health check in [`handle_ack_timeout`](Self::handle_ack_timeout).
    pub async fn report_healthy(&self, service_id: &str) {
        let mut record = self.service_record(service_id).await;
        record.health = HealthStatus::Healthy;
        record.updated_at = chrono::Utc::now();

        self.persist(&record).await;
        tracing::info!(service_id, "Service reported healthy");
    }

    /// A human acknowledged the open alert for `service_id`.
    ///
    /// Stops further escalation: any in-flight timeout becomes a no-op.
    pub async fn acknowledge(&self, service_id: &str) {
        let mut record = self.service_record(service_id).await;
        record.ack = AckStatus::Acknowledged;
        record.updated_at = chrono::Utc::now();

        self.persist(&record).await;
        tracing::info!(service_id, "Alert acknowledged");
    }

    /// The acknowledgement window for `service_id` elapsed.
    ///
    /// Errors with [`CoreError::NotFound`] when no record is stored — the
    /// timer subsystem only fires for services it previously armed, so an
    /// untracked timeout is a collaborator bug to surface, not swallow.
    ///
    /// No-ops when the alert was acknowledged or the service recovered
    /// before the window elapsed, and when the ladder is already at its
    /// last rung. Otherwise advances one rung, pages its targets, and
    /// re-arms the timer.
    pub async fn handle_ack_timeout(&self, service_id: &str) -> Result<(), CoreError> {
        let Some(mut record) = self.store.load(service_id).await else {
            return Err(CoreError::NotFound {
                service_id: service_id.to_string(),
            });
        };

        if record.ack == AckStatus::Acknowledged {
            return Ok(());
        }
        if record.health == HealthStatus::Healthy {
            return Ok(());
        }

        let Some(next) = self.policy.next_level(record.level) else {
            // Expected steady state requiring human intervention; observable
            // but deliberately not an error.
            tracing::info!(service_id, "Reached the last escalation level, not paging further");
            return Ok(());
        };

        record.level = next;
        record.updated_at = chrono::Utc::now();
        self.save_and_notify(record).await;
        Ok(())
    }

    /// Load the record for `service_id`, falling back to the implicit
    /// default when nothing is stored.
    async fn service_record(&self, service_id: &str) -> AlertRecord {
        match self.store.load(service_id).await {
            Some(record) => record,
            None => default_record(service_id, &self.policy),
        }
    }

    /// Persist a record, logging a rejected save. No retry here: that
    /// decision belongs to the store.
    async fn persist(&self, record: &AlertRecord) {
        if !self.store.save(record).await {
            tracing::warn!(service_id = %record.service_id, "Alert store rejected save");
        }
    }

    /// Persist, page every target at the record's level, and arm the
    /// acknowledgement timer. Shared by the became-unhealthy and
    /// escalation paths.
    async fn save_and_notify(&self, record: AlertRecord) {
        self.persist(&record).await;

        let level = self.policy.level(record.level);
        tracing::info!(
            service_id = %record.service_id,
            level = level.level,
            targets = level.targets.len(),
            "Paging escalation level"
        );
        for target in &level.targets {
            tracing::debug!(
                channel = target.channel().as_str(),
                address = target.address(),
                "Notifying target"
            );
            target.notify(&record.message).await;
        }

        self.timer.set_ack_timer(&record.service_id).await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
