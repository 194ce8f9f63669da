//! Alert state for monitored services.
//!
//! One [`AlertRecord`] exists per monitored service, keyed by its opaque
//! service id. A service with no stored record is implicitly in the state
//! produced by [`default_record`]; absence is not an error.

use serde::{Deserialize, Serialize};

use crate::escalation::{EscalationPolicy, LevelId};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Status enums
// ---------------------------------------------------------------------------

/// Health of a monitored service, as last reported by the external monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Whether a human has acknowledged the open alert.
///
/// Only meaningful while the service is [`HealthStatus::Unhealthy`]; an
/// acknowledged-but-healthy record is valid but drives no behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AckStatus {
    Unacknowledged,
    Acknowledged,
}

// ---------------------------------------------------------------------------
// AlertRecord
// ---------------------------------------------------------------------------

/// The persisted alert state snapshot for one monitored service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    /// Opaque stable identifier supplied by the external monitor.
    pub service_id: String,
    /// Current reported health.
    pub health: HealthStatus,
    /// Whether a human has acknowledged the open alert.
    pub ack: AckStatus,
    /// The escalation level currently in effect. Always a valid reference
    /// into the configured policy while the record exists.
    pub level: LevelId,
    /// Free-text description from the most recent unhealthy report.
    pub message: String,
    /// When the record was last mutated (UTC). Diagnostic only.
    pub updated_at: Timestamp,
}

/// Build the implicit default record for a service with no stored state.
///
/// A health report may legitimately be the first-ever event for a service,
/// so the Pager treats a missing record as `Healthy` / `Unacknowledged` at
/// the first level of the policy with an empty message, rather than as an
/// error.
pub fn default_record(service_id: &str, policy: &EscalationPolicy) -> AlertRecord {
    AlertRecord {
        service_id: service_id.to_string(),
        health: HealthStatus::Healthy,
        ack: AckStatus::Unacknowledged,
        level: policy.first_level(),
        message: String::new(),
        updated_at: chrono::Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escalation::EscalationLevel;

    fn policy() -> EscalationPolicy {
        EscalationPolicy::new(vec![
            EscalationLevel {
                level: 1,
                targets: vec![],
            },
            EscalationLevel {
                level: 2,
                targets: vec![],
            },
        ])
        .expect("two levels")
    }

    #[test]
    fn default_record_starts_healthy_at_first_level() {
        let policy = policy();
        let record = default_record("svc1", &policy);

        assert_eq!(record.service_id, "svc1");
        assert_eq!(record.health, HealthStatus::Healthy);
        assert_eq!(record.ack, AckStatus::Unacknowledged);
        assert_eq!(record.level, policy.first_level());
        assert!(record.message.is_empty());
    }

    #[test]
    fn record_round_trips_through_json() {
        let policy = policy();
        let record = default_record("svc1", &policy);

        let json = serde_json::to_string(&record).expect("serialize");
        let back: AlertRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, record);
    }

    #[test]
    fn status_enums_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
        assert_eq!(
            serde_json::to_string(&AckStatus::Acknowledged).unwrap(),
            "\"acknowledged\""
        );
    }
}
