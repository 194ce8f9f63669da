//! In-memory alert state store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use oncall_core::AlertRecord;
use oncall_pager::AlertStore;

/// Non-durable [`AlertStore`] keeping records in a map behind an async
/// mutex.
///
/// Individual saves and loads are serialized by the lock. A full
/// load-decide-save Pager operation is atomic only as long as operations
/// for the same service are not raced from separate tasks; the daemon
/// drives the Pager from a single event loop, which satisfies that.
/// `save` always succeeds here — the boolean exists for fallible durable
/// backends.
pub struct MemoryAlertStore {
    records: Mutex<HashMap<String, AlertRecord>>,
}

impl MemoryAlertStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryAlertStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlertStore for MemoryAlertStore {
    async fn save(&self, record: &AlertRecord) -> bool {
        self.records
            .lock()
            .await
            .insert(record.service_id.clone(), record.clone());
        true
    }

    async fn load(&self, service_id: &str) -> Option<AlertRecord> {
        self.records.lock().await.get(service_id).cloned()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use oncall_core::{default_record, EscalationLevel, EscalationPolicy, HealthStatus};

    use super::*;

    fn policy() -> EscalationPolicy {
        EscalationPolicy::new(vec![EscalationLevel {
            level: 1,
            targets: vec![],
        }])
        .expect("one level")
    }

    #[tokio::test]
    async fn load_of_an_unknown_service_is_none() {
        let store = MemoryAlertStore::new();
        assert!(store.load("svc1").await.is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = MemoryAlertStore::new();
        let record = default_record("svc1", &policy());

        assert!(store.save(&record).await);
        assert_eq!(store.load("svc1").await, Some(record));
    }

    #[tokio::test]
    async fn save_replaces_the_previous_record() {
        let store = MemoryAlertStore::new();
        let policy = policy();

        let mut record = default_record("svc1", &policy);
        store.save(&record).await;

        record.health = HealthStatus::Unhealthy;
        record.message = "down".to_string();
        store.save(&record).await;

        let loaded = store.load("svc1").await.expect("stored record");
        assert_eq!(loaded.health, HealthStatus::Unhealthy);
        assert_eq!(loaded.message, "down");
    }

    #[tokio::test]
    async fn services_are_stored_independently() {
        let store = MemoryAlertStore::new();
        let policy = policy();

        store.save(&default_record("svc1", &policy)).await;
        store.save(&default_record("svc2", &policy)).await;

        assert_eq!(store.load("svc1").await.unwrap().service_id, "svc1");
        assert_eq!(store.load("svc2").await.unwrap().service_id, "svc2");
    }
}
