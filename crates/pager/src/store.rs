//! Alert state persistence boundary.

use async_trait::async_trait;

use oncall_core::AlertRecord;

/// Key-value persistence for [`AlertRecord`]s, keyed by service id.
///
/// The store owns whatever locking or transaction discipline is needed so
/// that concurrent Pager operations on the same service observe a
/// consistent load-then-save sequence; operations on different services
/// must not block one another. The Pager itself takes no locks.
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Persist the full record, replacing any previous state for its
    /// service. Returns `false` on failure; the Pager treats a failed save
    /// as best-effort and never retries.
    async fn save(&self, record: &AlertRecord) -> bool;

    /// Load the current record, or `None` if the service has never been
    /// saved. Absence is a valid state, not an error.
    async fn load(&self, service_id: &str) -> Option<AlertRecord>;
}
