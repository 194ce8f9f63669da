//! Acknowledgement timeout boundary.

use async_trait::async_trait;

/// Arms a fixed-delay acknowledgement timeout for a service.
///
/// After the delay (15 minutes by default) the implementation must invoke
/// [`Pager::handle_ack_timeout`](crate::Pager::handle_ack_timeout) exactly
/// once per arm call. There is no cancellation primitive: stale expiries
/// are suppressed by the Pager's own state checks, not by un-arming the
/// timer.
#[async_trait]
pub trait AckTimer: Send + Sync {
    /// Schedule a timeout event for `service_id`.
    async fn set_ack_timer(&self, service_id: &str);
}
