//! Domain model for the oncall escalation pager.
//!
//! Pure data and policy logic only:
//!
//! - [`AlertRecord`] — the per-service alert state snapshot, with
//!   [`default_record`] for services that have never been stored.
//! - [`EscalationPolicy`] — the ordered, immutable notification ladder.
//! - [`Notifier`] — the capability implemented by delivery channels.
//!
//! The state machine that drives these lives in `oncall-pager`; concrete
//! storage, delivery, and timer adapters live in their own crates.

pub mod alert;
pub mod error;
pub mod escalation;
pub mod types;

pub use alert::{default_record, AckStatus, AlertRecord, HealthStatus};
pub use error::CoreError;
pub use escalation::{Channel, EscalationLevel, EscalationPolicy, LevelId, Notifier};
