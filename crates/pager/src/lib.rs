//! The pager state machine and its collaborator boundaries.
//!
//! [`Pager`] consumes three injected collaborators — an [`AlertStore`] for
//! per-service alert state, the [`Notifier`](oncall_core::Notifier) targets
//! held by the escalation policy, and an [`AckTimer`] that delivers
//! acknowledgement timeouts back to it — and encodes the rules that prevent
//! duplicate paging, stop notification once handled, and advance escalation
//! only when appropriate.

pub mod pager;
pub mod store;
pub mod timer;

pub use pager::Pager;
pub use store::AlertStore;
pub use timer::AckTimer;
