//! Tokio-backed acknowledgement timer.
//!
//! [`TokioAckTimer`] implements the [`AckTimer`](oncall_pager::AckTimer)
//! boundary by sleeping out the acknowledgement window in a spawned task
//! and pushing the expired service id onto a channel.
//! [`TimeoutListener`] drains that channel and feeds each expiry back into
//! [`Pager::handle_ack_timeout`](oncall_pager::Pager::handle_ack_timeout).

pub mod ack;
pub mod listener;

pub use ack::{TokioAckTimer, DEFAULT_ACK_TIMEOUT};
pub use listener::TimeoutListener;
