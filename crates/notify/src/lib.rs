//! Delivery-channel notification targets.
//!
//! Concrete [`Notifier`](oncall_core::Notifier) implementations:
//!
//! - [`EmailNotifier`] — plain-text alert emails over async SMTP.
//! - [`SmsNotifier`] — alert texts via an HTTP SMS gateway.
//!
//! Both are fire-and-forget at the `notify` boundary: delivery failures
//! are retried/logged inside the adapter and never surface to the Pager.

pub mod email;
pub mod sms;

pub use email::{EmailConfig, EmailNotifier};
pub use sms::{SmsConfig, SmsNotifier};
