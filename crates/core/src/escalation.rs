//! Escalation policy: the ordered notification ladder.
//!
//! An [`EscalationPolicy`] is configured once, externally, and stays
//! immutable for the lifetime of the Pager. The Pager only ever asks for
//! the first level and the level after a given one; it never mutates the
//! ladder.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Delivery channel for a notification target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Sms,
    Email,
}

impl Channel {
    /// String representation for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Sms => "sms",
            Channel::Email => "email",
        }
    }
}

/// A notification delivery capability.
///
/// Implementations correspond to delivery channels (SMS, email); the Pager
/// treats them uniformly and never branches on the channel. Channel and
/// address exist for wiring and structured logging only.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Delivery channel discriminator.
    fn channel(&self) -> Channel;

    /// Channel-specific destination address (phone number, email address).
    fn address(&self) -> &str;

    /// Deliver the alert message to this target.
    ///
    /// Fire-and-forget from the caller's perspective: retry, backoff, and
    /// failure reporting belong to the implementation.
    async fn notify(&self, message: &str);
}

// ---------------------------------------------------------------------------
// EscalationPolicy
// ---------------------------------------------------------------------------

/// Opaque positional reference to a level within an [`EscalationPolicy`].
///
/// Minted only by the policy itself. Identity is the position in the
/// configured order, not the numeric label, so duplicate labels stay
/// unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelId(usize);

/// One rung of the escalation ladder.
pub struct EscalationLevel {
    /// Numeric label for diagnostics. Not required to be unique.
    pub level: i32,
    /// Targets paged when this level is notified.
    pub targets: Vec<Arc<dyn Notifier>>,
}

impl fmt::Debug for EscalationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EscalationLevel")
            .field("level", &self.level)
            .field("targets", &self.targets.len())
            .finish()
    }
}

/// Ordered, immutable ladder of escalation levels.
#[derive(Debug)]
pub struct EscalationPolicy {
    levels: Vec<EscalationLevel>,
}

impl EscalationPolicy {
    /// Build a policy from its ordered levels.
    ///
    /// A policy with zero levels is a configuration error surfaced here,
    /// at construction; the Pager assumes at least one level exists.
    pub fn new(levels: Vec<EscalationLevel>) -> Result<Self, CoreError> {
        if levels.is_empty() {
            return Err(CoreError::EmptyPolicy);
        }
        Ok(Self { levels })
    }

    /// The level paged when a service first becomes unhealthy.
    pub fn first_level(&self) -> LevelId {
        LevelId(0)
    }

    /// The level immediately after `current`, or `None` at the last rung.
    pub fn next_level(&self, current: LevelId) -> Option<LevelId> {
        let next = current.0 + 1;
        (next < self.levels.len()).then_some(LevelId(next))
    }

    /// Resolve a level id minted by this policy.
    pub fn level(&self, id: LevelId) -> &EscalationLevel {
        &self.levels[id.0]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
