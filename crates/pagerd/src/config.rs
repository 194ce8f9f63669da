//! Daemon configuration.
//!
//! The escalation ladder is described by a JSON policy file pointed at by
//! `ONCALL_POLICY_PATH`; delivery transports are configured separately via
//! environment variables (`SMTP_*`, `SMS_GATEWAY_*`). Targets whose
//! transport is not configured are skipped with a warning at wiring time
//! rather than failing startup.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use oncall_core::{Channel, EscalationLevel, EscalationPolicy, Notifier};
use oncall_notify::{EmailConfig, EmailNotifier, SmsConfig, SmsNotifier};
use oncall_timer::DEFAULT_ACK_TIMEOUT;

/// Environment variable naming the policy file.
pub const POLICY_PATH_VAR: &str = "ONCALL_POLICY_PATH";

/// Environment variable overriding the acknowledgement window in seconds.
pub const ACK_TIMEOUT_VAR: &str = "ONCALL_ACK_TIMEOUT_SECS";

fn default_ack_timeout_secs() -> u64 {
    DEFAULT_ACK_TIMEOUT.as_secs()
}

// ---------------------------------------------------------------------------
// PolicyConfig
// ---------------------------------------------------------------------------

/// On-disk shape of the escalation policy.
///
/// ```json
/// {
///   "ack_timeout_secs": 900,
///   "levels": [
///     { "level": 1, "targets": [ { "channel": "email", "address": "john@example.com" } ] },
///     { "level": 2, "targets": [ { "channel": "sms", "address": "+1234567890" } ] }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct PolicyConfig {
    /// Acknowledgement window in seconds (defaults to 15 minutes).
    #[serde(default = "default_ack_timeout_secs")]
    pub ack_timeout_secs: u64,
    /// Ordered escalation levels.
    pub levels: Vec<LevelConfig>,
}

/// One configured escalation level.
#[derive(Debug, Deserialize)]
pub struct LevelConfig {
    /// Numeric label for diagnostics.
    pub level: i32,
    /// Targets paged at this level.
    pub targets: Vec<TargetConfig>,
}

/// One configured notification target.
#[derive(Debug, Deserialize)]
pub struct TargetConfig {
    pub channel: Channel,
    pub address: String,
}

impl PolicyConfig {
    /// Load and parse the policy file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read policy file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse policy file {}", path.display()))
    }

    /// The acknowledgement window, with the env override applied.
    pub fn ack_timeout(&self) -> Duration {
        let secs = std::env::var(ACK_TIMEOUT_VAR)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(self.ack_timeout_secs);
        Duration::from_secs(secs)
    }

    /// Assemble the runtime [`EscalationPolicy`] from this configuration.
    ///
    /// Transport configuration comes from the environment; targets without
    /// a configured transport are dropped with a warning so a partially
    /// configured deployment still pages whatever it can.
    pub fn build_policy(&self) -> anyhow::Result<EscalationPolicy> {
        let email = EmailConfig::from_env();
        let sms = SmsConfig::from_env();

        let mut levels = Vec::with_capacity(self.levels.len());
        for level_config in &self.levels {
            let mut targets: Vec<Arc<dyn Notifier>> = Vec::new();
            for target in &level_config.targets {
                match target.channel {
                    Channel::Email => match &email {
                        Some(config) => targets.push(Arc::new(EmailNotifier::new(
                            config.clone(),
                            target.address.clone(),
                        ))),
                        None => tracing::warn!(
                            address = %target.address,
                            "SMTP not configured, skipping email target"
                        ),
                    },
                    Channel::Sms => match &sms {
                        Some(config) => targets.push(Arc::new(SmsNotifier::new(
                            config.clone(),
                            target.address.clone(),
                        ))),
                        None => tracing::warn!(
                            address = %target.address,
                            "SMS gateway not configured, skipping SMS target"
                        ),
                    },
                }
            }
            levels.push(EscalationLevel {
                level: level_config.level,
                targets,
            });
        }

        Ok(EscalationPolicy::new(levels)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
