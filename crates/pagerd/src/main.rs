//! Pager daemon.
//!
//! Wires the escalation policy, in-memory alert store, delivery targets,
//! and tokio acknowledgement timer into a [`Pager`], then runs the timeout
//! listener until shutdown. Health reports and acknowledgements arrive
//! through whatever transport adapter is layered on top; none is defined
//! here.

mod config;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oncall_pager::Pager;
use oncall_store::MemoryAlertStore;
use oncall_timer::{TimeoutListener, TokioAckTimer};

use crate::config::PolicyConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oncall_pagerd=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let policy_path = std::env::var(config::POLICY_PATH_VAR)
        .with_context(|| format!("{} must point at the escalation policy file", config::POLICY_PATH_VAR))?;
    let policy_config = PolicyConfig::load(Path::new(&policy_path))?;
    let ack_timeout = policy_config.ack_timeout();
    let policy = policy_config.build_policy()?;

    let store = Arc::new(MemoryAlertStore::new());
    let (timer, expiries) = TokioAckTimer::new(ack_timeout);
    let pager = Arc::new(Pager::new(policy, store, Arc::new(timer)));

    let cancel = CancellationToken::new();
    let listener = tokio::spawn(TimeoutListener::run(
        pager.clone(),
        expiries,
        cancel.clone(),
    ));

    tracing::info!(
        ack_timeout_secs = ack_timeout.as_secs(),
        "Pager daemon started"
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    tracing::info!("Shutting down");

    cancel.cancel();
    let _ = listener.await;
    Ok(())
}
