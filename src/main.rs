// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava Monthly Challenge fetcher
//!
//! Refreshes each configured athlete's Strava token, aggregates their
//! recent activities and writes the dashboard's JSON document.

use anyhow::Context;
use strava_challenge::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment; nothing touches the network before this
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        athletes = config.athletes.len(),
        activity_types = ?config.policy.accepted_types,
        output = %config.output_path.display(),
        "Starting Strava challenge fetch"
    );

    let document = strava_challenge::run(&config, chrono::Utc::now())
        .await
        .context("Failed to produce output document")?;

    tracing::info!(
        athletes = document.athletes.len(),
        months = ?document.month_names,
        "Strava data fetch complete"
    );
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("strava_challenge=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
