// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava monthly challenge: per-athlete distance and time totals
//!
//! This crate fetches each configured athlete's recent Strava activities,
//! buckets them into monthly and daily totals, and writes one JSON document
//! for the challenge dashboard.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

use chrono::{DateTime, Utc};
use config::Config;
use models::OutputDocument;
use services::{ChallengeProcessor, StravaClient};

/// Run the whole pipeline with the window fixed at `now` and write the result.
pub async fn run(config: &Config, now: DateTime<Utc>) -> error::Result<OutputDocument> {
    let processor = ChallengeProcessor::new(StravaClient::from_config(config), config, now);
    let document = processor.run(now).await;
    services::write_document(&config.output_path, &document)?;
    Ok(document)
}
