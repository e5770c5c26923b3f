// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod aggregator;
pub mod output;
pub mod pipeline;
pub mod strava;

pub use aggregator::{ActivityAggregator, AggregationStats};
pub use output::write_document;
pub use pipeline::{AthleteOutcome, ChallengeProcessor};
pub use strava::StravaClient;
