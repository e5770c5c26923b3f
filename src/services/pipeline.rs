// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-athlete processing pipeline.
//!
//! Handles the core workflow for each configured athlete, one at a time:
//! 1. Refresh the access token (skip the athlete on failure)
//! 2. Fetch the athlete profile (empty profile on failure)
//! 3. Fetch activities for the time window (empty list on failure)
//! 4. Aggregate into monthly/daily buckets
//! 5. Fold the outcome into the output document

use crate::config::Config;
use crate::models::{
    ActivityRecord, AthleteCredentials, AthleteProfile, AthleteSummary, OutputDocument, TimeWindow,
};
use crate::services::aggregator::ActivityAggregator;
use crate::services::StravaClient;
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Result of running the pipeline for one athlete.
#[derive(Debug, Clone, PartialEq)]
pub enum AthleteOutcome {
    Processed(AthleteSummary),
    Skipped { reason: String },
}

/// Runs the fetch-and-aggregate pipeline for every configured athlete.
pub struct ChallengeProcessor<'a> {
    strava: StravaClient,
    config: &'a Config,
    window: TimeWindow,
}

impl<'a> ChallengeProcessor<'a> {
    /// Build a processor whose window is fixed from `now`.
    pub fn new(strava: StravaClient, config: &'a Config, now: DateTime<Utc>) -> Self {
        Self {
            strava,
            config,
            window: TimeWindow::derive(now, config.include_next_month),
        }
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// Process all athletes sequentially and assemble the output document.
    pub async fn run(&self, generated_at: DateTime<Utc>) -> OutputDocument {
        let mut athletes = BTreeMap::new();

        for (key, creds) in &self.config.athletes {
            match self.process_athlete(key, creds).await {
                AthleteOutcome::Processed(summary) => {
                    athletes.insert(key.clone(), summary);
                }
                AthleteOutcome::Skipped { reason } => {
                    tracing::warn!(athlete = %key, reason = %reason, "Skipping athlete");
                }
            }
        }

        tracing::info!(
            processed = athletes.len(),
            configured = self.config.athletes.len(),
            "Athlete processing complete"
        );

        OutputDocument {
            athletes,
            month_names: self.window.labels(),
            generated_at: format_utc_rfc3339(generated_at),
        }
    }

    /// Run the pipeline for a single athlete.
    pub async fn process_athlete(&self, key: &str, creds: &AthleteCredentials) -> AthleteOutcome {
        tracing::info!(athlete = %key, "Processing athlete");

        let access_token = match self.strava.refresh_token(&creds.refresh_token).await {
            Ok(resp) => match resp.access_token.filter(|t| !t.is_empty()) {
                Some(token) => token,
                None => {
                    return AthleteOutcome::Skipped {
                        reason: "token refresh returned no access token".to_string(),
                    }
                }
            },
            Err(e) => {
                let reason = if e.is_rate_limited() {
                    "rate limited during token refresh".to_string()
                } else if e.is_strava_token_error() {
                    format!("refresh token revoked or expired: {}", e)
                } else {
                    format!("token refresh failed: {}", e)
                };
                return AthleteOutcome::Skipped { reason };
            }
        };

        let profile = match self.strava.get_athlete(&access_token).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(athlete = %key, error = %e, "Profile fetch failed, continuing without it");
                AthleteProfile::default()
            }
        };

        let activities = self.fetch_activities(key, &access_token).await;

        let (totals, stats) =
            ActivityAggregator::new(&self.window, &self.config.policy).aggregate(&activities);

        tracing::debug!(
            athlete = %key,
            fetched = activities.len(),
            accepted = stats.accepted,
            wrong_type = stats.wrong_type,
            malformed = stats.malformed,
            outside_window = stats.outside_window,
            "Aggregated activities"
        );

        AthleteOutcome::Processed(AthleteSummary::new(
            key,
            &profile,
            &totals,
            self.config.policy.track_durations,
        ))
    }

    /// Fetch up to `max_pages` pages of activities covering the window.
    ///
    /// A failed page ends fetching; what was already fetched is kept.
    async fn fetch_activities(&self, key: &str, access_token: &str) -> Vec<ActivityRecord> {
        let after = self.window.after_timestamp();
        let mut activities = Vec::new();

        for page in 1..=self.config.max_pages {
            let batch = match self
                .strava
                .list_activities(access_token, after, page, self.config.per_page)
                .await
            {
                Ok(batch) => batch,
                Err(e) => {
                    tracing::warn!(athlete = %key, page, error = %e, "Activity fetch failed, treating as empty");
                    break;
                }
            };

            let short_page = (batch.len() as u32) < self.config.per_page;
            activities.extend(batch);
            if short_page {
                break;
            }
        }

        activities
    }
}
