// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client.
//!
//! Handles:
//! - Access token refresh from a long-lived refresh token
//! - Athlete profile fetching
//! - Activity list fetching, tolerant of malformed payloads
//! - Rate limit and expired token detection

use crate::config::Config;
use crate::error::AppError;
use crate::models::{ActivityRecord, AthleteProfile};
use serde::Deserialize;

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    oauth_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a client for the given API and OAuth endpoints.
    pub fn with_urls(
        client_id: String,
        client_secret: String,
        base_url: &str,
        oauth_url: &str,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            oauth_url: oauth_url.to_string(),
            client_id,
            client_secret,
        }
    }

    /// Create a client from application configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::with_urls(
            config.strava_client_id.clone(),
            config.strava_client_secret.clone(),
            &config.api_base_url,
            &config.oauth_url,
        )
    }

    /// Exchange a refresh token for a short-lived access token.
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenRefreshResponse, AppError> {
        let response = self
            .http
            .post(&self.oauth_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(format!("Token refresh request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Get authenticated athlete profile.
    pub async fn get_athlete(&self, access_token: &str) -> Result<AthleteProfile, AppError> {
        let url = format!("{}/athlete", self.base_url);
        self.get_json(&url, access_token).await
    }

    /// List activities started after `after` (Unix timestamp), one page.
    ///
    /// A body that is not a JSON array yields no activities, and array
    /// elements that do not look like activities are skipped.
    pub async fn list_activities(
        &self,
        access_token: &str,
        after: i64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ActivityRecord>, AppError> {
        let url = format!("{}/athlete/activities", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[
                ("after", after.to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        let body: serde_json::Value = self.check_response_json(response).await?;
        Ok(records_from_value(body))
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("Strava rate limit hit (429)");
                return Err(AppError::StravaApi(AppError::STRAVA_RATE_LIMIT.to_string()));
            }

            if status.as_u16() == 401 {
                return Err(AppError::StravaApi(
                    AppError::STRAVA_TOKEN_ERROR.to_string(),
                ));
            }

            return Err(AppError::StravaApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::StravaApi(format!("JSON parse error: {}", e)))
    }
}

/// Turn an activity list payload into records, dropping anything unusable.
pub fn records_from_value(body: serde_json::Value) -> Vec<ActivityRecord> {
    let serde_json::Value::Array(items) = body else {
        tracing::warn!("Activity list response is not an array, treating as empty");
        return Vec::new();
    };

    let total = items.len();
    let records: Vec<ActivityRecord> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if records.len() < total {
        tracing::debug!(
            dropped = total - records.len(),
            "Skipped malformed activity list entries"
        );
    }
    records
}

/// Token refresh response from Strava.
///
/// Only the access token is read. Each run starts from the configured
/// refresh token, so a rotated one in the response is not kept. A response
/// without `access_token` is a failed refresh, not a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenRefreshResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}
