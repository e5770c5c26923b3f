// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup into an immutable [`Config`] that is
//! passed explicitly to the rest of the pipeline.

use crate::models::{ActivityPolicy, AthleteCredentials};
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

/// Strava REST API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://www.strava.com/api/v3";
/// Strava OAuth token endpoint.
pub const DEFAULT_OAUTH_URL: &str = "https://www.strava.com/oauth/token";
/// Where the dashboard expects the document.
pub const DEFAULT_OUTPUT_PATH: &str = "data/athletes.json";
/// Largest page size the activity list endpoint accepts.
pub const MAX_PER_PAGE: u32 = 200;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Strava OAuth client ID (public)
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Athletes to process, keyed by login/display name
    pub athletes: BTreeMap<String, AthleteCredentials>,
    /// Which activities count and whether durations are tracked
    pub policy: ActivityPolicy,
    /// Also report the month after the current one
    pub include_next_month: bool,
    /// Output document location
    pub output_path: PathBuf,
    /// Page size for the activity list endpoint
    pub per_page: u32,
    /// Number of activity pages fetched per athlete
    pub max_pages: u32,
    /// Strava REST API base URL
    pub api_base_url: String,
    /// Strava OAuth token URL
    pub oauth_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let optional = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &'static str| optional(key).ok_or(ConfigError::Missing(key));

        let strava_client_id = required("STRAVA_CLIENT_ID")?;
        let strava_client_secret = required("STRAVA_CLIENT_SECRET")?;
        let athletes = parse_athletes(&required("STRAVA_REFRESH_TOKENS")?)?;

        let policy = ActivityPolicy {
            accepted_types: match optional("ACTIVITY_TYPES") {
                Some(raw) => parse_activity_types(&raw)?,
                None => ActivityPolicy::default().accepted_types,
            },
            track_durations: parse_bool(&lookup, "TRACK_DURATIONS", true)?,
        };

        let per_page = parse_u32(&lookup, "STRAVA_PER_PAGE", MAX_PER_PAGE)?.clamp(1, MAX_PER_PAGE);
        let max_pages = parse_u32(&lookup, "STRAVA_MAX_PAGES", 1)?.max(1);

        Ok(Self {
            strava_client_id,
            strava_client_secret,
            athletes,
            policy,
            include_next_month: parse_bool(&lookup, "INCLUDE_NEXT_MONTH", false)?,
            output_path: optional("OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
            per_page,
            max_pages,
            api_base_url: optional("STRAVA_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            oauth_url: optional("STRAVA_OAUTH_URL")
                .unwrap_or_else(|| DEFAULT_OAUTH_URL.to_string()),
        })
    }

    /// Config pointing at a test server, with no athletes.
    pub fn test_default(base_url: &str) -> Self {
        Self {
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            athletes: BTreeMap::new(),
            policy: ActivityPolicy::default(),
            include_next_month: false,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            per_page: MAX_PER_PAGE,
            max_pages: 1,
            api_base_url: format!("{}/api/v3", base_url),
            oauth_url: format!("{}/oauth/token", base_url),
        }
    }
}

fn parse_athletes(raw: &str) -> Result<BTreeMap<String, AthleteCredentials>, ConfigError> {
    let athletes: BTreeMap<String, AthleteCredentials> = serde_json::from_str(raw)
        .map_err(|e| ConfigError::Invalid("STRAVA_REFRESH_TOKENS", e.to_string()))?;

    if let Some((key, _)) = athletes
        .iter()
        .find(|(_, creds)| creds.refresh_token.trim().is_empty())
    {
        return Err(ConfigError::Invalid(
            "STRAVA_REFRESH_TOKENS",
            format!("empty refresh_token for {}", key),
        ));
    }

    Ok(athletes)
}

fn parse_activity_types(raw: &str) -> Result<std::collections::BTreeSet<String>, ConfigError> {
    let types: std::collections::BTreeSet<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect();

    if types.is_empty() {
        return Err(ConfigError::Invalid(
            "ACTIVITY_TYPES",
            "no activity types listed".to_string(),
        ));
    }
    Ok(types)
}

fn parse_bool<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid(key, format!("not a boolean: {}", other))),
    }
}

fn parse_u32<F>(lookup: &F, key: &'static str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e: std::num::ParseIntError| ConfigError::Invalid(key, e.to_string())),
        _ => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
