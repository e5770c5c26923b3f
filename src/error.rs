// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Strava API error: {0}")]
    StravaApi(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Message used when Strava answers 429.
    pub const STRAVA_RATE_LIMIT: &'static str = "Rate limit exceeded";

    /// Message used when Strava answers 401.
    pub const STRAVA_TOKEN_ERROR: &'static str = "Invalid or expired token";

    /// Whether this error means the athlete's credentials are no longer usable.
    ///
    /// Covers 401s and the 400 `invalid` / `invalid_grant` answers Strava
    /// gives for a revoked refresh token.
    pub fn is_strava_token_error(&self) -> bool {
        match self {
            AppError::StravaApi(msg) => {
                msg == Self::STRAVA_TOKEN_ERROR || msg.to_ascii_lowercase().contains("invalid")
            }
            _ => false,
        }
    }

    /// Whether this error is a Strava rate limit response.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, AppError::StravaApi(msg) if msg == Self::STRAVA_RATE_LIMIT)
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;
