//! Athlete identity: configured credentials and the Strava profile.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-athlete entry of `STRAVA_REFRESH_TOKENS`.
#[derive(Clone, Deserialize)]
pub struct AthleteCredentials {
    /// Long-lived OAuth refresh token
    pub refresh_token: String,
}

impl fmt::Debug for AthleteCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AthleteCredentials")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Authenticated athlete profile from `GET /athlete`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AthleteProfile {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    /// Medium (62x62) profile picture URL
    #[serde(default)]
    pub profile_medium: Option<String>,
    /// Large (124x124) profile picture URL
    #[serde(default)]
    pub profile: Option<String>,
}

impl AthleteProfile {
    /// Profile picture, preferring the medium size, else empty.
    pub fn profile_image(&self) -> &str {
        [self.profile_medium.as_deref(), self.profile.as_deref()]
            .into_iter()
            .flatten()
            .find(|url| !url.is_empty())
            .unwrap_or("")
    }

    /// "First Last", or `fallback` when Strava gave no name.
    pub fn display_name(&self, fallback: &str) -> String {
        let name = format!(
            "{} {}",
            self.firstname.as_deref().unwrap_or(""),
            self.lastname.as_deref().unwrap_or("")
        );
        let name = name.trim();
        if name.is_empty() {
            fallback.to_string()
        } else {
            name.to_string()
        }
    }
}
