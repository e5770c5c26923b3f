// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use strava_challenge::config::Config;
use strava_challenge::models::AthleteCredentials;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fixed run instant used across tests: mid-March 2024.
#[allow(dead_code)]
pub fn march_15_2024() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

/// Config pointed at the mock server with the given (key, refresh token) pairs.
#[allow(dead_code)]
pub fn test_config(server: &MockServer, athletes: &[(&str, &str)]) -> Config {
    let mut config = Config::test_default(&server.uri());
    for (key, refresh_token) in athletes {
        config.athletes.insert(
            key.to_string(),
            AthleteCredentials {
                refresh_token: refresh_token.to_string(),
            },
        );
    }
    config
}

/// Mock the OAuth refresh for one refresh token.
#[allow(dead_code)]
pub async fn mock_token(server: &MockServer, refresh_token: &str, body: Value) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains(format!("refresh_token={}", refresh_token)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mock the profile endpoint for one access token.
#[allow(dead_code)]
pub async fn mock_profile(server: &MockServer, access_token: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/v3/athlete"))
        .and(header("authorization", format!("Bearer {}", access_token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mock the activity list endpoint for one access token.
#[allow(dead_code)]
pub async fn mock_activities(server: &MockServer, access_token: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .and(header("authorization", format!("Bearer {}", access_token).as_str()))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// A Strava-shaped summary activity.
#[allow(dead_code)]
pub fn activity(kind: &str, meters: f64, seconds: u64, start_local: &str) -> Value {
    json!({
        "id": 1,
        "name": "Morning Activity",
        "type": kind,
        "sport_type": kind,
        "distance": meters,
        "moving_time": seconds,
        "elapsed_time": seconds + 120,
        "start_date": start_local,
        "start_date_local": start_local
    })
}

#[allow(dead_code)]
pub fn profile(first: &str, last: &str) -> Value {
    json!({
        "id": 42,
        "username": first.to_lowercase(),
        "firstname": first,
        "lastname": last,
        "profile_medium": format!("https://example.com/{}/medium.jpg", first),
        "profile": format!("https://example.com/{}/large.jpg", first)
    })
}
