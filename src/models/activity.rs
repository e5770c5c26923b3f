// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava activity records and the policy deciding which ones count.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Summary activity as returned by the athlete activity list endpoint.
///
/// Every field is optional so that one odd record never poisons the list;
/// the aggregator drops records that lack what it needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Legacy activity type (Run, Walk, Hike, Ride, ...)
    #[serde(rename = "type", default)]
    pub activity_type: Option<String>,
    /// Newer, finer-grained sport type (TrailRun, GravelRide, ...)
    #[serde(default)]
    pub sport_type: Option<String>,
    /// Distance in meters
    #[serde(default)]
    pub distance: Option<f64>,
    /// Moving time in seconds
    #[serde(default)]
    pub moving_time: Option<u64>,
    /// Start time in the athlete's local timezone
    #[serde(default)]
    pub start_date_local: Option<String>,
}

impl ActivityRecord {
    /// The type label used for filtering: `type`, falling back to `sport_type`.
    pub fn type_label(&self) -> Option<&str> {
        self.activity_type
            .as_deref()
            .or(self.sport_type.as_deref())
    }
}

/// Which activities are aggregated, and whether durations are reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityPolicy {
    /// Accepted type labels (exact, case-sensitive match)
    pub accepted_types: BTreeSet<String>,
    /// Emit duration lists alongside distances
    pub track_durations: bool,
}

impl Default for ActivityPolicy {
    /// Leg-powered activities, with durations.
    fn default() -> Self {
        Self {
            accepted_types: ["Run", "Walk", "Hike"].into_iter().map(String::from).collect(),
            track_durations: true,
        }
    }
}

impl ActivityPolicy {
    pub fn accepts(&self, type_label: &str) -> bool {
        self.accepted_types.contains(type_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_label_prefers_legacy_type() {
        let record: ActivityRecord = serde_json::from_value(serde_json::json!({
            "type": "Run",
            "sport_type": "TrailRun",
            "distance": 1000.0,
            "moving_time": 300,
            "start_date_local": "2024-03-05T07:00:00Z"
        }))
        .unwrap();

        assert_eq!(record.type_label(), Some("Run"));
    }

    #[test]
    fn test_type_label_falls_back_to_sport_type() {
        let record: ActivityRecord =
            serde_json::from_value(serde_json::json!({ "sport_type": "Hike" })).unwrap();

        assert_eq!(record.type_label(), Some("Hike"));
        assert!(record.distance.is_none());
    }

    #[test]
    fn test_default_policy() {
        let policy = ActivityPolicy::default();
        assert!(policy.accepts("Walk"));
        assert!(!policy.accepts("Ride"));
        assert!(!policy.accepts("run"));
    }
}
