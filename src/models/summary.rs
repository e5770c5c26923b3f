// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aggregate totals and the output document written for the dashboard.

use crate::models::{AthleteProfile, TimeWindow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Running per-bucket totals for one athlete.
///
/// Durations are kept as total minutes and only formatted at the end, so
/// minute components carry into hours correctly.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityTotals {
    pub monthly_km: Vec<f64>,
    pub monthly_minutes: Vec<u64>,
    pub monthly_counts: Vec<u32>,
    pub daily_km: Vec<f64>,
    pub daily_minutes: Vec<u64>,
}

impl ActivityTotals {
    /// All-zero totals shaped for `window`.
    pub fn zeroed(window: &TimeWindow) -> Self {
        let months = window.months().len();
        let days = window.days_in_current_month() as usize;
        Self {
            monthly_km: vec![0.0; months],
            monthly_minutes: vec![0; months],
            monthly_counts: vec![0; months],
            daily_km: vec![0.0; days],
            daily_minutes: vec![0; days],
        }
    }

    pub fn add_to_month(&mut self, index: usize, km: f64, minutes: u64) {
        self.monthly_km[index] += km;
        self.monthly_minutes[index] += minutes;
        self.monthly_counts[index] += 1;
    }

    pub fn add_to_day(&mut self, index: usize, km: f64, minutes: u64) {
        self.daily_km[index] += km;
        self.daily_minutes[index] += minutes;
    }

    pub fn monthly_distances(&self) -> Vec<f64> {
        self.monthly_km.iter().copied().map(round2).collect()
    }

    pub fn monthly_durations(&self) -> Vec<String> {
        self.monthly_minutes.iter().copied().map(format_duration).collect()
    }

    pub fn daily_distances(&self) -> Vec<f64> {
        self.daily_km.iter().copied().map(round2).collect()
    }

    pub fn daily_durations(&self) -> Vec<String> {
        self.daily_minutes.iter().copied().map(format_duration).collect()
    }
}

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format total minutes as `H:MM` (no leading zero on hours).
pub fn format_duration(total_minutes: u64) -> String {
    format!("{}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// One athlete's entry in the output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteSummary {
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub display_name: String,
    /// Profile image URL
    pub profile: String,
    /// Kilometers per month bucket, oldest first
    pub monthly_distances: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_durations: Option<Vec<String>>,
    pub monthly_activity_counts: Vec<u32>,
    /// Kilometers per day of the current month
    pub daily_distance_km: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_durations: Option<Vec<String>>,
}

impl AthleteSummary {
    /// Assemble the rendered entry from profile and totals.
    pub fn new(
        key: &str,
        profile: &AthleteProfile,
        totals: &ActivityTotals,
        track_durations: bool,
    ) -> Self {
        Self {
            firstname: profile.firstname.clone().unwrap_or_default(),
            lastname: profile.lastname.clone().unwrap_or_default(),
            username: profile.username.clone().unwrap_or_default(),
            display_name: profile.display_name(key),
            profile: profile.profile_image().to_string(),
            monthly_distances: totals.monthly_distances(),
            monthly_durations: track_durations.then(|| totals.monthly_durations()),
            monthly_activity_counts: totals.monthly_counts.clone(),
            daily_distance_km: totals.daily_distances(),
            daily_durations: track_durations.then(|| totals.daily_durations()),
        }
    }
}

/// The JSON document consumed by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub athletes: BTreeMap<String, AthleteSummary>,
    /// Labels for the monthly arrays, oldest first
    pub month_names: Vec<String>,
    /// When this document was generated (RFC 3339)
    pub generated_at: String,
}
