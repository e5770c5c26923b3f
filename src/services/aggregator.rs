// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity aggregation into monthly and daily buckets.
//!
//! Per-record problems (wrong type, bad timestamp, missing fields, outside
//! the window) drop that record only. They are counted, never raised.

use crate::models::{ActivityPolicy, ActivityRecord, ActivityTotals, TimeWindow};
use crate::time_utils::parse_local_timestamp;
use chrono::Datelike;

/// Why records were left out, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationStats {
    pub accepted: u32,
    pub wrong_type: u32,
    pub malformed: u32,
    pub outside_window: u32,
}

/// Buckets activities for a fixed window and type policy.
pub struct ActivityAggregator<'a> {
    window: &'a TimeWindow,
    policy: &'a ActivityPolicy,
}

impl<'a> ActivityAggregator<'a> {
    pub fn new(window: &'a TimeWindow, policy: &'a ActivityPolicy) -> Self {
        Self { window, policy }
    }

    /// Aggregate one athlete's activities.
    pub fn aggregate(&self, records: &[ActivityRecord]) -> (ActivityTotals, AggregationStats) {
        let mut totals = ActivityTotals::zeroed(self.window);
        let mut stats = AggregationStats::default();

        for record in records {
            match self.accumulate(&mut totals, record) {
                Outcome::Accepted => stats.accepted += 1,
                Outcome::WrongType => stats.wrong_type += 1,
                Outcome::Malformed => stats.malformed += 1,
                Outcome::OutsideWindow => stats.outside_window += 1,
            }
        }

        (totals, stats)
    }

    fn accumulate(&self, totals: &mut ActivityTotals, record: &ActivityRecord) -> Outcome {
        match record.type_label() {
            Some(label) if self.policy.accepts(label) => {}
            _ => return Outcome::WrongType,
        }

        let Some(start) = record
            .start_date_local
            .as_deref()
            .and_then(parse_local_timestamp)
        else {
            return Outcome::Malformed;
        };

        let (Some(meters), Some(seconds)) = (record.distance, record.moving_time) else {
            return Outcome::Malformed;
        };
        if !meters.is_finite() || meters < 0.0 {
            return Outcome::Malformed;
        }

        let Some(month_index) = self.window.month_index(start.year(), start.month()) else {
            return Outcome::OutsideWindow;
        };

        let km = meters / 1000.0;
        let minutes = seconds / 60;
        totals.add_to_month(month_index, km, minutes);

        if month_index == self.window.current_index() {
            let day_index = start.day() as usize - 1;
            if day_index < totals.daily_km.len() {
                totals.add_to_day(day_index, km, minutes);
            }
        }

        Outcome::Accepted
    }
}

enum Outcome {
    Accepted,
    WrongType,
    Malformed,
    OutsideWindow,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn march_2024() -> TimeWindow {
        TimeWindow::derive(Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(), false)
    }

    fn record(kind: &str, meters: f64, seconds: u64, start: &str) -> ActivityRecord {
        ActivityRecord {
            activity_type: Some(kind.to_string()),
            sport_type: None,
            distance: Some(meters),
            moving_time: Some(seconds),
            start_date_local: Some(start.to_string()),
        }
    }

    #[test]
    fn test_single_run_example() {
        let window = march_2024();
        let policy = ActivityPolicy::default();
        let records = vec![record("Run", 5000.0, 1800, "2024-03-05T07:00:00")];

        let (totals, stats) = ActivityAggregator::new(&window, &policy).aggregate(&records);

        assert_eq!(stats.accepted, 1);
        assert_eq!(totals.monthly_distances(), vec![0.0, 5.0]);
        assert_eq!(totals.daily_distances()[4], 5.0);
        assert_eq!(totals.daily_distances().iter().sum::<f64>(), 5.0);
        assert_eq!(totals.monthly_durations(), vec!["0:00", "0:30"]);
        assert_eq!(totals.daily_durations()[4], "0:30");
        assert_eq!(totals.daily_km.len(), 31);
    }

    #[test]
    fn test_minutes_carry_into_hours() {
        let window = march_2024();
        let policy = ActivityPolicy::default();
        let records = vec![
            record("Run", 1000.0, 45 * 60, "2024-03-10T07:00:00Z"),
            record("Walk", 1000.0, 30 * 60, "2024-03-10T18:00:00Z"),
        ];

        let (totals, _) = ActivityAggregator::new(&window, &policy).aggregate(&records);

        assert_eq!(totals.monthly_durations()[1], "1:15");
        assert_eq!(totals.daily_durations()[9], "1:15");
    }

    #[test]
    fn test_rejected_types_leave_everything_zero() {
        let window = march_2024();
        let policy = ActivityPolicy::default();
        let records = vec![
            record("Ride", 40000.0, 5400, "2024-03-02T07:00:00Z"),
            record("Swim", 1500.0, 1800, "2024-02-20T07:00:00Z"),
        ];

        let (totals, stats) = ActivityAggregator::new(&window, &policy).aggregate(&records);

        assert_eq!(stats.wrong_type, 2);
        assert_eq!(totals, ActivityTotals::zeroed(&window));
    }

    #[test]
    fn test_previous_month_only_hits_monthly_bucket() {
        let window = march_2024();
        let policy = ActivityPolicy::default();
        let records = vec![record("Hike", 12346.0, 7200, "2024-02-29T09:00:00Z")];

        let (totals, _) = ActivityAggregator::new(&window, &policy).aggregate(&records);

        assert_eq!(totals.monthly_distances(), vec![12.35, 0.0]);
        assert_eq!(totals.monthly_durations()[0], "2:00");
        assert!(totals.daily_km.iter().all(|d| *d == 0.0));
    }

    #[test]
    fn test_out_of_window_records_are_ignored() {
        let window = march_2024();
        let policy = ActivityPolicy::default();
        let records = vec![
            record("Run", 5000.0, 1800, "2024-01-31T07:00:00Z"),
            record("Run", 5000.0, 1800, "2024-04-01T07:00:00Z"),
        ];

        let (totals, stats) = ActivityAggregator::new(&window, &policy).aggregate(&records);

        assert_eq!(stats.outside_window, 2);
        assert_eq!(totals.monthly_distances(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_malformed_records_are_dropped() {
        let window = march_2024();
        let policy = ActivityPolicy::default();
        let mut missing_distance = record("Run", 0.0, 60, "2024-03-01T07:00:00Z");
        missing_distance.distance = None;
        let records = vec![
            record("Run", 5000.0, 1800, "not a date"),
            missing_distance,
            ActivityRecord::default(),
            record("Run", 3000.0, 900, "2024-03-01T07:00:00Z"),
        ];

        let (totals, stats) = ActivityAggregator::new(&window, &policy).aggregate(&records);

        assert_eq!(stats.malformed, 2);
        assert_eq!(stats.wrong_type, 1);
        assert_eq!(stats.accepted, 1);
        assert_eq!(totals.monthly_distances()[1], 3.0);
        assert_eq!(totals.daily_distances()[0], 3.0);
    }

    #[test]
    fn test_daily_sum_matches_current_month_total() {
        let window = march_2024();
        let policy = ActivityPolicy::default();
        let records: Vec<_> = (1..=31)
            .map(|day| {
                record(
                    "Run",
                    1000.0 + day as f64 * 137.7,
                    600 + day * 13,
                    &format!("2024-03-{:02}T06:30:00Z", day),
                )
            })
            .collect();

        let (totals, _) = ActivityAggregator::new(&window, &policy).aggregate(&records);

        let daily_sum: f64 = totals.daily_km.iter().sum();
        assert!((daily_sum - totals.monthly_km[1]).abs() < 0.005);
        assert_eq!(
            totals.daily_minutes.iter().sum::<u64>(),
            totals.monthly_minutes[1]
        );
        assert_eq!(totals.monthly_counts[1], 31);
    }

    #[test]
    fn test_policy_controls_accepted_types() {
        let window = march_2024();
        let policy = ActivityPolicy {
            accepted_types: ["Ride".to_string()].into_iter().collect(),
            track_durations: false,
        };
        let records = vec![
            record("Ride", 20000.0, 3600, "2024-03-03T07:00:00Z"),
            record("Run", 5000.0, 1800, "2024-03-03T07:00:00Z"),
        ];

        let (totals, stats) = ActivityAggregator::new(&window, &policy).aggregate(&records);

        assert_eq!(stats.accepted, 1);
        assert_eq!(totals.monthly_distances()[1], 20.0);
    }

    #[test]
    fn test_empty_input() {
        let window = march_2024();
        let policy = ActivityPolicy::default();

        let (totals, stats) = ActivityAggregator::new(&window, &policy).aggregate(&[]);

        assert_eq!(stats, AggregationStats::default());
        assert_eq!(totals.daily_durations()[0], "0:00");
        assert_eq!(totals, ActivityTotals::zeroed(&window));
    }
}
