// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar buckets of interest for one run.
//!
//! The window is fixed from the wall clock at run start, never from the data.

use crate::time_utils::{days_in_month, shift_month};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

/// One calendar month bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    /// Midnight UTC on the first of the month
    pub start: DateTime<Utc>,
}

impl MonthBucket {
    fn new(year: i32, month: u32) -> Self {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
            .unwrap_or_default();
        Self { year, month, start }
    }

    pub fn contains(&self, year: i32, month: u32) -> bool {
        self.year == year && self.month == month
    }

    /// Human-readable label, e.g. "March 2024".
    pub fn label(&self) -> String {
        self.start.format("%B %Y").to_string()
    }

    pub fn days(&self) -> u32 {
        days_in_month(self.year, self.month)
    }
}

/// Ordered month buckets (oldest first) plus the current month's day count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    months: Vec<MonthBucket>,
    current: usize,
}

impl TimeWindow {
    /// Previous and current month, optionally followed by the next month.
    pub fn derive(now: DateTime<Utc>, include_next_month: bool) -> Self {
        let (year, month) = (now.year(), now.month());
        let last = if include_next_month { 1 } else { 0 };

        let months = (-1..=last)
            .map(|delta| {
                let (y, m) = shift_month(year, month, delta);
                MonthBucket::new(y, m)
            })
            .collect();

        Self { months, current: 1 }
    }

    pub fn months(&self) -> &[MonthBucket] {
        &self.months
    }

    pub fn current_month(&self) -> &MonthBucket {
        &self.months[self.current]
    }

    /// Position of the current month within [`Self::months`].
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn days_in_current_month(&self) -> u32 {
        self.current_month().days()
    }

    /// Index of the month bucket holding (year, month), if any.
    pub fn month_index(&self, year: i32, month: u32) -> Option<usize> {
        self.months.iter().position(|b| b.contains(year, month))
    }

    /// Unix timestamp for the activity list `after` filter.
    pub fn after_timestamp(&self) -> i64 {
        self.months[0].start.timestamp()
    }

    pub fn labels(&self) -> Vec<String> {
        self.months.iter().map(MonthBucket::label).collect()
    }
}
