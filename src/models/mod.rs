// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod athlete;
pub mod summary;
pub mod window;

pub use activity::{ActivityPolicy, ActivityRecord};
pub use athlete::{AthleteCredentials, AthleteProfile};
pub use summary::{ActivityTotals, AthleteSummary, OutputDocument};
pub use window::{MonthBucket, TimeWindow};
