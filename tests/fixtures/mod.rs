// Test fixtures - reusable test data
// Provides consistent anchors and configs across all test files

#![allow(dead_code)]

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use meeting_timeline::{TimelineConfig, TimelinePoint};

/// Sample anchors for testing
pub mod anchors {
    /// AGM closing at midnight, end of June 2025
    pub const END_OF_JUNE_2025: &str = "2025-06-30T00:00";

    /// Evening AGM early in March 2024, so the chain crosses Feb 29
    pub const LEAP_YEAR_EVENING: &str = "2024-03-05T19:30";

    /// AGM in early January, so the chain crosses into the previous year
    pub const NEW_YEAR_2026: &str = "2026-01-10T12:00";
}

/// Sample configs for testing
pub mod configs {
    use super::*;

    /// Short notice period used by some deployments
    pub fn short_notice() -> TimelineConfig {
        TimelineConfig {
            notice_days: 3,
            ..TimelineConfig::default()
        }
    }

    /// Every offset zero: all points collapse onto the anchor
    pub fn all_zero() -> TimelineConfig {
        TimelineConfig {
            notice_days: 0,
            stage1_days: 0,
            stage2_days: 0,
            stage_gap_days: 0,
            runoff_minutes: 0,
            motion_window_days: 0,
            motion_deadline_gap_days: 0,
        }
    }
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

pub fn no_fields() -> HashMap<TimelinePoint, String> {
    HashMap::new()
}

pub fn fields(pairs: &[(TimelinePoint, &str)]) -> HashMap<TimelinePoint, String> {
    pairs
        .iter()
        .map(|(point, value)| (*point, value.to_string()))
        .collect()
}
