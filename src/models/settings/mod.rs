// Settings module
// Offsets used to derive a meeting timeline from its anchor date

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Named offsets between timeline milestones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Days between the notice date and stage 1 opening
    pub notice_days: u32,
    /// Length of stage 1 in days
    pub stage1_days: u32,
    /// Length of stage 2 in days
    pub stage2_days: u32,
    /// Days between stage 1 closing and stage 2 opening
    pub stage_gap_days: u32,
    /// Runoff window inserted before stage 2 opens, in minutes
    pub runoff_minutes: u32,
    /// Length of the motion submission window in days
    pub motion_window_days: u32,
    /// Days between motions closing and the notice date
    pub motion_deadline_gap_days: u32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            notice_days: 14,
            stage1_days: 7,
            stage2_days: 5,
            stage_gap_days: 1,
            runoff_minutes: 2880,
            motion_window_days: 7,
            motion_deadline_gap_days: 7,
        }
    }
}

impl TimelineConfig {
    /// Build a config from form data attributes (`noticeDays`, `stage1Days`, ...).
    ///
    /// Missing attributes use the default. Present but non-numeric attributes
    /// also fall back to the default, with a warning.
    pub fn from_attributes(attributes: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str, default: u32| -> u32 {
            match attributes.get(key).map(|raw| raw.trim()) {
                None | Some("") => default,
                Some(raw) => raw.parse().unwrap_or_else(|_| {
                    log::warn!(
                        "Ignoring non-numeric timeline attribute {}={:?}, using {}",
                        key,
                        raw,
                        default
                    );
                    default
                }),
            }
        };

        Self {
            notice_days: read("noticeDays", defaults.notice_days),
            stage1_days: read("stage1Days", defaults.stage1_days),
            stage2_days: read("stage2Days", defaults.stage2_days),
            stage_gap_days: read("stageGapDays", defaults.stage_gap_days),
            runoff_minutes: read("runoffMinutes", defaults.runoff_minutes),
            motion_window_days: read("motionWindowDays", defaults.motion_window_days),
            motion_deadline_gap_days: read(
                "motionDeadlineGapDays",
                defaults.motion_deadline_gap_days,
            ),
        }
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
