// Schedule validation
// Cross-field checks on a submitted meeting schedule

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime};
use thiserror::Error;

use super::FieldSource;
use crate::models::settings::TimelineConfig;
use crate::models::timeline::{Timeline, TimelinePoint};
use crate::utils::date::parse_local;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleIssueKind {
    #[error("{0:?} is not a valid date/time.")]
    Unparseable(String),
    #[error("Stage 1 must open in the future.")]
    Stage1NotInFuture,
    #[error("Stage 1 must open at least {0} days after notice.")]
    NoticePeriodTooShort(u32),
    #[error("Stage 2 must open after Stage 1 opens.")]
    Stage2OpensBeforeStage1,
    #[error("Stage 1 must remain open for at least {0} days.")]
    Stage1TooShort(u32),
    #[error("Motion close must be after it opens.")]
    MotionWindowInverted,
    #[error("Amendment close must be after it opens.")]
    AmendmentWindowInverted,
    #[error("Stage 2 must remain open for at least {0} days.")]
    Stage2TooShort(u32),
    #[error("Stage 2 must open at least {0} days after Stage 1 closes.")]
    StageGapTooShort(u32),
}

/// A problem with one field of a submitted schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {kind}", .point.label())]
pub struct ScheduleIssue {
    pub point: TimelinePoint,
    pub kind: ScheduleIssueKind,
}

impl ScheduleIssue {
    fn new(point: TimelinePoint, kind: ScheduleIssueKind) -> Self {
        Self { point, kind }
    }
}

/// A submitted schedule; any point may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    points: BTreeMap<TimelinePoint, NaiveDateTime>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, point: TimelinePoint, value: NaiveDateTime) -> Self {
        self.points.insert(point, value);
        self
    }

    pub fn get(&self, point: TimelinePoint) -> Option<NaiveDateTime> {
        self.points.get(&point).copied()
    }

    /// Parse every non-blank field, reporting values that are not dates.
    pub fn from_fields(source: &impl FieldSource) -> (Self, Vec<ScheduleIssue>) {
        let mut schedule = Self::new();
        let mut issues = Vec::new();

        for point in TimelinePoint::ALL {
            let Some(raw) = source.field_value(point) else {
                continue;
            };
            if raw.trim().is_empty() {
                continue;
            }
            match parse_local(&raw) {
                Some(value) => {
                    schedule.points.insert(point, value);
                }
                None => issues.push(ScheduleIssue::new(
                    point,
                    ScheduleIssueKind::Unparseable(raw),
                )),
            }
        }

        (schedule, issues)
    }

    /// Schedule holding the values a derived timeline leaves in the form.
    pub fn from_timeline(timeline: &Timeline) -> (Self, Vec<ScheduleIssue>) {
        Self::from_fields(&timeline.to_field_values())
    }
}

fn days(n: u32) -> Duration {
    Duration::days(i64::from(n))
}

/// Cross-field checks applied to a schedule before it is saved.
///
/// A rule only runs when both of its points are present.
pub fn validate_schedule(
    schedule: &Schedule,
    config: &TimelineConfig,
    now: NaiveDateTime,
) -> Vec<ScheduleIssue> {
    use ScheduleIssueKind::*;
    use TimelinePoint::*;

    let mut issues = Vec::new();
    let pair = |a: TimelinePoint, b: TimelinePoint| -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((schedule.get(a)?, schedule.get(b)?))
    };

    if let Some(opens) = schedule.get(Stage1Opens) {
        if opens <= now {
            issues.push(ScheduleIssue::new(Stage1Opens, Stage1NotInFuture));
        }
    }

    if let Some((notice, opens)) = pair(NoticeDate, Stage1Opens) {
        if opens - notice < days(config.notice_days) {
            issues.push(ScheduleIssue::new(
                Stage1Opens,
                NoticePeriodTooShort(config.notice_days),
            ));
        }
    }

    if let Some((stage1, stage2)) = pair(Stage1Opens, Stage2Opens) {
        if stage2 <= stage1 {
            issues.push(ScheduleIssue::new(Stage2Opens, Stage2OpensBeforeStage1));
        }
    }

    if let Some((opens, closes)) = pair(Stage1Opens, Stage1Closes) {
        if closes - opens < days(config.stage1_days) {
            issues.push(ScheduleIssue::new(
                Stage1Closes,
                Stage1TooShort(config.stage1_days),
            ));
        }
    }

    if let Some((opens, closes)) = pair(MotionsOpensAt, MotionsClosesAt) {
        if closes <= opens {
            issues.push(ScheduleIssue::new(MotionsClosesAt, MotionWindowInverted));
        }
    }

    if let Some((opens, closes)) = pair(AmendmentsOpensAt, AmendmentsClosesAt) {
        if closes <= opens {
            issues.push(ScheduleIssue::new(AmendmentsClosesAt, AmendmentWindowInverted));
        }
    }

    if let Some((opens, closes)) = pair(Stage2Opens, Stage2Closes) {
        if closes - opens < days(config.stage2_days) {
            issues.push(ScheduleIssue::new(
                Stage2Closes,
                Stage2TooShort(config.stage2_days),
            ));
        }
    }

    if let Some((stage1_closes, stage2_opens)) = pair(Stage1Closes, Stage2Opens) {
        if stage2_opens - stage1_closes < days(config.stage_gap_days) {
            issues.push(ScheduleIssue::new(
                Stage2Opens,
                StageGapTooShort(config.stage_gap_days),
            ));
        }
    }

    issues
}

/// Parse and validate raw field values in one pass.
pub fn validate_fields(
    source: &impl FieldSource,
    config: &TimelineConfig,
    now: NaiveDateTime,
) -> Vec<ScheduleIssue> {
    let (schedule, mut issues) = Schedule::from_fields(source);
    issues.extend(validate_schedule(&schedule, config, now));
    issues
}
