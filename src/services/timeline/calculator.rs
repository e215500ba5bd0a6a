// Deadline calculator
// Walks back from the stage 2 close through the configured offsets

use std::collections::BTreeMap;

use chrono::{Days, Duration, NaiveDateTime};

use super::{FieldSource, TimelineError};
use crate::models::settings::TimelineConfig;
use crate::models::timeline::{FieldValue, Timeline, TimelineEntry, TimelinePoint};
use crate::utils::date::parse_local;

/// Amendments close this many days before stage 1 opens, regardless of config.
pub const AMENDMENT_CLOSE_LEAD_DAYS: u32 = 7;

/// How a point is derived: `base - days - minutes`.
struct Offset {
    base: TimelinePoint,
    days: u32,
    minutes: u32,
}

fn offset_for(point: TimelinePoint, config: &TimelineConfig) -> Offset {
    let (base, days, minutes) = match point {
        TimelinePoint::Stage2Closes => (TimelinePoint::Stage2Closes, 0, 0),
        TimelinePoint::Stage2Opens => (TimelinePoint::Stage2Closes, config.stage2_days, 0),
        TimelinePoint::Stage1Closes => (
            TimelinePoint::Stage2Opens,
            config.stage_gap_days,
            config.runoff_minutes,
        ),
        TimelinePoint::Stage1Opens => (TimelinePoint::Stage1Closes, config.stage1_days, 0),
        TimelinePoint::NoticeDate => (TimelinePoint::Stage1Opens, config.notice_days, 0),
        TimelinePoint::MotionsClosesAt => {
            (TimelinePoint::NoticeDate, config.motion_deadline_gap_days, 0)
        }
        TimelinePoint::MotionsOpensAt => {
            (TimelinePoint::MotionsClosesAt, config.motion_window_days, 0)
        }
        TimelinePoint::AmendmentsOpensAt => (TimelinePoint::NoticeDate, 0, 0),
        TimelinePoint::AmendmentsClosesAt => {
            (TimelinePoint::Stage1Opens, AMENDMENT_CLOSE_LEAD_DAYS, 0)
        }
    };

    Offset {
        base,
        days,
        minutes,
    }
}

fn step_back(from: NaiveDateTime, offset: &Offset) -> Option<NaiveDateTime> {
    from.checked_sub_days(Days::new(u64::from(offset.days)))?
        .checked_sub_signed(Duration::minutes(i64::from(offset.minutes)))
}

/// Derive every timeline point from the stage 2 closing time.
///
/// Each computed point replaces the existing value only when `force` is set
/// or the existing value is blank. Preserved values never feed later steps:
/// every point is derived from the computed value of its base point.
pub fn derive_timeline(
    anchor: &str,
    config: &TimelineConfig,
    existing: &impl FieldSource,
    force: bool,
) -> Result<Timeline, TimelineError> {
    let anchor_at =
        parse_local(anchor).ok_or_else(|| TimelineError::InvalidAnchor(anchor.to_string()))?;

    let mut computed = BTreeMap::new();
    computed.insert(TimelinePoint::ANCHOR, anchor_at);

    let mut entries = Vec::with_capacity(TimelinePoint::ALL.len());
    entries.push(TimelineEntry {
        point: TimelinePoint::ANCHOR,
        value: FieldValue::Computed(anchor_at),
    });

    for point in TimelinePoint::ALL.into_iter().skip(1) {
        let offset = offset_for(point, config);
        let base = computed[&offset.base];
        let value = step_back(base, &offset).ok_or(TimelineError::OutOfRange(point))?;
        computed.insert(point, value);

        let value = if force || existing.is_blank(point) {
            FieldValue::Computed(value)
        } else {
            FieldValue::Preserved(existing.field_value(point).unwrap_or_default())
        };
        entries.push(TimelineEntry { point, value });
    }

    log::debug!(
        "Derived timeline from {} (force={}): {} of {} points computed",
        anchor_at,
        force,
        entries.iter().filter(|e| e.value.is_computed()).count(),
        entries.len()
    );

    Ok(Timeline::from_entries(entries))
}
