// Timeline service module
// Derives meeting deadlines from an anchor date and validates full schedules

mod calculator;
mod validation;

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use thiserror::Error;

use crate::models::timeline::TimelinePoint;

pub use calculator::{derive_timeline, AMENDMENT_CLOSE_LEAD_DAYS};
pub use validation::{validate_fields, validate_schedule, Schedule, ScheduleIssue, ScheduleIssueKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimelineError {
    #[error("anchor {0:?} is not a valid date/time")]
    InvalidAnchor(String),
    #[error("{0} falls outside the supported calendar range")]
    OutOfRange(TimelinePoint),
}

/// Read access to the current value of each timeline field.
pub trait FieldSource {
    fn field_value(&self, point: TimelinePoint) -> Option<String>;

    /// Absent and blank values both count as empty.
    fn is_blank(&self, point: TimelinePoint) -> bool {
        self.field_value(point)
            .map_or(true, |value| value.trim().is_empty())
    }
}

impl<S: BuildHasher> FieldSource for HashMap<TimelinePoint, String, S> {
    fn field_value(&self, point: TimelinePoint) -> Option<String> {
        self.get(&point).cloned()
    }
}

impl FieldSource for BTreeMap<TimelinePoint, String> {
    fn field_value(&self, point: TimelinePoint) -> Option<String> {
        self.get(&point).cloned()
    }
}
