// Timeline module
// Named milestones of a meeting schedule and the derived timeline

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::date::format_local;

/// A named milestone in a meeting schedule.
///
/// Variants are declared in derivation order, walking backward from the
/// stage 2 close (the anchor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelinePoint {
    Stage2Closes,
    Stage2Opens,
    Stage1Closes,
    Stage1Opens,
    NoticeDate,
    MotionsClosesAt,
    MotionsOpensAt,
    AmendmentsOpensAt,
    AmendmentsClosesAt,
}

impl TimelinePoint {
    pub const ALL: [TimelinePoint; 9] = [
        TimelinePoint::Stage2Closes,
        TimelinePoint::Stage2Opens,
        TimelinePoint::Stage1Closes,
        TimelinePoint::Stage1Opens,
        TimelinePoint::NoticeDate,
        TimelinePoint::MotionsClosesAt,
        TimelinePoint::MotionsOpensAt,
        TimelinePoint::AmendmentsOpensAt,
        TimelinePoint::AmendmentsClosesAt,
    ];

    /// The anchor every other point is derived from.
    pub const ANCHOR: TimelinePoint = TimelinePoint::Stage2Closes;

    pub fn name(&self) -> &'static str {
        match self {
            TimelinePoint::Stage2Closes => "stage2_closes",
            TimelinePoint::Stage2Opens => "stage2_opens",
            TimelinePoint::Stage1Closes => "stage1_closes",
            TimelinePoint::Stage1Opens => "stage1_opens",
            TimelinePoint::NoticeDate => "notice_date",
            TimelinePoint::MotionsClosesAt => "motions_closes_at",
            TimelinePoint::MotionsOpensAt => "motions_opens_at",
            TimelinePoint::AmendmentsOpensAt => "amendments_opens_at",
            TimelinePoint::AmendmentsClosesAt => "amendments_closes_at",
        }
    }

    /// Id of the meeting form field holding this point.
    pub fn field_id(&self) -> &'static str {
        match self {
            TimelinePoint::Stage2Closes => "closes_at_stage2",
            TimelinePoint::Stage2Opens => "opens_at_stage2",
            TimelinePoint::Stage1Closes => "closes_at_stage1",
            TimelinePoint::Stage1Opens => "opens_at_stage1",
            TimelinePoint::NoticeDate => "notice_date",
            TimelinePoint::MotionsClosesAt => "motions_closes_at",
            TimelinePoint::MotionsOpensAt => "motions_opens_at",
            TimelinePoint::AmendmentsOpensAt => "amendments_opens_at",
            TimelinePoint::AmendmentsClosesAt => "amendments_closes_at",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimelinePoint::Stage2Closes => "AGM Date",
            TimelinePoint::Stage2Opens => "Stage 2 Opens",
            TimelinePoint::Stage1Closes => "Stage 1 Closes",
            TimelinePoint::Stage1Opens => "Stage 1 Opens",
            TimelinePoint::NoticeDate => "Notice Date",
            TimelinePoint::MotionsClosesAt => "Motions Close",
            TimelinePoint::MotionsOpensAt => "Motions Open",
            TimelinePoint::AmendmentsOpensAt => "Amendments Open",
            TimelinePoint::AmendmentsClosesAt => "Amendments Close",
        }
    }
}

impl fmt::Display for TimelinePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimelinePoint {
    type Err = String;

    /// Accepts either the point name or the form field id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TimelinePoint::ALL
            .into_iter()
            .find(|point| point.name() == s || point.field_id() == s)
            .ok_or_else(|| format!("Unknown timeline point: {}", s))
    }
}

/// Value of one point in a derived timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Freshly derived from the anchor.
    Computed(NaiveDateTime),
    /// Existing field value left untouched.
    Preserved(String),
}

impl FieldValue {
    pub fn is_computed(&self) -> bool {
        matches!(self, FieldValue::Computed(_))
    }

    /// The string written to (or already held by) the form field.
    pub fn to_field_string(&self) -> String {
        match self {
            FieldValue::Computed(value) => format_local(*value),
            FieldValue::Preserved(value) => value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub point: TimelinePoint,
    pub value: FieldValue,
}

/// Result of a derivation: all nine points in derivation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub(crate) fn from_entries(entries: Vec<TimelineEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn get(&self, point: TimelinePoint) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|entry| entry.point == point)
            .map(|entry| &entry.value)
    }

    /// The computed timestamp for a point, if it was not preserved.
    pub fn computed(&self, point: TimelinePoint) -> Option<NaiveDateTime> {
        match self.get(point)? {
            FieldValue::Computed(value) => Some(*value),
            FieldValue::Preserved(_) => None,
        }
    }

    /// Field writes implied by this timeline, excluding the anchor itself.
    pub fn changes(&self) -> Vec<(TimelinePoint, String)> {
        self.entries
            .iter()
            .filter(|entry| entry.point != TimelinePoint::ANCHOR && entry.value.is_computed())
            .map(|entry| (entry.point, entry.value.to_field_string()))
            .collect()
    }

    pub fn to_field_values(&self) -> BTreeMap<TimelinePoint, String> {
        self.entries
            .iter()
            .map(|entry| (entry.point, entry.value.to_field_string()))
            .collect()
    }
}
