// Form binding service
// Applies derived deadlines to the fields of a meeting form

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::models::settings::TimelineConfig;
use crate::models::timeline::TimelinePoint;
use crate::services::timeline::{derive_timeline, FieldSource};

/// Writable form fields keyed by timeline point.
pub trait FormFields: FieldSource {
    fn set_field_value(&mut self, point: TimelinePoint, value: String);
}

impl<S: BuildHasher> FormFields for HashMap<TimelinePoint, String, S> {
    fn set_field_value(&mut self, point: TimelinePoint, value: String) {
        self.insert(point, value);
    }
}

impl FormFields for BTreeMap<TimelinePoint, String> {
    fn set_field_value(&mut self, point: TimelinePoint, value: String) {
        self.insert(point, value);
    }
}

/// Events the meeting form raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// The stage 2 closing field was edited; only blank fields are filled.
    AnchorChanged,
    /// The user asked to auto-fill every date and answered the overwrite prompt.
    AutoPopulate { confirmed: bool },
}

impl FormEvent {
    pub const CONFIRM_PROMPT: &'static str =
        "Auto fill all dates? This will overwrite any existing values.";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillOutcome {
    /// Nothing was written: no usable anchor, or the overwrite was declined.
    Skipped,
    Filled { written: Vec<TimelinePoint> },
}

impl FillOutcome {
    pub fn written(&self) -> &[TimelinePoint] {
        match self {
            FillOutcome::Skipped => &[],
            FillOutcome::Filled { written } => written,
        }
    }
}

/// Fills meeting form deadlines from the stage 2 closing field.
#[derive(Debug, Clone, Default)]
pub struct ScheduleAutofill {
    config: TimelineConfig,
}

impl ScheduleAutofill {
    pub fn new(config: TimelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn handle(&self, event: FormEvent, fields: &mut impl FormFields) -> FillOutcome {
        match event {
            FormEvent::AnchorChanged => self.fill(fields, false),
            FormEvent::AutoPopulate { confirmed: true } => self.fill(fields, true),
            FormEvent::AutoPopulate { confirmed: false } => {
                log::debug!("Auto-populate declined; leaving dates untouched");
                FillOutcome::Skipped
            }
        }
    }

    /// Derive the timeline and write it back. An invalid or missing anchor
    /// leaves every field unchanged.
    pub fn fill(&self, fields: &mut impl FormFields, force: bool) -> FillOutcome {
        let anchor = fields
            .field_value(TimelinePoint::ANCHOR)
            .unwrap_or_default();

        let timeline = match derive_timeline(&anchor, &self.config, &*fields, force) {
            Ok(timeline) => timeline,
            Err(err) => {
                log::debug!("Skipping deadline auto-fill: {}", err);
                return FillOutcome::Skipped;
            }
        };

        let mut written = Vec::new();
        for (point, value) in timeline.changes() {
            fields.set_field_value(point, value);
            written.push(point);
        }

        log::info!(
            "Auto-filled {} meeting dates from {} (force={})",
            written.len(),
            anchor.trim(),
            force
        );
        FillOutcome::Filled { written }
    }
}
