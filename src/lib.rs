// Meeting Timeline Library
// Derives and validates the deadlines of a multi-stage meeting schedule

pub mod models;
pub mod services;
pub mod utils;

pub use models::settings::TimelineConfig;
pub use models::timeline::{FieldValue, Timeline, TimelineEntry, TimelinePoint};
pub use services::form::{FillOutcome, FormEvent, FormFields, ScheduleAutofill};
pub use services::timeline::{derive_timeline, FieldSource, TimelineError};
