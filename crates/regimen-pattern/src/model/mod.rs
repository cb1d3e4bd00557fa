//! Recurring pattern types.

mod pattern;
mod time_of_day;

pub use pattern::{ItemTemplate, PatternType, Recurrence, RecurringPattern};
pub use time_of_day::TimeOfDay;
