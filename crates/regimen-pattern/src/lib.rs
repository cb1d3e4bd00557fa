//! Recurring schedule patterns and their expansion into calendar dates.
//!
//! A [`RecurringPattern`] describes when an item (a supplement, a habit, a
//! workout) repeats. [`expand`] turns a pattern and a query window into the
//! ordered dates on which it fires; [`preview_next`] is the bounded lookahead
//! used before a pattern is saved.

extern crate self as regimen_pattern;

pub mod error;
pub mod expand;
pub mod ical;
pub mod model;
mod validation;

pub use error::{PatternError, PatternResult};
pub use expand::{ExpansionWindow, expand, preview_next};
pub use model::{ItemTemplate, PatternType, Recurrence, RecurringPattern, TimeOfDay};
