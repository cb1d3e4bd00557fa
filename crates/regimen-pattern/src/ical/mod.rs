//! iCalendar (RFC 5545) interop for recurring patterns.

mod export;

pub use export::{to_rrule_set, to_rrule_string};
