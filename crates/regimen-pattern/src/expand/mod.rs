//! Expansion of recurring patterns into calendar dates.
//!
//! Expansion is a pure computation over a pattern value and a date window. It
//! keeps no state between calls, so previews and schedule materialization share
//! the same results for the same inputs.

mod count;
mod expander;
pub(crate) mod rule;

pub use expander::{ExpansionWindow, expand, preview_next};
