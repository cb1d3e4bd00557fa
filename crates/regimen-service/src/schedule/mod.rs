//! Materialization of recurring patterns into a concrete schedule.

mod occurrence;
mod repository;
mod service;

pub use occurrence::ScheduledOccurrence;
pub use repository::{InMemoryRepository, PatternRepository};
pub use service::{DeleteOutcome, PatternService};
