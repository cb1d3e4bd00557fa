pub mod error;
pub mod schedule;
