//! Construction-time validation of recurring patterns.

use crate::error::{PatternError, PatternResult};
use crate::model::{Recurrence, RecurringPattern};

const MAX_DAY_OF_WEEK: u8 = 6;
const MAX_DAY_OF_MONTH: u8 = 31;

impl RecurringPattern {
    /// ## Summary
    /// Checks every field against the pattern invariants.
    ///
    /// All problems are collected into a single message so a form can show
    /// them together. `max_occurrences = 0` is accepted: it describes an
    /// exhausted pattern.
    ///
    /// ## Errors
    /// Returns `PatternError::ValidationError` listing each violated invariant.
    pub fn validate(&self) -> PatternResult<()> {
        let mut problems = Vec::new();

        if self.name.trim().is_empty() {
            problems.push("name must not be empty".to_string());
        }

        match &self.recurrence {
            Recurrence::Daily { frequency } => {
                if *frequency == 0 {
                    problems.push("frequency must be at least 1".to_string());
                }
            }
            Recurrence::Weekly { days_of_week } | Recurrence::Biweekly { days_of_week } => {
                if days_of_week.is_empty() {
                    problems.push("days_of_week must not be empty".to_string());
                }
                if let Some(day) = days_of_week.iter().find(|day| **day > MAX_DAY_OF_WEEK) {
                    problems.push(format!("days_of_week value {day} is outside 0-6"));
                }
            }
            Recurrence::Monthly { days_of_month } => {
                if days_of_month.is_empty() {
                    problems.push("days_of_month must not be empty".to_string());
                }
                if let Some(day) = days_of_month
                    .iter()
                    .find(|day| **day == 0 || **day > MAX_DAY_OF_MONTH)
                {
                    problems.push(format!("days_of_month value {day} is outside 1-31"));
                }
            }
        }

        if let Some(end_date) = self.end_date
            && end_date < self.start_date
        {
            problems.push(format!(
                "end_date {end_date} is before start_date {}",
                self.start_date
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            tracing::debug!(
                pattern = %self.name,
                problem_count = problems.len(),
                "Pattern failed validation"
            );
            Err(PatternError::ValidationError(problems.join("; ")))
        }
    }
}
