use chrono::NaiveDate;
use regimen_pattern::{ItemTemplate, RecurringPattern, TimeOfDay};
use serde::{Deserialize, Serialize};

/// A single dated schedule entry produced from a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledOccurrence {
    pub id: uuid::Uuid,
    pub pattern_id: uuid::Uuid,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub item: ItemTemplate,
}

impl ScheduledOccurrence {
    /// ## Summary
    /// Materializes the occurrence of `pattern` on `date`.
    ///
    /// The id is derived from the pattern id and the date, so regenerating the
    /// same pattern yields the same ids.
    #[must_use]
    pub fn materialize(pattern_id: uuid::Uuid, pattern: &RecurringPattern, date: NaiveDate) -> Self {
        Self {
            id: uuid::Uuid::new_v5(&pattern_id, date.to_string().as_bytes()),
            pattern_id,
            date,
            time: pattern.time,
            item: pattern.item_template.clone(),
        }
    }
}
