//! The recurring pattern entity.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::TimeOfDay;

/// Pattern kind, matching the `pattern_type` wire tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl PatternType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        }
    }
}

impl std::fmt::Display for PatternType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ## Summary
/// The recurrence rule of a pattern.
///
/// Each variant carries only the field that is meaningful for it, so a weekly
/// pattern cannot also carry a day-of-month list. Fields default to empty when
/// absent from the wire; the expander reports those as configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "pattern_type", rename_all = "snake_case")]
pub enum Recurrence {
    /// Every `frequency` days, counted from the start date.
    Daily {
        #[serde(default = "default_frequency")]
        frequency: u32,
    },
    /// On the listed weekdays (0 = Sunday).
    Weekly {
        #[serde(default)]
        days_of_week: BTreeSet<u8>,
    },
    /// On the listed weekdays of every other week, starting with the week
    /// that contains the start date.
    Biweekly {
        #[serde(default)]
        days_of_week: BTreeSet<u8>,
    },
    /// On the listed days of the month (1-31).
    Monthly {
        #[serde(default)]
        days_of_month: BTreeSet<u8>,
    },
}

const fn default_frequency() -> u32 {
    1
}

const fn default_enabled() -> bool {
    true
}

impl Recurrence {
    #[must_use]
    pub const fn pattern_type(&self) -> PatternType {
        match self {
            Self::Daily { .. } => PatternType::Daily,
            Self::Weekly { .. } => PatternType::Weekly,
            Self::Biweekly { .. } => PatternType::Biweekly,
            Self::Monthly { .. } => PatternType::Monthly,
        }
    }

    #[must_use]
    pub const fn daily(frequency: u32) -> Self {
        Self::Daily { frequency }
    }

    #[must_use]
    pub fn weekly(days: impl IntoIterator<Item = u8>) -> Self {
        Self::Weekly {
            days_of_week: days.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn biweekly(days: impl IntoIterator<Item = u8>) -> Self {
        Self::Biweekly {
            days_of_week: days.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn monthly(days: impl IntoIterator<Item = u8>) -> Self {
        Self::Monthly {
            days_of_month: days.into_iter().collect(),
        }
    }
}

/// Payload copied onto every materialized occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemTemplate {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// ## Summary
/// A user-defined recurrence of a scheduled item.
///
/// Patterns are plain values: editing one produces a new value and expansion
/// is recomputed from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringPattern {
    /// Assigned when the pattern is persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<uuid::Uuid>,
    pub name: String,
    #[serde(flatten)]
    pub recurrence: Recurrence,
    /// First date an occurrence may fall on (inclusive).
    pub start_date: NaiveDate,
    /// Last date an occurrence may fall on (inclusive).
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Dates excluded even when the rule selects them.
    #[serde(default)]
    pub exceptions: BTreeSet<NaiveDate>,
    /// Lifetime cap on occurrences, counted from `start_date`.
    #[serde(default)]
    pub max_occurrences: Option<u32>,
    #[serde(default)]
    pub time: TimeOfDay,
    #[serde(default)]
    pub item_template: ItemTemplate,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl RecurringPattern {
    /// Creates an enabled, unpersisted pattern with no end date, exceptions or cap.
    #[must_use]
    pub fn new(name: impl Into<String>, recurrence: Recurrence, start_date: NaiveDate) -> Self {
        Self {
            id: None,
            name: name.into(),
            recurrence,
            start_date,
            end_date: None,
            exceptions: BTreeSet::new(),
            max_occurrences: None,
            time: TimeOfDay::default(),
            item_template: ItemTemplate::default(),
            enabled: true,
        }
    }

    #[must_use]
    pub const fn pattern_type(&self) -> PatternType {
        self.recurrence.pattern_type()
    }

    #[must_use]
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    #[must_use]
    pub fn with_exception(mut self, date: NaiveDate) -> Self {
        self.exceptions.insert(date);
        self
    }

    #[must_use]
    pub fn with_max_occurrences(mut self, max: u32) -> Self {
        self.max_occurrences = Some(max);
        self
    }

    #[must_use]
    pub fn with_time(mut self, time: TimeOfDay) -> Self {
        self.time = time;
        self
    }

    #[must_use]
    pub fn with_item_template(mut self, item_template: ItemTemplate) -> Self {
        self.item_template = item_template;
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}
