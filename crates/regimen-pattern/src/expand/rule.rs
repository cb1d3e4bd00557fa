//! Per-date rule matching for each recurrence kind.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{PatternError, PatternResult};
use crate::model::{Recurrence, RecurringPattern};

/// ## Summary
/// A recurrence rule resolved against its pattern's start date.
///
/// Building one checks that the fields required by the pattern type are
/// present, which is the only failure expansion can report.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Rule<'a> {
    Daily {
        start: NaiveDate,
        frequency: u32,
    },
    Weekly {
        days: &'a BTreeSet<u8>,
    },
    Biweekly {
        days: &'a BTreeSet<u8>,
        /// Sunday of the week containing the start date; its week is "on".
        anchor: NaiveDate,
    },
    Monthly {
        days: &'a BTreeSet<u8>,
    },
}

impl<'a> Rule<'a> {
    /// ## Errors
    /// Returns `PatternError::ConfigurationError` when a daily pattern has a
    /// zero frequency or a weekly, biweekly or monthly pattern has no days.
    pub(crate) fn from_pattern(pattern: &'a RecurringPattern) -> PatternResult<Self> {
        match &pattern.recurrence {
            Recurrence::Daily { frequency } => {
                if *frequency == 0 {
                    return Err(PatternError::ConfigurationError(
                        "daily pattern requires a positive frequency".to_string(),
                    ));
                }
                Ok(Self::Daily {
                    start: pattern.start_date,
                    frequency: *frequency,
                })
            }
            Recurrence::Weekly { days_of_week } => {
                require_days(days_of_week, "weekly", "days_of_week")?;
                Ok(Self::Weekly { days: days_of_week })
            }
            Recurrence::Biweekly { days_of_week } => {
                require_days(days_of_week, "biweekly", "days_of_week")?;
                Ok(Self::Biweekly {
                    days: days_of_week,
                    anchor: week_start(pattern.start_date),
                })
            }
            Recurrence::Monthly { days_of_month } => {
                require_days(days_of_month, "monthly", "days_of_month")?;
                Ok(Self::Monthly {
                    days: days_of_month,
                })
            }
        }
    }

    /// Whether the rule selects `date`. Dates before the pattern start are
    /// never passed in.
    pub(crate) fn matches(&self, date: NaiveDate) -> bool {
        match *self {
            Self::Daily { start, frequency } => {
                let elapsed = date.signed_duration_since(start).num_days();
                elapsed >= 0 && elapsed % i64::from(frequency) == 0
            }
            Self::Weekly { days } => days.contains(&weekday_index(date)),
            Self::Biweekly { days, anchor } => {
                days.contains(&weekday_index(date)) && week_offset(anchor, date) % 2 == 0
            }
            Self::Monthly { days } => days.contains(&day_of_month(date)),
        }
    }
}

fn require_days(days: &BTreeSet<u8>, kind: &str, field: &str) -> PatternResult<()> {
    if days.is_empty() {
        return Err(PatternError::ConfigurationError(format!(
            "{kind} pattern requires a non-empty {field}"
        )));
    }
    Ok(())
}

/// Day of week with 0 = Sunday.
pub(crate) fn weekday_index(date: NaiveDate) -> u8 {
    u8::try_from(date.weekday().num_days_from_sunday()).unwrap_or(u8::MAX)
}

fn day_of_month(date: NaiveDate) -> u8 {
    u8::try_from(date.day()).unwrap_or(u8::MAX)
}

/// Sunday on or before `date`.
pub(crate) fn week_start(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Whole weeks between the anchor Sunday and `date`.
fn week_offset(anchor: NaiveDate, date: NaiveDate) -> i64 {
    date.signed_duration_since(anchor).num_days().div_euclid(7)
}
