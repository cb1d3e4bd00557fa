//! Mapping of recurring patterns onto RFC 5545 recurrence rules.

use chrono::NaiveDate;
use rrule::{RRule, RRuleSet, Tz, Unvalidated};

use crate::error::{PatternError, PatternResult};
use crate::expand::rule::Rule;
use crate::model::{Recurrence, RecurringPattern};

const WEEKDAY_CODES: [&str; 7] = ["SU", "MO", "TU", "WE", "TH", "FR", "SA"];

/// ## Summary
/// Renders the RRULE body (without the `RRULE:` prefix) for a pattern.
///
/// The lifetime cap is not rendered as `COUNT`: RFC 5545 counts
/// before removing `EXDATE`s, while pattern exceptions never use up a slot.
///
/// ## Errors
/// Returns `PatternError::ConfigurationError` if the pattern lacks the fields
/// its type requires.
pub fn to_rrule_string(pattern: &RecurringPattern) -> PatternResult<String> {
    Rule::from_pattern(pattern)?;

    let mut parts = match &pattern.recurrence {
        Recurrence::Daily { frequency } => {
            vec!["FREQ=DAILY".to_string(), format!("INTERVAL={frequency}")]
        }
        Recurrence::Weekly { days_of_week } => vec![
            "FREQ=WEEKLY".to_string(),
            "WKST=SU".to_string(),
            format!("BYDAY={}", weekday_codes(days_of_week)?),
        ],
        Recurrence::Biweekly { days_of_week } => vec![
            "FREQ=WEEKLY".to_string(),
            "INTERVAL=2".to_string(),
            "WKST=SU".to_string(),
            format!("BYDAY={}", weekday_codes(days_of_week)?),
        ],
        Recurrence::Monthly { days_of_month } => vec![
            "FREQ=MONTHLY".to_string(),
            format!("BYMONTHDAY={}", month_days(days_of_month)?),
        ],
    };

    if let Some(end_date) = pattern.end_date {
        parts.push(format!("UNTIL={}T235959Z", end_date.format("%Y%m%d")));
    }

    Ok(parts.join(";"))
}

/// ## Summary
/// Builds a validated recurrence set for calendar export.
///
/// `DTSTART` is the start date at the pattern's time of day, in UTC; each
/// exception becomes an `EXDATE` at the same time.
///
/// ## Errors
/// Returns an error if the pattern is misconfigured or the `rrule` crate
/// rejects the generated rule.
pub fn to_rrule_set(pattern: &RecurringPattern) -> PatternResult<RRuleSet> {
    let rule_text = to_rrule_string(pattern)?;
    let rrule = rule_text
        .parse::<RRule<Unvalidated>>()
        .map_err(|err| PatternError::RRuleError(err.to_string()))?;

    let dt_start = at_pattern_time(pattern, pattern.start_date);
    let mut rrule_set = rrule
        .build(dt_start)
        .map_err(|err| PatternError::RRuleError(err.to_string()))?;

    if !pattern.exceptions.is_empty() {
        let exdates = pattern
            .exceptions
            .iter()
            .map(|date| at_pattern_time(pattern, *date))
            .collect();
        rrule_set = rrule_set.set_exdates(exdates);
    }

    tracing::trace!(rule = %rule_text, pattern = %pattern.name, "Built RRULE set");
    Ok(rrule_set)
}

fn at_pattern_time(pattern: &RecurringPattern, date: NaiveDate) -> chrono::DateTime<Tz> {
    date.and_time(pattern.time.as_naive())
        .and_utc()
        .with_timezone(&Tz::UTC)
}

fn weekday_codes(days: &std::collections::BTreeSet<u8>) -> PatternResult<String> {
    let codes: Vec<&str> = days
        .iter()
        .filter_map(|day| WEEKDAY_CODES.get(usize::from(*day)).copied())
        .collect();
    if codes.is_empty() {
        return Err(PatternError::ConfigurationError(
            "days_of_week has no value in 0-6".to_string(),
        ));
    }
    Ok(codes.join(","))
}

fn month_days(days: &std::collections::BTreeSet<u8>) -> PatternResult<String> {
    let values: Vec<String> = days
        .iter()
        .filter(|day| (1..=31).contains(*day))
        .map(u8::to_string)
        .collect();
    if values.is_empty() {
        return Err(PatternError::ConfigurationError(
            "days_of_month has no value in 1-31".to_string(),
        ));
    }
    Ok(values.join(","))
}
