//! Counting occurrences that precede a query window.
//!
//! The lifetime cap is positional: an occurrence's ordinal is its place in the
//! full sequence from the start date, so a window that opens late has to know
//! how many occurrences already happened. Daily and weekly kinds are counted in
//! closed form; monthly walks month by month.

use chrono::{Datelike, NaiveDate};

use super::rule::{Rule, week_start, weekday_index};
use crate::model::RecurringPattern;

/// ## Summary
/// Counts non-excepted rule matches in `[pattern.start_date, cursor)`.
pub(crate) fn occurrences_before(pattern: &RecurringPattern, rule: &Rule<'_>, cursor: NaiveDate) -> usize {
    let start = pattern.start_date;
    if cursor <= start {
        return 0;
    }

    let matched = match *rule {
        Rule::Daily { frequency, .. } => daily_matches(start, cursor, frequency),
        Rule::Weekly { days } => weekly_matches(start, cursor, days, 1),
        Rule::Biweekly { days, .. } => weekly_matches(start, cursor, days, 2),
        Rule::Monthly { days } => monthly_matches(start, cursor, days),
    };

    let excepted = pattern
        .exceptions
        .range(start..cursor)
        .filter(|date| rule.matches(**date))
        .count();

    tracing::trace!(
        %cursor,
        matched,
        excepted,
        "Counted occurrences before window"
    );

    matched.saturating_sub(excepted)
}

fn days_between(from: NaiveDate, to: NaiveDate) -> u64 {
    u64::try_from(to.signed_duration_since(from).num_days()).unwrap_or(0)
}

fn to_count(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

fn to_u64(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

/// Multiples of `frequency` in `[0, span)`.
fn daily_matches(start: NaiveDate, cursor: NaiveDate, frequency: u32) -> usize {
    let span = days_between(start, cursor);
    to_count(span.div_ceil(u64::from(frequency)))
}

/// Matches in `[start, cursor)` for weekday sets repeating every `period` weeks.
///
/// Counts from the Sunday that opens the start week, then removes the days of
/// that first week that fall before the start date.
fn weekly_matches(
    start: NaiveDate,
    cursor: NaiveDate,
    days: &std::collections::BTreeSet<u8>,
    period: u64,
) -> usize {
    let anchor = week_start(start);
    let per_week = to_u64(days.iter().filter(|day| **day <= 6).count());

    let total_days = days_between(anchor, cursor);
    let full_weeks = total_days / 7;
    let partial_days = total_days % 7;

    let active_full_weeks = full_weeks.div_ceil(period);
    let mut count = active_full_weeks * per_week;

    if full_weeks % period == 0 {
        count += matching_prefix(days, partial_days);
    }

    let lead_in = u64::from(weekday_index(start));
    to_count(count.saturating_sub(matching_prefix(days, lead_in)))
}

/// Weekdays in `[0, len)` (Sunday-based) that are in `days`.
fn matching_prefix(days: &std::collections::BTreeSet<u8>, len: u64) -> u64 {
    to_u64(days.iter().filter(|day| u64::from(**day) < len).count())
}

/// Matches in `[start, cursor)` for day-of-month sets.
fn monthly_matches(
    start: NaiveDate,
    cursor: NaiveDate,
    days: &std::collections::BTreeSet<u8>,
) -> usize {
    let mut count = 0;
    let (mut year, mut month) = (start.year(), start.month());

    while (year, month) <= (cursor.year(), cursor.month()) {
        count += days
            .iter()
            .filter_map(|day| NaiveDate::from_ymd_opt(year, month, u32::from(*day)))
            .filter(|date| *date >= start && *date < cursor)
            .count();

        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }

    count
}
