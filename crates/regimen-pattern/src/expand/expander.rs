//! Day-by-day expansion of a pattern over a query window.

use chrono::{Days, Months, NaiveDate};

use super::count::occurrences_before;
use super::rule::Rule;
use crate::error::PatternResult;
use crate::model::RecurringPattern;
use regimen_core::constants::PREVIEW_HORIZON_DAYS;

/// ## Summary
/// Inclusive date bounds for an expansion, plus an optional result cap.
///
/// `max_results` limits a single call; the pattern's `max_occurrences` is a
/// separate lifetime cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionWindow {
    /// First date considered (inclusive).
    pub start: NaiveDate,
    /// Last date considered (inclusive).
    pub end: NaiveDate,
    /// Maximum number of dates returned by this call.
    pub max_results: Option<usize>,
}

impl ExpansionWindow {
    /// Creates an uncapped window over `[start, end]`.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            max_results: None,
        }
    }

    /// Sets the maximum number of dates returned.
    #[must_use]
    pub const fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    /// ## Summary
    /// The lookahead window used for previews: `from` through `from + 90 days`.
    #[must_use]
    pub fn preview(from: NaiveDate, count: usize) -> Self {
        let end = from
            .checked_add_days(Days::new(u64::from(PREVIEW_HORIZON_DAYS)))
            .unwrap_or(NaiveDate::MAX);
        Self::new(from, end).with_max_results(count)
    }

    /// ## Summary
    /// The window materialized when a pattern is regenerated as of `as_of`.
    ///
    /// Runs `horizon_months` past `as_of`, or to the pattern's end date when
    /// that comes first.
    #[must_use]
    pub fn regeneration(pattern: &RecurringPattern, as_of: NaiveDate, horizon_months: u32) -> Self {
        let horizon = as_of
            .checked_add_months(Months::new(horizon_months))
            .unwrap_or(NaiveDate::MAX);
        let end = pattern
            .end_date
            .map_or(horizon, |end_date| end_date.min(horizon));
        Self::new(as_of, end)
    }

    /// Number of days covered, zero when the window is inverted.
    #[must_use]
    pub fn len_days(&self) -> u64 {
        u64::try_from(self.end.signed_duration_since(self.start).num_days() + 1).unwrap_or(0)
    }
}

/// ## Summary
/// Computes the ordered dates on which `pattern` fires within `window`.
///
/// The scan starts at the later of the window start and the pattern start,
/// and stops at the earlier of the window end and the pattern end date.
/// Exceptions are skipped without consuming an occurrence. When the pattern
/// has a lifetime cap, occurrences that precede the window are counted first
/// so the cap holds across sequential windows.
///
/// ## Errors
/// Returns `PatternError::ConfigurationError` if the pattern is missing a
/// field its type requires (no days for weekly, biweekly or monthly, or a
/// zero daily frequency). Disabled patterns and a zero lifetime cap return
/// an empty list before that check.
///
/// ## Side Effects
/// None - repeated calls with the same inputs return the same dates.
pub fn expand(pattern: &RecurringPattern, window: &ExpansionWindow) -> PatternResult<Vec<NaiveDate>> {
    if !pattern.enabled {
        tracing::trace!(pattern = %pattern.name, "Pattern disabled, no occurrences");
        return Ok(Vec::new());
    }

    if pattern.max_occurrences == Some(0) || window.max_results == Some(0) {
        return Ok(Vec::new());
    }

    let rule = Rule::from_pattern(pattern)?;

    let cursor = window.start.max(pattern.start_date);
    let upper = pattern
        .end_date
        .map_or(window.end, |end_date| window.end.min(end_date));
    if cursor > upper {
        return Ok(Vec::new());
    }

    let remaining = pattern.max_occurrences.map(|max| {
        let budget = usize::try_from(max).unwrap_or(usize::MAX);
        budget.saturating_sub(occurrences_before(pattern, &rule, cursor))
    });
    if remaining == Some(0) {
        tracing::trace!(pattern = %pattern.name, "Lifetime cap reached before window");
        return Ok(Vec::new());
    }

    tracing::trace!(
        pattern = %pattern.name,
        pattern_type = %pattern.pattern_type(),
        %cursor,
        %upper,
        ?remaining,
        "Expanding pattern"
    );

    let mut dates = Vec::new();
    for current in cursor.iter_days().take_while(|day| *day <= upper) {
        if pattern.exceptions.contains(&current) || !rule.matches(current) {
            continue;
        }

        if remaining.is_some_and(|budget| dates.len() >= budget) {
            break;
        }
        dates.push(current);

        if window.max_results.is_some_and(|max| dates.len() >= max) {
            break;
        }
    }

    Ok(dates)
}

/// ## Summary
/// Returns up to `count` upcoming dates within 90 days of `from`.
///
/// Fewer than `count` dates is a normal result when the pattern fires rarely
/// or ends inside the lookahead.
///
/// ## Errors
/// Returns `PatternError::ConfigurationError` under the same conditions as [`expand`].
pub fn preview_next(
    pattern: &RecurringPattern,
    from: NaiveDate,
    count: usize,
) -> PatternResult<Vec<NaiveDate>> {
    expand(pattern, &ExpansionWindow::preview(from, count))
}
