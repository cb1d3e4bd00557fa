//! Pattern lifecycle and schedule regeneration.

use std::sync::Arc;

use chrono::NaiveDate;
use regimen_core::config::ScheduleConfig;
use regimen_pattern::{ExpansionWindow, RecurringPattern, expand, preview_next};
use serde::Serialize;
use uuid::Uuid;

use super::{PatternRepository, ScheduledOccurrence};
use crate::error::{ServiceError, ServiceResult};

/// Result of deleting a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    /// Materialized occurrences deleted along with the pattern.
    pub removed_occurrences: usize,
}

/// ## Summary
/// Owns the pattern library and the occurrences materialized from it.
///
/// Expansion itself is delegated to `regimen_pattern`; this layer decides which
/// window to expand and what to replace in the repository.
#[derive(Clone)]
pub struct PatternService {
    repository: Arc<dyn PatternRepository>,
    regenerate_horizon_months: u32,
}

impl PatternService {
    #[must_use]
    pub fn new(repository: Arc<dyn PatternRepository>, config: &ScheduleConfig) -> Self {
        Self {
            repository,
            regenerate_horizon_months: config.regenerate_horizon_months,
        }
    }

    /// ## Summary
    /// Validates and stores a new pattern under a fresh id.
    ///
    /// ## Errors
    /// Returns a validation error if the pattern is invalid, or a repository error.
    pub fn create(&self, mut pattern: RecurringPattern) -> ServiceResult<RecurringPattern> {
        pattern.validate()?;

        let id = Uuid::now_v7();
        pattern.id = Some(id);
        self.repository.insert_pattern(pattern.clone())?;

        tracing::info!(
            pattern_id = %id,
            pattern_type = %pattern.pattern_type(),
            name = %pattern.name,
            "Pattern created"
        );
        Ok(pattern)
    }

    /// ## Errors
    /// Returns `ServiceError::NotFound` if no pattern has this id.
    pub fn get(&self, id: Uuid) -> ServiceResult<RecurringPattern> {
        self.repository
            .get_pattern(id)?
            .ok_or_else(|| ServiceError::NotFound(format!("pattern {id}")))
    }

    /// ## Errors
    /// Returns an error if the repository is unavailable.
    pub fn list(&self) -> ServiceResult<Vec<RecurringPattern>> {
        self.repository.list_patterns()
    }

    /// ## Summary
    /// Replaces a pattern definition, keeping its id.
    ///
    /// Occurrences already materialized are left as they are; call
    /// [`Self::regenerate`] to apply the new definition going forward.
    ///
    /// ## Errors
    /// Returns a validation error for an invalid pattern, or
    /// `ServiceError::NotFound` if no pattern has this id.
    pub fn update(&self, id: Uuid, mut pattern: RecurringPattern) -> ServiceResult<RecurringPattern> {
        pattern.validate()?;
        pattern.id = Some(id);

        if !self.repository.replace_pattern(pattern.clone())? {
            return Err(ServiceError::NotFound(format!("pattern {id}")));
        }

        tracing::info!(pattern_id = %id, "Pattern updated");
        Ok(pattern)
    }

    /// ## Errors
    /// Returns `ServiceError::NotFound` if no pattern has this id.
    pub fn set_enabled(&self, id: Uuid, enabled: bool) -> ServiceResult<RecurringPattern> {
        let pattern = self.get(id)?.with_enabled(enabled);

        if !self.repository.replace_pattern(pattern.clone())? {
            return Err(ServiceError::NotFound(format!("pattern {id}")));
        }

        tracing::info!(pattern_id = %id, enabled, "Pattern toggled");
        Ok(pattern)
    }

    /// ## Summary
    /// Deletes a pattern, and with `cascade` all of its materialized occurrences.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` if no pattern has this id.
    pub fn delete(&self, id: Uuid, cascade: bool) -> ServiceResult<DeleteOutcome> {
        if !self.repository.remove_pattern(id)? {
            return Err(ServiceError::NotFound(format!("pattern {id}")));
        }

        let removed_occurrences = if cascade {
            self.repository.remove_occurrences(id)?
        } else {
            0
        };

        tracing::info!(pattern_id = %id, cascade, removed_occurrences, "Pattern deleted");
        Ok(DeleteOutcome {
            removed_occurrences,
        })
    }

    /// ## Summary
    /// Rebuilds the not-yet-occurred part of a pattern's schedule.
    ///
    /// Occurrences dated on or after `as_of` are replaced by a fresh expansion
    /// that runs to the configured horizon, or to the pattern's end date when
    /// it comes sooner. Earlier occurrences are kept. Calling this again
    /// with the same pattern and date produces the same schedule.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` for an unknown id, or a configuration
    /// error if the pattern cannot be expanded.
    pub fn regenerate(&self, id: Uuid, as_of: NaiveDate) -> ServiceResult<Vec<ScheduledOccurrence>> {
        let pattern = self.get(id)?;
        let window = ExpansionWindow::regeneration(&pattern, as_of, self.regenerate_horizon_months);

        let occurrences: Vec<ScheduledOccurrence> = expand(&pattern, &window)?
            .into_iter()
            .map(|date| ScheduledOccurrence::materialize(id, &pattern, date))
            .collect();

        let removed = self
            .repository
            .replace_occurrences_from(id, as_of, occurrences.clone())?;

        tracing::info!(
            pattern_id = %id,
            %as_of,
            window_end = %window.end,
            removed,
            created = occurrences.len(),
            "Pattern schedule regenerated"
        );
        Ok(occurrences)
    }

    /// ## Errors
    /// Returns an error if the repository is unavailable.
    pub fn occurrences(&self, id: Uuid) -> ServiceResult<Vec<ScheduledOccurrence>> {
        self.repository.occurrences(id)
    }

    /// ## Summary
    /// Previews the next `count` dates of a stored pattern from `from`.
    ///
    /// ## Errors
    /// Returns `ServiceError::NotFound` for an unknown id, or a configuration
    /// error if the pattern cannot be expanded.
    pub fn preview(&self, id: Uuid, from: NaiveDate, count: usize) -> ServiceResult<Vec<NaiveDate>> {
        let pattern = self.get(id)?;
        Ok(preview_next(&pattern, from, count)?)
    }
}
