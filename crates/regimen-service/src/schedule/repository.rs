//! Storage seam for patterns and their materialized occurrences.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use regimen_pattern::RecurringPattern;
use uuid::Uuid;

use super::ScheduledOccurrence;
use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Backing store for patterns and the occurrences materialized from them.
///
/// Implementations own durability; the service only relies on each call
/// being atomic.
pub trait PatternRepository: Send + Sync {
    /// Stores a new pattern. The pattern must carry an id.
    ///
    /// ## Errors
    /// Returns an error if the store is unavailable.
    fn insert_pattern(&self, pattern: RecurringPattern) -> ServiceResult<()>;

    /// ## Errors
    /// Returns an error if the store is unavailable.
    fn get_pattern(&self, id: Uuid) -> ServiceResult<Option<RecurringPattern>>;

    /// Lists patterns in creation order.
    ///
    /// ## Errors
    /// Returns an error if the store is unavailable.
    fn list_patterns(&self) -> ServiceResult<Vec<RecurringPattern>>;

    /// Replaces a stored pattern, returning `false` if it does not exist.
    ///
    /// ## Errors
    /// Returns an error if the store is unavailable.
    fn replace_pattern(&self, pattern: RecurringPattern) -> ServiceResult<bool>;

    /// Removes a pattern, returning `false` if it does not exist.
    ///
    /// ## Errors
    /// Returns an error if the store is unavailable.
    fn remove_pattern(&self, id: Uuid) -> ServiceResult<bool>;

    /// Occurrences of a pattern ordered by date.
    ///
    /// ## Errors
    /// Returns an error if the store is unavailable.
    fn occurrences(&self, pattern_id: Uuid) -> ServiceResult<Vec<ScheduledOccurrence>>;

    /// ## Summary
    /// Drops the occurrences of a pattern dated on or after `from` and stores
    /// `replacements` in their place, returning how many were dropped.
    ///
    /// ## Errors
    /// Returns an error if the store is unavailable.
    fn replace_occurrences_from(
        &self,
        pattern_id: Uuid,
        from: NaiveDate,
        replacements: Vec<ScheduledOccurrence>,
    ) -> ServiceResult<usize>;

    /// Drops every occurrence of a pattern, returning how many were dropped.
    ///
    /// ## Errors
    /// Returns an error if the store is unavailable.
    fn remove_occurrences(&self, pattern_id: Uuid) -> ServiceResult<usize>;
}

#[derive(Debug, Default)]
struct State {
    patterns: BTreeMap<Uuid, RecurringPattern>,
    occurrences: BTreeMap<Uuid, Vec<ScheduledOccurrence>>,
}

/// Process-local repository used by the HTTP server and tests.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: RwLock<State>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ServiceResult<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_err| ServiceError::InvariantViolation("Repository lock poisoned"))
    }

    fn write(&self) -> ServiceResult<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_err| ServiceError::InvariantViolation("Repository lock poisoned"))
    }
}

fn require_id(pattern: &RecurringPattern) -> ServiceResult<Uuid> {
    pattern
        .id
        .ok_or(ServiceError::InvariantViolation("Stored pattern has no id"))
}

impl PatternRepository for InMemoryRepository {
    fn insert_pattern(&self, pattern: RecurringPattern) -> ServiceResult<()> {
        let id = require_id(&pattern)?;
        self.write()?.patterns.insert(id, pattern);
        Ok(())
    }

    fn get_pattern(&self, id: Uuid) -> ServiceResult<Option<RecurringPattern>> {
        Ok(self.read()?.patterns.get(&id).cloned())
    }

    fn list_patterns(&self) -> ServiceResult<Vec<RecurringPattern>> {
        Ok(self.read()?.patterns.values().cloned().collect())
    }

    fn replace_pattern(&self, pattern: RecurringPattern) -> ServiceResult<bool> {
        let id = require_id(&pattern)?;
        let mut state = self.write()?;
        match state.patterns.get_mut(&id) {
            Some(stored) => {
                *stored = pattern;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove_pattern(&self, id: Uuid) -> ServiceResult<bool> {
        Ok(self.write()?.patterns.remove(&id).is_some())
    }

    fn occurrences(&self, pattern_id: Uuid) -> ServiceResult<Vec<ScheduledOccurrence>> {
        Ok(self
            .read()?
            .occurrences
            .get(&pattern_id)
            .cloned()
            .unwrap_or_default())
    }

    fn replace_occurrences_from(
        &self,
        pattern_id: Uuid,
        from: NaiveDate,
        replacements: Vec<ScheduledOccurrence>,
    ) -> ServiceResult<usize> {
        let mut state = self.write()?;
        let entries = state.occurrences.entry(pattern_id).or_default();

        let before = entries.len();
        entries.retain(|occurrence| occurrence.date < from);
        let removed = before - entries.len();

        entries.extend(replacements);
        entries.sort_by_key(|occurrence| occurrence.date);
        Ok(removed)
    }

    fn remove_occurrences(&self, pattern_id: Uuid) -> ServiceResult<usize> {
        Ok(self
            .write()?
            .occurrences
            .remove(&pattern_id)
            .map_or(0, |entries| entries.len()))
    }
}
