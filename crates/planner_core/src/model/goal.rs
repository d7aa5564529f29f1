//! Goal domain model.
//!
//! # Responsibility
//! - Define the long-running numeric objective record.
//! - Own the progress clamp used by every progress update.
//!
//! # Invariants
//! - `target > 0` at creation.
//! - `0 <= current <= target` after every progress update.

use super::wire::{optional_iso_date, optional_text};
use super::{new_record_id, RecordId, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A numeric objective with a target count and current progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Goal {
    pub id: RecordId,
    pub title: String,
    /// Stored as `""` when absent.
    #[serde(default, with = "optional_text")]
    pub description: Option<String>,
    pub target: i64,
    pub current: i64,
    /// Stored as `""` when absent.
    #[serde(default, with = "optional_iso_date")]
    pub deadline: Option<NaiveDate>,
}

impl Goal {
    /// Creates a goal with zero progress and a generated id.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` is blank after trimming.
    /// - `NonPositiveTarget` when `target <= 0`.
    pub fn new(
        title: &str,
        description: Option<&str>,
        target: i64,
        deadline: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        Self::with_id(new_record_id(), title, description, target, deadline)
    }

    /// Creates a goal with zero progress and a caller-provided id.
    pub fn with_id(
        id: impl Into<RecordId>,
        title: &str,
        description: Option<&str>,
        target: i64,
        deadline: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        let goal = Self {
            id: id.into(),
            title: title.trim().to_string(),
            description: description
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string),
            target,
            current: 0,
            deadline,
        };
        goal.validate()?;
        Ok(goal)
    }

    /// Checks record-level invariants, including the progress range.
    ///
    /// An absent description must be `None`, never a blank `Some`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self
            .description
            .as_deref()
            .is_some_and(|text| text.trim().is_empty())
        {
            return Err(ValidationError::BlankDescription);
        }
        if self.target <= 0 {
            return Err(ValidationError::NonPositiveTarget(self.target));
        }
        if !(0..=self.target).contains(&self.current) {
            return Err(ValidationError::ProgressOutOfRange {
                current: self.current,
                target: self.target,
            });
        }
        Ok(())
    }

    /// Returns a copy with `current` moved by `delta`, clamped to
    /// `[0, target]`.
    pub fn with_progress(&self, delta: i64) -> Self {
        Self {
            current: clamp_progress(self.current.saturating_add(delta), self.target),
            ..self.clone()
        }
    }

    /// Completion percentage rounded to the nearest integer.
    pub fn progress_percent(&self) -> u8 {
        percent_of(self.current, self.target)
    }

    pub fn is_achieved(&self) -> bool {
        self.target > 0 && self.current >= self.target
    }
}

/// Clamps a progress value into `[0, target]`.
///
/// A non-positive `target` collapses the range to `[0, 0]`.
pub fn clamp_progress(value: i64, target: i64) -> i64 {
    value.min(target).max(0)
}

/// `round(part / whole * 100)`, or `0` when `whole <= 0`.
pub(crate) fn percent_of(part: i64, whole: i64) -> u8 {
    if whole <= 0 {
        return 0;
    }
    let ratio = part.clamp(0, whole) as f64 / whole as f64;
    (ratio * 100.0).round() as u8
}
