//! Task domain model.
//!
//! # Responsibility
//! - Define the scheduled to-do record and its subject/priority labels.
//! - Validate construction inputs before a task enters a collection.
//!
//! # Invariants
//! - `id` is stable and never reused within one collection.
//! - `title` is non-empty and stored trimmed.
//! - `date` is fixed at creation; toggling never changes it.

use super::wire::iso_date;
use super::{new_record_id, RecordId, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Fixed subject categories a task can be tagged with.
///
/// Serialized with the Korean labels the planner has always stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "수학")]
    Math,
    #[serde(rename = "영어")]
    English,
    #[serde(rename = "국어")]
    Korean,
    #[serde(rename = "과학")]
    Science,
    #[serde(rename = "사회")]
    SocialStudies,
    #[serde(rename = "기타")]
    Other,
}

impl Subject {
    /// All subjects in selection order.
    pub const ALL: [Subject; 6] = [
        Subject::Math,
        Subject::English,
        Subject::Korean,
        Subject::Science,
        Subject::SocialStudies,
        Subject::Other,
    ];

    /// Stored/display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Math => "수학",
            Self::English => "영어",
            Self::Korean => "국어",
            Self::Science => "과학",
            Self::SocialStudies => "사회",
            Self::Other => "기타",
        }
    }

    /// ASCII alias accepted from command-line input.
    pub fn alias(self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::English => "english",
            Self::Korean => "korean",
            Self::Science => "science",
            Self::SocialStudies => "social",
            Self::Other => "other",
        }
    }

    /// Parses either the stored label or the ASCII alias.
    ///
    /// # Errors
    /// - `MissingSubject` when the input is blank.
    /// - `UnknownSubject` when the input matches no subject.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingSubject);
        }
        let lowered = trimmed.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|subject| subject.label() == trimmed || subject.alias() == lowered)
            .ok_or_else(|| ValidationError::UnknownSubject(trimmed.to_string()))
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Wire value (`high|medium|low`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "높음",
            Self::Medium => "보통",
            Self::Low => "낮음",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(ValidationError::UnknownPriority(other.to_string())),
        }
    }
}

/// A single to-do scheduled for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    pub subject: Subject,
    pub priority: Priority,
    pub completed: bool,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
}

impl Task {
    /// Creates an open task with a generated id.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` is blank after trimming.
    pub fn new(
        title: &str,
        subject: Subject,
        priority: Priority,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Self::with_id(new_record_id(), title, subject, priority, date)
    }

    /// Creates an open task with a caller-provided id.
    pub fn with_id(
        id: impl Into<RecordId>,
        title: &str,
        subject: Subject,
        priority: Priority,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let task = Self {
            id: id.into(),
            title: title.trim().to_string(),
            subject,
            priority,
            completed: false,
            date,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Returns a copy with `completed` flipped.
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}
