//! Course record model.
//!
//! # Responsibility
//! - Define the canonical course row shared by the editor, storage and the
//!   summary/timeline computations.
//! - Provide lifecycle helpers for soft-delete semantics.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another course.
//! - `name` is non-empty for every persisted course.
//! - `credits`, when set, is a finite non-negative number.
//! - Malformed `term_spec` content is never a validation error; the timeline
//!   builder degrades it to "no term assigned".

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a course row.
pub type CourseId = Uuid;

/// Canonical course record.
///
/// Optional fields model the flat planner table: a missing credit
/// value aggregates as zero and a missing (or out-of-range) year lands the
/// course in the "unassigned" timeline bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Stable global ID used for editing and auditing.
    pub uuid: CourseId,
    /// Display name. Non-empty for persisted rows.
    pub name: String,
    /// Category name; expected to match a `PlanSettings` entry. Rows with an
    /// unknown category are excluded from per-category sums but still count
    /// toward the overall selected total.
    pub category: String,
    /// Credit value. `None` aggregates as zero.
    pub credits: Option<f64>,
    /// Comma-separated term numbers in 1..=4, e.g. `"1, 3"`. Invalid tokens
    /// are dropped leniently during timeline parsing.
    pub term_spec: String,
    /// Study year. Only 1 and 2 are timeline buckets; anything else is
    /// treated as unassigned.
    pub year: Option<i64>,
    /// Whether the course counts toward the plan.
    pub selected: bool,
    /// Free-form notes.
    pub notes: String,
    /// Comma-separated prerequisite course names. Informational only; the
    /// core performs no existence or cycle validation.
    pub prerequisite: String,
    /// Soft delete tombstone.
    pub is_deleted: bool,
}

/// Validation failures for course rows.
#[derive(Debug, Clone, PartialEq)]
pub enum CourseValidationError {
    /// `uuid` is the nil UUID.
    NilUuid,
    /// `name` is empty or whitespace-only.
    EmptyName,
    /// `credits` is negative or not finite.
    InvalidCredits(f64),
}

impl Display for CourseValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "course uuid must not be nil"),
            Self::EmptyName => write!(f, "course name must not be empty"),
            Self::InvalidCredits(value) => {
                write!(f, "course credits must be a finite non-negative number, got {value}")
            }
        }
    }
}

impl Error for CourseValidationError {}

impl Course {
    /// Creates a new course with a generated stable ID.
    ///
    /// Optional fields start unset; `selected` starts `false`.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            credits: None,
            term_spec: String::new(),
            year: None,
            selected: false,
            notes: String::new(),
            prerequisite: String::new(),
            is_deleted: false,
        }
    }

    /// Creates a course with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        uuid: CourseId,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, CourseValidationError> {
        if uuid.is_nil() {
            return Err(CourseValidationError::NilUuid);
        }
        let mut course = Self::new(name, category);
        course.uuid = uuid;
        Ok(course)
    }

    /// Checks the persistence-level invariants of this row.
    ///
    /// Term-spec and year contents are deliberately not validated here; the
    /// timeline builder normalizes them instead of failing.
    pub fn validate(&self) -> Result<(), CourseValidationError> {
        if self.uuid.is_nil() {
            return Err(CourseValidationError::NilUuid);
        }
        if self.name.trim().is_empty() {
            return Err(CourseValidationError::EmptyName);
        }
        if let Some(credits) = self.credits {
            if !credits.is_finite() || credits < 0.0 {
                return Err(CourseValidationError::InvalidCredits(credits));
            }
        }
        Ok(())
    }

    /// Credit value used by aggregation; unset counts as zero.
    pub fn effective_credits(&self) -> f64 {
        self.credits.unwrap_or(0.0)
    }

    /// Marks this course as softly deleted (tombstoned).
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// Clears the soft delete flag.
    pub fn restore(&mut self) {
        self.is_deleted = false;
    }

    /// Returns whether this course should be considered visible/active.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}
