//! Plan configuration model.
//!
//! # Responsibility
//! - Define the category -> required-credits table and the overflow target.
//! - Validate configuration before it is persisted or used for allocation.
//!
//! # Invariants
//! - Category order is insertion order and drives summary row order.
//! - A persisted configuration always names an overflow target that is one
//!   of its own categories; updates violating this are rejected up front.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One category row of the requirement table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRequirement {
    /// Unique category name, e.g. "Mandatory (core)".
    pub name: String,
    /// Required credits for this category.
    pub required: u32,
}

/// Full planner configuration: requirement table plus overflow routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSettings {
    /// Requirement table in display order.
    pub categories: Vec<CategoryRequirement>,
    /// Category that absorbs credits selected beyond another category's
    /// requirement. Must name an entry of `categories`.
    pub overflow_target: String,
}

/// Configuration update failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `overflow_target` does not name any configured category.
    UnknownOverflowTarget(String),
    /// Two categories share the same name.
    DuplicateCategory(String),
    /// The category table is empty.
    NoCategories,
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownOverflowTarget(target) => {
                write!(f, "overflow target `{target}` is not a configured category")
            }
            Self::DuplicateCategory(name) => {
                write!(f, "duplicate category name `{name}`")
            }
            Self::NoCategories => write!(f, "configuration must contain at least one category"),
        }
    }
}

impl Error for ConfigurationError {}

impl PlanSettings {
    /// Checks configuration invariants.
    ///
    /// Runs before persistence and is the only place the core rejects
    /// configuration input; allocation assumes an already-validated value.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.categories.is_empty() {
            return Err(ConfigurationError::NoCategories);
        }
        for (index, category) in self.categories.iter().enumerate() {
            if self.categories[..index]
                .iter()
                .any(|earlier| earlier.name == category.name)
            {
                return Err(ConfigurationError::DuplicateCategory(category.name.clone()));
            }
        }
        if !self
            .categories
            .iter()
            .any(|category| category.name == self.overflow_target)
        {
            return Err(ConfigurationError::UnknownOverflowTarget(
                self.overflow_target.clone(),
            ));
        }
        Ok(())
    }

    /// Looks up the requirement for a category name.
    pub fn required_for(&self, name: &str) -> Option<u32> {
        self.categories
            .iter()
            .find(|category| category.name == name)
            .map(|category| category.required)
    }
}

impl Default for PlanSettings {
    /// Requirement table the planner ships with before any configuration
    /// update has been saved.
    fn default() -> Self {
        let categories = [
            ("Mandatory (core)", 15),
            ("Mandatory (track)", 18),
            ("Electives (track)", 18),
            ("Electives (core)", 18),
            ("Restricted", 6),
            ("Thesis & Research", 45),
        ]
        .into_iter()
        .map(|(name, required)| CategoryRequirement {
            name: name.to_string(),
            required,
        })
        .collect();

        Self {
            categories,
            overflow_target: "Electives (core)".to_string(),
        }
    }
}
