//! Plan settings use-case service.
//!
//! # Responsibility
//! - Provide load/update entry points for the configuration collaborator.
//!
//! # Invariants
//! - `update_settings` surfaces configuration errors before any allocation
//!   can run against the new value.

use crate::model::settings::PlanSettings;
use crate::repo::course_repo::RepoResult;
use crate::repo::settings_repo::SettingsRepository;

/// Use-case service wrapper for plan configuration.
pub struct SettingsService<R: SettingsRepository> {
    repo: R,
}

impl<R: SettingsRepository> SettingsService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Loads the active configuration (defaults when none persisted).
    pub fn load_settings(&self) -> RepoResult<PlanSettings> {
        self.repo.load_settings()
    }

    /// Validates and persists a configuration update.
    pub fn update_settings(&self, settings: &PlanSettings) -> RepoResult<()> {
        self.repo.save_settings(settings)
    }
}
