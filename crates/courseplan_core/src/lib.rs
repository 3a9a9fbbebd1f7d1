//! Core domain logic for the course planner.
//! This crate is the single source of truth for credit-allocation and
//! timeline business rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod summary;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::course::{Course, CourseId, CourseValidationError};
pub use model::settings::{CategoryRequirement, ConfigurationError, PlanSettings};
pub use repo::course_repo::{
    CourseListQuery, CourseRepository, RepoError, RepoResult, SqliteCourseRepository,
};
pub use repo::settings_repo::{SettingsRepository, SqliteSettingsRepository};
pub use service::course_service::CourseService;
pub use service::settings_service::SettingsService;
pub use summary::allocator::{allocate, CreditSummary, SummaryRow};
pub use summary::timeline::{
    build_timeline, parse_term_spec, Timeline, TimelineBucket, TimelineRow, TERM_COUNT,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
