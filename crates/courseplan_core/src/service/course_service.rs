//! Course use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for core callers.
//! - Produce the credit summary and term timeline from a fresh selected
//!   snapshot.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Every summary/timeline call re-reads the full snapshot; no cached or
//!   partial results are reused.

use crate::model::course::{Course, CourseId};
use crate::model::settings::PlanSettings;
use crate::repo::course_repo::{CourseListQuery, CourseRepository, RepoResult};
use crate::summary::allocator::{allocate, CreditSummary};
use crate::summary::timeline::{build_timeline, Timeline};

/// Use-case service wrapper for course operations.
pub struct CourseService<R: CourseRepository> {
    repo: R,
}

impl<R: CourseRepository> CourseService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a new course through repository persistence.
    pub fn create_course(&self, course: &Course) -> RepoResult<CourseId> {
        self.repo.create_course(course)
    }

    /// Updates an existing course by stable ID.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_course(&self, course: &Course) -> RepoResult<()> {
        self.repo.update_course(course)
    }

    /// Gets one course by ID with optional deleted-row visibility.
    pub fn get_course(&self, id: CourseId, include_deleted: bool) -> RepoResult<Option<Course>> {
        self.repo.get_course(id, include_deleted)
    }

    /// Lists courses using filter options.
    pub fn list_courses(&self, query: &CourseListQuery) -> RepoResult<Vec<Course>> {
        self.repo.list_courses(query)
    }

    /// Soft-deletes a course by ID.
    pub fn soft_delete_course(&self, id: CourseId) -> RepoResult<()> {
        self.repo.soft_delete_course(id)
    }

    /// Replaces the whole course table, editor save-all semantics.
    pub fn replace_courses(&self, courses: &[Course]) -> RepoResult<()> {
        self.repo.replace_courses(courses)
    }

    /// Computes the per-category credit summary from a fresh snapshot.
    pub fn credit_summary(&self, settings: &PlanSettings) -> RepoResult<CreditSummary> {
        let snapshot = self.selected_snapshot()?;
        Ok(allocate(&snapshot, settings))
    }

    /// Computes the term timeline from a fresh snapshot.
    pub fn term_timeline(&self) -> RepoResult<Timeline> {
        let snapshot = self.selected_snapshot()?;
        Ok(build_timeline(&snapshot))
    }

    fn selected_snapshot(&self) -> RepoResult<Vec<Course>> {
        self.repo.list_courses(&CourseListQuery {
            selected_only: true,
            include_deleted: false,
        })
    }
}
