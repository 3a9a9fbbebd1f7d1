//! Domain model for the course planner.
//!
//! # Responsibility
//! - Define the canonical course record consumed by aggregation and storage.
//! - Define the per-category requirement configuration.
//!
//! # Invariants
//! - Every course row is identified by a stable `CourseId`.
//! - Deletion is represented by soft-delete tombstones, not hard delete.
//! - Category order in `PlanSettings` is the display order everywhere.

pub mod course;
pub mod settings;
