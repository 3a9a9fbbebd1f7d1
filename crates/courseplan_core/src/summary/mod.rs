//! Derived-aggregation views over a snapshot of course rows.
//!
//! # Responsibility
//! - Compute the per-category credit summary with overflow allocation.
//! - Compute the per-year term timeline with credit distribution.
//!
//! # Invariants
//! - Both computations are pure functions over an in-memory snapshot; they
//!   never touch storage and never fail on malformed per-row input.
//! - Each call recomputes from scratch; there is no cached state.

pub mod allocator;
pub mod timeline;
