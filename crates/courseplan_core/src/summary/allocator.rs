//! Requirement allocator.
//!
//! # Responsibility
//! - Compute selected-vs-required credits per category for selected courses.
//! - Route credits above a category's requirement into the single configured
//!   overflow target.
//!
//! # Invariants
//! - Row order equals the configuration's category order.
//! - Overflow moves credits between rows but never creates or destroys them:
//!   the displayed selected total equals the raw selected total over
//!   configured categories.
//! - The overflow target itself is never capped; `remaining` may go
//!   negative without any second-pass redistribution.

use crate::model::course::Course;
use crate::model::settings::PlanSettings;

/// One category row of the credit summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    /// Category name, as configured.
    pub category: String,
    /// Required credits from configuration.
    pub required: u32,
    /// Displayed selected credits after capping/overflow routing.
    pub selected: f64,
    /// `required - selected`. Positive means deficit, negative means
    /// over-fulfilled.
    pub remaining: f64,
}

/// Credit summary across all configured categories.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditSummary {
    /// Per-category rows in configuration order.
    pub rows: Vec<SummaryRow>,
    /// Sum of credits over all selected courses, uncapped and independent of
    /// per-category clamping. Includes courses whose category is not
    /// configured.
    pub total_selected: f64,
}

/// Computes the per-category credit summary for the selected courses.
///
/// Expects `settings` to have passed [`PlanSettings::validate`]; an overflow
/// target missing from the category table leaves the overflow pool
/// unapplied.
pub fn allocate(courses: &[Course], settings: &PlanSettings) -> CreditSummary {
    let selected: Vec<&Course> = courses.iter().filter(|course| course.selected).collect();

    let raw_for = |name: &str| -> f64 {
        selected
            .iter()
            .filter(|course| course.category == name)
            .map(|course| course.effective_credits())
            .sum()
    };

    // First pass: cap every category except the target, pooling the excess.
    let mut rows = Vec::with_capacity(settings.categories.len());
    let mut overflow_pool = 0.0;
    for category in &settings.categories {
        let raw = raw_for(&category.name);
        let required = f64::from(category.required);

        let displayed = if category.name != settings.overflow_target && raw > required {
            overflow_pool += raw - required;
            required
        } else {
            raw
        };

        rows.push(SummaryRow {
            category: category.name.clone(),
            required: category.required,
            selected: displayed,
            remaining: required - displayed,
        });
    }

    // Second pass: the whole pool lands on the overflow target, uncapped.
    if let Some(target_row) = rows
        .iter_mut()
        .find(|row| row.category == settings.overflow_target)
    {
        target_row.selected += overflow_pool;
        target_row.remaining = f64::from(target_row.required) - target_row.selected;
    }

    let total_selected = selected
        .iter()
        .map(|course| course.effective_credits())
        .sum();

    CreditSummary {
        rows,
        total_selected,
    }
}
