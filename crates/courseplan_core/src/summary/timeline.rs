//! Term timeline builder.
//!
//! # Responsibility
//! - Partition selected courses into year 1, year 2 and unassigned buckets.
//! - Distribute each course's credits evenly across its declared terms and
//!   total them per term and per semester.
//!
//! # Invariants
//! - Term-spec parsing is lenient: invalid tokens are dropped and an
//!   all-invalid spec behaves as "no term assigned". Building a timeline
//!   never fails.
//! - Within a bucket, rows sort ascending by their earliest valid term;
//!   rows with no valid term sort last; ties keep snapshot order.
//! - A course's contributions across its terms sum to its credit value.

use crate::model::course::Course;

/// Number of terms (quarters) in one study year.
pub const TERM_COUNT: usize = 4;

/// One course row of a timeline bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow {
    /// Course display name.
    pub name: String,
    /// Category name, surfaced for presentation-side styling.
    pub category: String,
    /// Credit value used for distribution (zero when unset).
    pub credits: f64,
    /// Raw term-spec string as stored.
    pub term_spec: String,
    /// Occupancy flag per term: `terms[i]` is true when term `i + 1` is
    /// among the valid parsed terms.
    pub terms: [bool; TERM_COUNT],
}

/// One year (or the unassigned) section of the timeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimelineBucket {
    /// Rows sorted by earliest valid term, no-term rows last.
    pub rows: Vec<TimelineRow>,
    /// Credit total per term; each course's credits split evenly across its
    /// distinct valid terms.
    pub quarter_totals: [f64; TERM_COUNT],
    /// Terms 1 + 2.
    pub semester1: f64,
    /// Terms 3 + 4.
    pub semester2: f64,
}

/// Timeline of selected courses grouped by study year.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Timeline {
    pub year1: TimelineBucket,
    pub year2: TimelineBucket,
    /// Courses whose year is absent or outside {1, 2}.
    pub unassigned: TimelineBucket,
}

/// Parses a term-spec string into the sorted distinct valid term numbers.
///
/// Tokens that are not integers in 1..=4 are silently dropped; duplicates
/// count once.
pub fn parse_term_spec(spec: &str) -> Vec<u8> {
    let mut terms: Vec<u8> = spec
        .split(',')
        .filter_map(|token| token.trim().parse::<u8>().ok())
        .filter(|term| (1..=4).contains(term))
        .collect();
    terms.sort_unstable();
    terms.dedup();
    terms
}

/// Builds the term timeline for the selected courses in `courses`.
pub fn build_timeline(courses: &[Course]) -> Timeline {
    let mut timeline = Timeline::default();

    for course in courses.iter().filter(|course| course.selected) {
        let bucket = match course.year {
            Some(1) => &mut timeline.year1,
            Some(2) => &mut timeline.year2,
            _ => &mut timeline.unassigned,
        };
        push_course(bucket, course);
    }

    finalize_bucket(&mut timeline.year1);
    finalize_bucket(&mut timeline.year2);
    finalize_bucket(&mut timeline.unassigned);
    timeline
}

fn push_course(bucket: &mut TimelineBucket, course: &Course) {
    let parsed = parse_term_spec(&course.term_spec);
    let credits = course.effective_credits();

    let mut terms = [false; TERM_COUNT];
    for &term in &parsed {
        terms[usize::from(term) - 1] = true;
    }

    if !parsed.is_empty() {
        let share = credits / parsed.len() as f64;
        for &term in &parsed {
            bucket.quarter_totals[usize::from(term) - 1] += share;
        }
    }

    bucket.rows.push(TimelineRow {
        name: course.name.clone(),
        category: course.category.clone(),
        credits,
        term_spec: course.term_spec.clone(),
        terms,
    });
}

fn finalize_bucket(bucket: &mut TimelineBucket) {
    // Stable sort keeps snapshot order for equal keys.
    bucket
        .rows
        .sort_by_key(|row| earliest_term(&row.terms).unwrap_or(u8::MAX));
    bucket.semester1 = bucket.quarter_totals[0] + bucket.quarter_totals[1];
    bucket.semester2 = bucket.quarter_totals[2] + bucket.quarter_totals[3];
}

fn earliest_term(terms: &[bool; TERM_COUNT]) -> Option<u8> {
    terms
        .iter()
        .position(|occupied| *occupied)
        .map(|index| index as u8 + 1)
}
