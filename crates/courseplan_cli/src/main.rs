//! CLI entry point.
//!
//! # Responsibility
//! - Open the planner database and print the credit summary and term
//!   timeline as plain text.
//! - Keep output deterministic; all business logic lives in
//!   `courseplan_core`.

use courseplan_core::db::open_db;
use courseplan_core::{
    CourseService, SettingsService, SqliteCourseRepository, SqliteSettingsRepository,
    TimelineBucket,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "courseplan.db".to_string());

    let conn = open_db(&db_path)?;
    let settings = SettingsService::new(SqliteSettingsRepository::try_new(&conn)?).load_settings()?;
    let courses = CourseService::new(SqliteCourseRepository::try_new(&conn)?);

    let summary = courses.credit_summary(&settings)?;
    println!("Credit summary ({db_path})");
    println!("{:<24} {:>8} {:>9} {:>10}", "category", "required", "selected", "remaining");
    for row in &summary.rows {
        println!(
            "{:<24} {:>8} {:>9.1} {:>10.1}",
            row.category, row.required, row.selected, row.remaining
        );
    }
    println!("total selected: {:.1}", summary.total_selected);

    let timeline = courses.term_timeline()?;
    print_bucket("Year 1", &timeline.year1);
    print_bucket("Year 2", &timeline.year2);
    print_bucket("Unassigned", &timeline.unassigned);

    Ok(())
}

fn print_bucket(label: &str, bucket: &TimelineBucket) {
    if bucket.rows.is_empty() {
        return;
    }

    println!("\n{label}");
    for row in &bucket.rows {
        let marks: String = row
            .terms
            .iter()
            .map(|occupied| if *occupied { 'x' } else { '.' })
            .collect();
        println!("  {:<32} [{marks}] {:>5.1}", row.name, row.credits);
    }
    println!(
        "  quarters: {:?}  semester 1: {:.1}  semester 2: {:.1}",
        bucket.quarter_totals, bucket.semester1, bucket.semester2
    );
}
