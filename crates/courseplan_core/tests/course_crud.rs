use courseplan_core::db::migrations::latest_version;
use courseplan_core::db::open_db_in_memory;
use courseplan_core::{
    Course, CourseListQuery, CourseRepository, CourseService, CourseValidationError, RepoError,
    SqliteCourseRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::try_new(&conn).unwrap();

    let mut course = Course::new("Distributed Systems", "Mandatory (core)");
    course.credits = Some(6.0);
    course.term_spec = "1, 2".to_string();
    course.year = Some(1);
    course.selected = true;
    course.prerequisite = "Operating Systems".to_string();
    let id = repo.create_course(&course).unwrap();

    let loaded = repo.get_course(id, false).unwrap().unwrap();
    assert_eq!(loaded, course);
}

#[test]
fn update_existing_course() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::try_new(&conn).unwrap();

    let mut course = Course::new("Seminar", "Restricted");
    repo.create_course(&course).unwrap();

    course.credits = Some(3.0);
    course.year = Some(2);
    course.selected = true;
    course.notes = "moved to spring".to_string();
    repo.update_course(&course).unwrap();

    let loaded = repo.get_course(course.uuid, false).unwrap().unwrap();
    assert_eq!(loaded.credits, Some(3.0));
    assert_eq!(loaded.year, Some(2));
    assert!(loaded.selected);
    assert_eq!(loaded.notes, "moved to spring");
}

#[test]
fn update_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::try_new(&conn).unwrap();

    let course = Course::new("missing", "Restricted");
    let err = repo.update_course(&course).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == course.uuid));
}

#[test]
fn list_preserves_insertion_order_and_filters_selected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::try_new(&conn).unwrap();

    let mut first = Course::new("first", "Restricted");
    first.selected = true;
    let second = Course::new("second", "Restricted");
    let mut third = Course::new("third", "Restricted");
    third.selected = true;
    repo.create_course(&first).unwrap();
    repo.create_course(&second).unwrap();
    repo.create_course(&third).unwrap();

    let all = repo.list_courses(&CourseListQuery::default()).unwrap();
    let names: Vec<&str> = all.iter().map(|course| course.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);

    let selected = repo
        .list_courses(&CourseListQuery {
            selected_only: true,
            ..CourseListQuery::default()
        })
        .unwrap();
    let names: Vec<&str> = selected.iter().map(|course| course.name.as_str()).collect();
    assert_eq!(names, vec!["first", "third"]);
}

#[test]
fn soft_delete_hides_row_and_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::try_new(&conn).unwrap();

    let course = Course::new("to drop", "Restricted");
    repo.create_course(&course).unwrap();

    repo.soft_delete_course(course.uuid).unwrap();
    repo.soft_delete_course(course.uuid).unwrap();

    assert!(repo.get_course(course.uuid, false).unwrap().is_none());
    let tombstone = repo.get_course(course.uuid, true).unwrap().unwrap();
    assert!(tombstone.is_deleted);

    let visible = repo.list_courses(&CourseListQuery::default()).unwrap();
    assert!(visible.is_empty());
}

#[test]
fn replace_courses_swaps_the_whole_table() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::try_new(&conn).unwrap();

    let old = Course::new("old", "Restricted");
    repo.create_course(&old).unwrap();
    repo.soft_delete_course(old.uuid).unwrap();

    let replacement = vec![
        Course::new("new first", "Restricted"),
        Course::new("new second", "Restricted"),
    ];
    repo.replace_courses(&replacement).unwrap();

    // Tombstones do not survive a replacement.
    assert!(repo.get_course(old.uuid, true).unwrap().is_none());

    let all = repo.list_courses(&CourseListQuery::default()).unwrap();
    let names: Vec<&str> = all.iter().map(|course| course.name.as_str()).collect();
    assert_eq!(names, vec!["new first", "new second"]);
}

#[test]
fn replace_courses_rejects_invalid_rows_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::try_new(&conn).unwrap();

    let keep = Course::new("keep", "Restricted");
    repo.create_course(&keep).unwrap();

    let mut invalid = Course::new("bad credits", "Restricted");
    invalid.credits = Some(-1.0);

    let err = repo.replace_courses(&[invalid]).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(CourseValidationError::InvalidCredits(_))
    ));

    // Existing data is untouched after the rejected replacement.
    assert!(repo.get_course(keep.uuid, false).unwrap().is_some());
}

#[test]
fn validation_failure_blocks_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::try_new(&conn).unwrap();

    let empty_name = Course::new("   ", "Restricted");
    let err = repo.create_course(&empty_name).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(CourseValidationError::EmptyName)
    ));

    let mut valid = Course::new("valid", "Restricted");
    repo.create_course(&valid).unwrap();

    valid.credits = Some(f64::NAN);
    let err = repo.update_course(&valid).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(CourseValidationError::InvalidCredits(_))
    ));
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::try_new(&conn).unwrap();
    let service = CourseService::new(repo);

    let mut course = Course::new("from service", "Restricted");
    course.selected = true;
    let id = service.create_course(&course).unwrap();

    let fetched = service.get_course(id, false).unwrap().unwrap();
    assert_eq!(fetched.name, "from service");

    service.soft_delete_course(id).unwrap();
    assert!(service.get_course(id, false).unwrap().is_none());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteCourseRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_courses_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteCourseRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("courses"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_courses_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE courses (
            uuid TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteCourseRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "courses",
            column: "credits"
        })
    ));
}

#[test]
fn invalid_persisted_boolean_is_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::try_new(&conn).unwrap();

    let id = Uuid::new_v4();
    conn.execute(
        "INSERT INTO courses (uuid, name, category, selected) VALUES (?1, 'row', 'cat', 7);",
        [id.to_string()],
    )
    .unwrap();

    let err = repo.get_course(id, false).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
