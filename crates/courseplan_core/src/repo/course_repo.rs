//! Course repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the flat `courses` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Course::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - List order is the persisted row position, matching the order the
//!   editor last saved.

use crate::db::{migrations, DbError};
use crate::model::course::{Course, CourseId, CourseValidationError};
use crate::model::settings::ConfigurationError;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const COURSE_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    category,
    credits,
    term_spec,
    year,
    selected,
    notes,
    prerequisite,
    is_deleted
FROM courses";

const COURSES_TABLE: &str = "courses";
const COURSES_REQUIRED_COLUMNS: &[&str] = &[
    "uuid",
    "name",
    "category",
    "credits",
    "term_spec",
    "year",
    "selected",
    "notes",
    "prerequisite",
    "is_deleted",
    "position",
    "updated_at",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for planner persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(CourseValidationError),
    Config(ConfigurationError),
    Db(DbError),
    NotFound(CourseId),
    InvalidData(String),
    /// Connection has not been migrated to the schema this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "course not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted course data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it via db::open_db"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CourseValidationError> for RepoError {
    fn from(value: CourseValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ConfigurationError> for RepoError {
    fn from(value: ConfigurationError) -> Self {
        Self::Config(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing courses.
#[derive(Debug, Clone, Copy, Default)]
pub struct CourseListQuery {
    /// Restrict to `selected = true` rows (the aggregation snapshot).
    pub selected_only: bool,
    /// Include soft-deleted rows.
    pub include_deleted: bool,
}

/// Repository interface for course CRUD operations.
pub trait CourseRepository {
    fn create_course(&self, course: &Course) -> RepoResult<CourseId>;
    fn update_course(&self, course: &Course) -> RepoResult<()>;
    fn get_course(&self, id: CourseId, include_deleted: bool) -> RepoResult<Option<Course>>;
    fn list_courses(&self, query: &CourseListQuery) -> RepoResult<Vec<Course>>;
    fn soft_delete_course(&self, id: CourseId) -> RepoResult<()>;
    /// Replaces the whole table with `courses` in one transaction,
    /// mirroring the editor's save-all semantics. Tombstones do not survive
    /// a replacement.
    fn replace_courses(&self, courses: &[Course]) -> RepoResult<()>;
}

/// SQLite-backed course repository.
pub struct SqliteCourseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCourseRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, COURSES_TABLE, COURSES_REQUIRED_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl CourseRepository for SqliteCourseRepository<'_> {
    fn create_course(&self, course: &Course) -> RepoResult<CourseId> {
        course.validate()?;

        self.conn.execute(
            "INSERT INTO courses (
                uuid,
                name,
                category,
                credits,
                term_spec,
                year,
                selected,
                notes,
                prerequisite,
                is_deleted,
                position
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                (SELECT COALESCE(MAX(position) + 1, 0) FROM courses)
            );",
            params![
                course.uuid.to_string(),
                course.name.as_str(),
                course.category.as_str(),
                course.credits,
                course.term_spec.as_str(),
                course.year,
                bool_to_int(course.selected),
                course.notes.as_str(),
                course.prerequisite.as_str(),
                bool_to_int(course.is_deleted),
            ],
        )?;

        Ok(course.uuid)
    }

    fn update_course(&self, course: &Course) -> RepoResult<()> {
        course.validate()?;

        let changed = self.conn.execute(
            "UPDATE courses
             SET
                name = ?1,
                category = ?2,
                credits = ?3,
                term_spec = ?4,
                year = ?5,
                selected = ?6,
                notes = ?7,
                prerequisite = ?8,
                is_deleted = ?9,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?10;",
            params![
                course.name.as_str(),
                course.category.as_str(),
                course.credits,
                course.term_spec.as_str(),
                course.year,
                bool_to_int(course.selected),
                course.notes.as_str(),
                course.prerequisite.as_str(),
                bool_to_int(course.is_deleted),
                course.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(course.uuid));
        }

        Ok(())
    }

    fn get_course(&self, id: CourseId, include_deleted: bool) -> RepoResult<Option<Course>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COURSE_SELECT_SQL}
             WHERE uuid = ?1
               AND (?2 = 1 OR is_deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), bool_to_int(include_deleted)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_course_row(row)?));
        }

        Ok(None)
    }

    fn list_courses(&self, query: &CourseListQuery) -> RepoResult<Vec<Course>> {
        let mut sql = format!("{COURSE_SELECT_SQL} WHERE 1 = 1");
        if !query.include_deleted {
            sql.push_str(" AND is_deleted = 0");
        }
        if query.selected_only {
            sql.push_str(" AND selected = 1");
        }
        sql.push_str(" ORDER BY position ASC, uuid ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut courses = Vec::new();

        while let Some(row) = rows.next()? {
            courses.push(parse_course_row(row)?);
        }

        Ok(courses)
    }

    fn soft_delete_course(&self, id: CourseId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE courses
             SET
                is_deleted = 1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn replace_courses(&self, courses: &[Course]) -> RepoResult<()> {
        for course in courses {
            course.validate()?;
        }

        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM courses;", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO courses (
                    uuid,
                    name,
                    category,
                    credits,
                    term_spec,
                    year,
                    selected,
                    notes,
                    prerequisite,
                    is_deleted,
                    position
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            )?;
            for (position, course) in courses.iter().enumerate() {
                stmt.execute(params![
                    course.uuid.to_string(),
                    course.name.as_str(),
                    course.category.as_str(),
                    course.credits,
                    course.term_spec.as_str(),
                    course.year,
                    bool_to_int(course.selected),
                    course.notes.as_str(),
                    course.prerequisite.as_str(),
                    bool_to_int(course.is_deleted),
                    position as i64,
                ])?;
            }
        }
        tx.commit()?;

        Ok(())
    }
}

/// Verifies schema version and required table/column layout for a repo.
///
/// Shared by the course and settings repositories.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    table: &'static str,
    required_columns: &'static [&'static str],
) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = migrations::latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>("name")?);
    }

    if columns.is_empty() {
        return Err(RepoError::MissingRequiredTable(table));
    }
    for &required in required_columns {
        if !columns.iter().any(|column| column == required) {
            return Err(RepoError::MissingRequiredColumn {
                table,
                column: required,
            });
        }
    }

    Ok(())
}

fn parse_course_row(row: &Row<'_>) -> RepoResult<Course> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in courses.uuid"))
    })?;

    let course = Course {
        uuid,
        name: row.get("name")?,
        category: row.get("category")?,
        credits: row.get("credits")?,
        term_spec: row.get("term_spec")?,
        year: row.get("year")?,
        selected: int_to_bool(row.get("selected")?, "courses.selected")?,
        notes: row.get("notes")?,
        prerequisite: row.get("prerequisite")?,
        is_deleted: int_to_bool(row.get("is_deleted")?, "courses.is_deleted")?,
    };
    course.validate()?;
    Ok(course)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}
