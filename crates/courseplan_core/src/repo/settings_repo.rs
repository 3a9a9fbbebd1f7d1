//! Plan settings repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the single plan configuration document.
//! - Reject invalid configuration before anything is written.
//!
//! # Invariants
//! - `save_settings` validates first; an unknown overflow target never
//!   reaches storage.
//! - `load_settings` falls back to the built-in defaults when nothing has
//!   been persisted yet.
//! - The configuration lives in a single row; saving replaces it whole.

use crate::model::settings::PlanSettings;
use crate::repo::course_repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

const SETTINGS_TABLE: &str = "plan_settings";
const SETTINGS_REQUIRED_COLUMNS: &[&str] = &["id", "document", "updated_at"];

/// Repository interface for plan configuration.
pub trait SettingsRepository {
    /// Loads the persisted configuration, or defaults when absent.
    fn load_settings(&self) -> RepoResult<PlanSettings>;
    /// Validates and persists the configuration as the single settings row.
    fn save_settings(&self, settings: &PlanSettings) -> RepoResult<()>;
}

/// SQLite-backed settings repository.
pub struct SqliteSettingsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettingsRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, SETTINGS_TABLE, SETTINGS_REQUIRED_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl SettingsRepository for SqliteSettingsRepository<'_> {
    fn load_settings(&self) -> RepoResult<PlanSettings> {
        let document: Option<String> = self
            .conn
            .query_row("SELECT document FROM plan_settings WHERE id = 1;", [], |row| {
                row.get(0)
            })
            .optional()?;

        let Some(document) = document else {
            return Ok(PlanSettings::default());
        };

        let settings: PlanSettings = serde_json::from_str(&document).map_err(|err| {
            RepoError::InvalidData(format!("invalid plan_settings document: {err}"))
        })?;
        // Persisted state must satisfy the same invariants as updates.
        settings.validate()?;
        Ok(settings)
    }

    fn save_settings(&self, settings: &PlanSettings) -> RepoResult<()> {
        settings.validate()?;

        let document = serde_json::to_string(settings).map_err(|err| {
            RepoError::InvalidData(format!("failed to encode plan settings: {err}"))
        })?;

        self.conn.execute(
            "INSERT INTO plan_settings (id, document, updated_at)
             VALUES (1, ?1, strftime('%s', 'now') * 1000)
             ON CONFLICT (id) DO UPDATE SET
                document = excluded.document,
                updated_at = excluded.updated_at;",
            params![document],
        )?;

        Ok(())
    }
}
