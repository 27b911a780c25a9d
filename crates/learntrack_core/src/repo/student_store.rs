//! Persistence contract for the student collection and its SQLite backend.
//!
//! # Responsibility
//! - Load and save the whole student collection as one opaque blob.
//! - Keep SQL and JSON encoding details inside the persistence boundary.
//!
//! # Invariants
//! - A missing blob loads as an empty collection.
//! - A blob that fails to decode is reported by `load`; the store itself never
//!   rewrites it. The next `save` replaces it, so a caller that falls back to an
//!   empty collection (as `ProfileService` does) discards the unreadable blob on
//!   its first write.
//! - `save` replaces the whole collection atomically.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::student::Student;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key under which the student collection is stored.
pub const STUDENTS_STORAGE_KEY: &str = "studentProfiles";

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage transport or encoding failure.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Persisted blob could not be encoded or decoded.
    Encode(serde_json::Error),
    /// Connection schema is not at the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "invalid persisted student data: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Synchronous get/set of the whole student collection.
pub trait StudentStore {
    fn load(&self) -> StoreResult<Vec<Student>>;
    fn save(&self, students: &[Student]) -> StoreResult<()>;
}

/// SQLite-backed key-value student store.
pub struct SqliteStudentStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentStore<'conn> {
    /// Wraps a connection returned by `db::open_db` / `db::open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let actual_version = current_user_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl StudentStore for SqliteStudentStore<'_> {
    fn load(&self) -> StoreResult<Vec<Student>> {
        let blob: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [STUDENTS_STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match blob {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, students: &[Student]) -> StoreResult<()> {
        let json = serde_json::to_string(students)?;
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, CAST(strftime('%s', 'now') AS INTEGER) * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![STUDENTS_STORAGE_KEY, json],
        )?;
        Ok(())
    }
}
