//! SQLite-backed model store.
//!
//! One `models` table keyed by an auto-incrementing id with a `UNIQUE`
//! constraint on `file_path`. SQLite's own transaction and locking
//! guarantees provide insert atomicity and isolation across concurrent
//! process invocations.

use super::ModelStore;
use crate::error::RegistryError;
use crate::model::{ModelRecord, NewModel};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::{Path, PathBuf};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS models (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    parameters REAL NOT NULL,
    max_context INTEGER NOT NULL,
    file_path TEXT NOT NULL UNIQUE,
    file_size INTEGER NOT NULL,
    created_on TEXT NOT NULL
)";

const COLUMNS: &str = "id, name, parameters, max_context, file_path, file_size, created_on";

/// Production catalog store, a single SQLite file.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the catalog database at `path`, creating the schema if needed.
    ///
    /// Open failures (missing directory, permission denial) surface as
    /// [`RegistryError::StorageUnavailable`]; directory creation is the
    /// caller's concern.
    pub fn open(path: &Path) -> Result<Self, RegistryError> {
        let conn = Connection::open(path).map_err(storage_error)?;
        conn.execute(SCHEMA, []).map_err(storage_error)?;
        Ok(Self { conn })
    }

    /// Open a private in-memory database. Same schema and semantics, no
    /// durability; useful for tests that want real SQL behavior.
    pub fn open_in_memory() -> Result<Self, RegistryError> {
        let conn = Connection::open_in_memory().map_err(storage_error)?;
        conn.execute(SCHEMA, []).map_err(storage_error)?;
        Ok(Self { conn })
    }
}

impl ModelStore for SqliteStore {
    fn insert(
        &mut self,
        model: &NewModel,
        created_on: DateTime<Utc>,
    ) -> Result<ModelRecord, RegistryError> {
        let path_text = model.file_path.to_string_lossy().into_owned();
        self.conn
            .execute(
                "INSERT INTO models (name, parameters, max_context, file_path, file_size, created_on)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    model.name,
                    model.parameters,
                    model.max_context,
                    path_text,
                    model.file_size,
                    created_on,
                ],
            )
            .map_err(|e| insert_error(e, &model.file_path))?;

        Ok(ModelRecord {
            id: self.conn.last_insert_rowid(),
            name: model.name.clone(),
            parameters: model.parameters,
            max_context: model.max_context,
            file_path: model.file_path.clone(),
            file_size: model.file_size,
            created_on,
        })
    }

    fn get_by_id(&self, id: i64) -> Result<Option<ModelRecord>, RegistryError> {
        self.conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM models WHERE id = ?1"),
                [id],
                row_to_record,
            )
            .optional()
            .map_err(read_error)
    }

    fn list(&self) -> Result<Vec<ModelRecord>, RegistryError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM models ORDER BY id"))
            .map_err(storage_error)?;

        let rows = stmt.query_map([], row_to_record).map_err(read_error)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(read_error)
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<ModelRecord> {
    Ok(ModelRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        parameters: row.get(2)?,
        max_context: row.get(3)?,
        file_path: PathBuf::from(row.get::<_, String>(4)?),
        file_size: row.get(5)?,
        created_on: row.get(6)?,
    })
}

fn storage_error(e: rusqlite::Error) -> RegistryError {
    RegistryError::StorageUnavailable {
        message: e.to_string(),
    }
}

/// Distinguish the `UNIQUE(file_path)` violation from other statement
/// failures. The constraint fires inside SQLite itself, so the check stays
/// correct under concurrent writers.
fn insert_error(e: rusqlite::Error, path: &Path) -> RegistryError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            RegistryError::DuplicatePath {
                path: path.to_path_buf(),
            }
        }
        _ => storage_error(e),
    }
}

/// Rows that exist but fail to decode mean the schema contract was broken
/// out-of-band; that is corruption, never something to skip over.
fn read_error(e: rusqlite::Error) -> RegistryError {
    match &e {
        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::IntegralValueOutOfRange(..)
        | rusqlite::Error::InvalidColumnType(..) => RegistryError::CorruptRecord {
            message: e.to_string(),
        },
        _ => storage_error(e),
    }
}
