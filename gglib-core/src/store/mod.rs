//! Storage backends for the model catalog.
//!
//! The registry is storage-engine-agnostic: anything satisfying
//! [`ModelStore`] can sit behind it. Two implementations are provided —
//! [`SqliteStore`] for production and [`MemoryStore`] for fast, isolated
//! tests that never touch a filesystem.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::RegistryError;
use crate::model::{ModelRecord, NewModel};
use chrono::{DateTime, Utc};

/// Capability contract for catalog storage.
///
/// Implementations must guarantee: durability across process restarts
/// (where the backend is durable at all), atomic single-record insert,
/// uniqueness of `file_path`, and insertion-ordered listing.
pub trait ModelStore: Send {
    /// Insert a record, returning it with its assigned id.
    ///
    /// Ids ascend and are never reused. A duplicate `file_path` fails with
    /// [`RegistryError::DuplicatePath`] and leaves the store exactly as it
    /// was — the uniqueness check is the backend's own constraint, not a
    /// read-then-write in application code.
    fn insert(
        &mut self,
        model: &NewModel,
        created_on: DateTime<Utc>,
    ) -> Result<ModelRecord, RegistryError>;

    /// Fetch a record by id. A missing id is `Ok(None)`, not an error.
    fn get_by_id(&self, id: i64) -> Result<Option<ModelRecord>, RegistryError>;

    /// All records in insertion order (ascending id). Empty store yields an
    /// empty vec.
    fn list(&self) -> Result<Vec<ModelRecord>, RegistryError>;
}
