//! In-memory model store for tests.

use super::ModelStore;
use crate::error::RegistryError;
use crate::model::{ModelRecord, NewModel};
use chrono::{DateTime, Utc};

/// Vec-backed store satisfying the same contract as the SQLite backend,
/// minus durability. Lets registry behavior be tested without a filesystem.
#[derive(Debug)]
pub struct MemoryStore {
    records: Vec<ModelRecord>,
    next_id: i64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

impl ModelStore for MemoryStore {
    fn insert(
        &mut self,
        model: &NewModel,
        created_on: DateTime<Utc>,
    ) -> Result<ModelRecord, RegistryError> {
        if self.records.iter().any(|r| r.file_path == model.file_path) {
            return Err(RegistryError::DuplicatePath {
                path: model.file_path.clone(),
            });
        }

        let record = ModelRecord {
            id: self.next_id,
            name: model.name.clone(),
            parameters: model.parameters,
            max_context: model.max_context,
            file_path: model.file_path.clone(),
            file_size: model.file_size,
            created_on,
        };
        // next_id only advances, so ids are never reused even if a delete
        // path is added later.
        self.next_id += 1;
        self.records.push(record.clone());
        Ok(record)
    }

    fn get_by_id(&self, id: i64) -> Result<Option<ModelRecord>, RegistryError> {
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<ModelRecord>, RegistryError> {
        Ok(self.records.clone())
    }
}
