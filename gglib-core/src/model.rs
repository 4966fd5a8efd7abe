//! Catalog record types for GGUF model files.

use crate::error::RegistryError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metadata for a model file awaiting registration.
///
/// The id and registration timestamp do not exist yet; the registry assigns
/// both at insert time and hands back a [`ModelRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewModel {
    /// Human-readable name. Not required to be unique.
    pub name: String,
    /// Parameter count in billions (e.g. 7.0 for a 7B model).
    pub parameters: f64,
    /// Maximum context window the model supports.
    pub max_context: i64,
    /// Path to the `.gguf` file. Unique across the catalog.
    pub file_path: PathBuf,
    /// File size in bytes, captured at registration time.
    pub file_size: i64,
}

impl NewModel {
    /// Field validation applied before any storage call.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.name.trim().is_empty() {
            return Err(RegistryError::InvalidRecord {
                reason: "name must not be empty".into(),
            });
        }
        if !self.parameters.is_finite() || self.parameters <= 0.0 {
            return Err(RegistryError::InvalidRecord {
                reason: format!(
                    "parameters must be a positive number of billions, got {}",
                    self.parameters
                ),
            });
        }
        if self.max_context <= 0 {
            return Err(RegistryError::InvalidRecord {
                reason: format!("max_context must be positive, got {}", self.max_context),
            });
        }
        if self.file_size < 0 {
            return Err(RegistryError::InvalidRecord {
                reason: format!("file_size must not be negative, got {}", self.file_size),
            });
        }
        Ok(())
    }
}

/// A registered catalog entry. Immutable once stored; callers always receive
/// an owned copy, never shared state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Assigned by the catalog on insert, ascending, never reused.
    pub id: i64,
    pub name: String,
    pub parameters: f64,
    pub max_context: i64,
    pub file_path: PathBuf,
    pub file_size: i64,
    /// Registration timestamp, persisted as RFC 3339 text.
    pub created_on: DateTime<Utc>,
}
