//! # gglib-core — GGUF model catalog and launcher
//!
//! This crate provides the library half of gglib: a persistent catalog of
//! local GGUF model files and a foreground launcher for llama.cpp's
//! `llama-server` and `llama-cli` binaries.
//!
//! The catalog lives behind the [`store::ModelStore`] trait with a SQLite
//! production backend and an in-memory backend for tests. The launcher
//! supervises a single child process per call and guarantees the child is
//! gone before the call returns, on every exit path.

pub mod config;
pub mod error;
pub mod launcher;
pub mod model;
pub mod registry;
pub mod store;
pub mod validate;

// Re-exports
pub use config::{GglibConfig, load_config};
pub use error::{LaunchError, RegistryError};
pub use launcher::{LaunchOutcome, Launcher};
pub use model::{ModelRecord, NewModel};
pub use registry::Registry;
