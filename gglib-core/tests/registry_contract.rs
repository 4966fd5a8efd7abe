//! Storage-contract tests run against both backends, plus SQLite-specific
//! durability checks that need a real file.

use gglib_core::error::RegistryError;
use gglib_core::model::NewModel;
use gglib_core::registry::Registry;
use gglib_core::store::{MemoryStore, ModelStore, SqliteStore};
use std::path::PathBuf;
use tempfile::TempDir;

fn sample(name: &str, path: &str) -> NewModel {
    NewModel {
        name: name.into(),
        parameters: 7.0,
        max_context: 2048,
        file_path: PathBuf::from(path),
        file_size: 100,
    }
}

fn backends() -> Vec<(&'static str, Box<dyn ModelStore>)> {
    vec![
        ("memory", Box::new(MemoryStore::new())),
        ("sqlite", Box::new(SqliteStore::open_in_memory().unwrap())),
    ]
}

#[test]
fn add_then_get_round_trips_every_field() {
    for (backend, store) in backends() {
        let mut reg = Registry::new(store);
        let model = sample("Llama-2-7B-Chat", "/models/llama-2-7b-chat.gguf");
        let added = reg.add(&model).unwrap();
        let fetched = reg.get_by_id(added.id).unwrap().unwrap();

        assert_eq!(fetched, added, "backend {backend}");
        assert_eq!(fetched.name, model.name, "backend {backend}");
        assert_eq!(fetched.file_path, model.file_path, "backend {backend}");
    }
}

#[test]
fn duplicate_path_leaves_catalog_unchanged() {
    for (backend, store) in backends() {
        let mut reg = Registry::new(store);
        reg.add(&sample("m1", "/tmp/a.gguf")).unwrap();
        let before = reg.list().unwrap();

        let err = reg.add(&sample("m2", "/tmp/a.gguf")).unwrap_err();
        assert!(
            matches!(err, RegistryError::DuplicatePath { .. }),
            "backend {backend}"
        );
        assert_eq!(reg.list().unwrap(), before, "backend {backend}");
    }
}

#[test]
fn list_is_insertion_ordered_with_ascending_ids() {
    for (backend, store) in backends() {
        let mut reg = Registry::new(store);
        for (name, path) in [("a", "/m/a.gguf"), ("b", "/m/b.gguf"), ("c", "/m/c.gguf")] {
            reg.add(&sample(name, path)).unwrap();
        }

        let listed = reg.list().unwrap();
        let names: Vec<&str> = listed.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"], "backend {backend}");
        assert!(
            listed.windows(2).all(|w| w[0].id < w[1].id),
            "backend {backend}: ids must strictly ascend"
        );
    }
}

#[test]
fn empty_catalog_lists_empty_not_absent() {
    for (backend, store) in backends() {
        let reg = Registry::new(store);
        assert_eq!(reg.list().unwrap(), Vec::new(), "backend {backend}");
    }
}

#[test]
fn invalid_records_never_reach_storage() {
    for (backend, store) in backends() {
        let mut reg = Registry::new(store);

        let mut zero_ctx = sample("m", "/tmp/a.gguf");
        zero_ctx.max_context = 0;
        assert!(
            matches!(
                reg.add(&zero_ctx).unwrap_err(),
                RegistryError::InvalidRecord { .. }
            ),
            "backend {backend}"
        );

        let mut negative_params = sample("m", "/tmp/b.gguf");
        negative_params.parameters = -1.0;
        assert!(
            matches!(
                reg.add(&negative_params).unwrap_err(),
                RegistryError::InvalidRecord { .. }
            ),
            "backend {backend}"
        );

        assert!(reg.list().unwrap().is_empty(), "backend {backend}");
    }
}

#[test]
fn sqlite_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("models.db");

    let first_id = {
        let mut reg = Registry::open(&db_path).unwrap();
        reg.add(&sample("m1", "/tmp/a.gguf")).unwrap().id
    };

    let mut reg = Registry::open(&db_path).unwrap();
    let fetched = reg.get_by_id(first_id).unwrap().unwrap();
    assert_eq!(fetched.name, "m1");

    // The unique constraint holds across reopen too.
    let err = reg.add(&sample("m2", "/tmp/a.gguf")).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicatePath { .. }));
    assert_eq!(reg.list().unwrap().len(), 1);
}

#[test]
fn sqlite_ids_keep_ascending_across_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("models.db");

    {
        let mut reg = Registry::open(&db_path).unwrap();
        assert_eq!(reg.add(&sample("m1", "/tmp/a.gguf")).unwrap().id, 1);
    }
    {
        let mut reg = Registry::open(&db_path).unwrap();
        assert_eq!(reg.add(&sample("m2", "/tmp/b.gguf")).unwrap().id, 2);
    }
}
