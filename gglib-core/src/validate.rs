//! Model file acceptance checks.
//!
//! The registry and launcher never inspect the file themselves; this gate
//! runs at the shell boundary, before `add` and before a launch.

use std::path::Path;

/// Whether `path` points at a usable GGUF model file: it exists, is a
/// regular file, and carries the `gguf` extension (case-insensitive).
/// The file contents are never read.
pub fn is_model_file(path: &Path) -> bool {
    let has_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gguf"));
    has_ext && path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_accepts_gguf_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.gguf");
        std::fs::write(&path, b"stub").unwrap();
        assert!(is_model_file(&path));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.GGUF");
        std::fs::write(&path, b"stub").unwrap();
        assert!(is_model_file(&path));
    }

    #[test]
    fn test_rejects_missing_file() {
        assert!(!is_model_file(Path::new("/no/such/model.gguf")));
    }

    #[test]
    fn test_rejects_wrong_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.bin");
        std::fs::write(&path, b"stub").unwrap();
        assert!(!is_model_file(&path));
    }

    #[test]
    fn test_rejects_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.gguf");
        std::fs::create_dir(&path).unwrap();
        assert!(!is_model_file(&path));
    }
}
