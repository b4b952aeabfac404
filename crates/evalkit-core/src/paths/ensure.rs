//! Directory creation and verification utilities.
//!
//! The `DirectoryCreationStrategy` enum does NOT include interactive/prompt
//! variants; callers that need to ask the user decide before calling.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use tracing::debug;

use super::error::PathError;

/// Strategy for how to handle missing directories when ensuring they exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectoryCreationStrategy {
    /// Create directories automatically if they are missing.
    #[default]
    AutoCreate,
    /// Do not create directories; return an error if missing.
    Disallow,
}

/// Ensure the provided directory exists and is writable according to the chosen strategy.
///
/// If the directory exists, verifies it's actually a directory and is writable.
/// If the directory doesn't exist, behavior depends on `strategy`:
/// - `AutoCreate`: Creates the directory (and parents)
/// - `Disallow`: Returns an error
pub fn ensure_directory(path: &Path, strategy: DirectoryCreationStrategy) -> Result<(), PathError> {
    if path.as_os_str().is_empty() {
        return Err(PathError::EmptyPath);
    }

    if path.exists() {
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }
    } else {
        match strategy {
            DirectoryCreationStrategy::AutoCreate => {
                debug!(path = %path.display(), "creating directory");
                fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
            }
            DirectoryCreationStrategy::Disallow => {
                return Err(PathError::DirectoryNotFound(path.to_path_buf()));
            }
        }
    }

    verify_writable(path)?;
    Ok(())
}

/// Verify a directory is writable by attempting to create a test file.
pub fn verify_writable(path: &Path) -> Result<(), PathError> {
    let test_file = path.join(".evalkit_write_test");
    let result = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&test_file);

    match result {
        Ok(mut file) => {
            file.write_all(b"test")
                .map_err(|e| PathError::NotWritable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;
            drop(file);
            let _ = fs::remove_file(&test_file);
            Ok(())
        }
        Err(err) => Err(PathError::NotWritable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_auto_create_makes_nested_dirs() {
        let tmp = tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");

        ensure_directory(&nested, DirectoryCreationStrategy::AutoCreate).unwrap();

        assert!(nested.is_dir());
        assert!(!nested.join(".evalkit_write_test").exists());
    }

    #[test]
    fn test_disallow_missing_dir_errors() {
        let tmp = tempdir().unwrap();
        let missing = tmp.path().join("missing");

        let result = ensure_directory(&missing, DirectoryCreationStrategy::Disallow);

        assert!(matches!(result, Err(PathError::DirectoryNotFound(_))));
        assert!(!missing.exists());
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let result = ensure_directory(&file, DirectoryCreationStrategy::AutoCreate);

        assert!(matches!(result, Err(PathError::NotADirectory(_))));
    }

    #[test]
    fn test_empty_path_rejected() {
        let result = ensure_directory(Path::new(""), DirectoryCreationStrategy::AutoCreate);
        assert!(matches!(result, Err(PathError::EmptyPath)));
    }
}
