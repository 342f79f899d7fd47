//! Cleanup of the packager's transient build artifacts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CleanError;
use crate::packager::{BUILD_DIR, DIST_DIR};

/// Bytecode cache directory left behind by the interpreter.
const PYCACHE_DIR: &str = "__pycache__";

/// Extension of the packaging descriptor files the packager drops in the
/// working directory.
const SPEC_EXTENSION: &str = "spec";

/// Delete the packager's transient directories and descriptor files in
/// `work_dir`.
///
/// Idempotent: already-absent paths are silently skipped. Returns the paths
/// that were actually removed.
pub fn clean(work_dir: &Path) -> Result<Vec<PathBuf>, CleanError> {
  let mut removed = Vec::new();

  for dir_name in [BUILD_DIR, DIST_DIR, PYCACHE_DIR] {
    let path = work_dir.join(dir_name);
    if remove(&path, |p| fs::remove_dir_all(p))? {
      removed.push(path);
    }
  }

  for path in descriptor_files(work_dir)? {
    if remove(&path, |p| fs::remove_file(p))? {
      removed.push(path);
    }
  }

  Ok(removed)
}

/// Remove a path, treating NotFound as a no-op. Returns whether anything
/// was removed.
fn remove(path: &Path, op: fn(&Path) -> io::Result<()>) -> Result<bool, CleanError> {
  match op(path) {
    Ok(()) => {
      debug!(path = %path.display(), "removed");
      Ok(true)
    }
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
    Err(source) => Err(CleanError::Remove {
      path: path.to_path_buf(),
      source,
    }),
  }
}

/// All `*.spec` files directly under `work_dir`.
fn descriptor_files(work_dir: &Path) -> Result<Vec<PathBuf>, CleanError> {
  let entries = match fs::read_dir(work_dir) {
    Ok(entries) => entries,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
    Err(source) => {
      return Err(CleanError::Remove {
        path: work_dir.to_path_buf(),
        source,
      });
    }
  };

  let mut files = Vec::new();
  for entry in entries {
    let entry = entry.map_err(|source| CleanError::Remove {
      path: work_dir.to_path_buf(),
      source,
    })?;
    let path = entry.path();
    if path.is_file() && path.extension().is_some_and(|ext| ext == SPEC_EXTENSION) {
      files.push(path);
    }
  }
  Ok(files)
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn removes_transient_dirs_and_spec_files() {
    let temp = TempDir::new().unwrap();
    for dir in ["build", "dist", "__pycache__", "src"] {
      fs::create_dir(temp.path().join(dir)).unwrap();
    }
    fs::write(temp.path().join("app.spec"), b"spec").unwrap();
    fs::write(temp.path().join("app.py"), b"code").unwrap();

    let removed = clean(temp.path()).unwrap();

    assert_eq!(removed.len(), 4);
    assert!(!temp.path().join("build").exists());
    assert!(!temp.path().join("dist").exists());
    assert!(!temp.path().join("__pycache__").exists());
    assert!(!temp.path().join("app.spec").exists());
    // Unrelated content is untouched
    assert!(temp.path().join("src").exists());
    assert!(temp.path().join("app.py").exists());
  }

  #[test]
  fn clean_twice_is_idempotent() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("dist")).unwrap();
    fs::write(temp.path().join("app.spec"), b"spec").unwrap();

    let first = clean(temp.path()).unwrap();
    assert_eq!(first.len(), 2);

    let second = clean(temp.path()).unwrap();
    assert!(second.is_empty());
  }

  #[test]
  fn clean_empty_dir_removes_nothing() {
    let temp = TempDir::new().unwrap();
    let removed = clean(temp.path()).unwrap();
    assert!(removed.is_empty());
  }

  #[test]
  fn spec_named_directory_is_not_deleted_as_descriptor() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("weird.spec")).unwrap();

    let removed = clean(temp.path()).unwrap();

    assert!(removed.is_empty());
    assert!(temp.path().join("weird.spec").exists());
  }
}
