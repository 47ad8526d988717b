//! Test utilities for modgraph-lib.
//!
//! Helpers for laying out workspace trees in a temporary directory.

use std::path::Path;

use tempfile::TempDir;

/// Create an empty file (and its parent directories) under `root`.
pub fn touch(root: &Path, relative: &str) {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  std::fs::write(&path, "").unwrap();
}

/// Create a temporary workspace containing the given (empty) files.
pub fn workspace(files: &[&str]) -> TempDir {
  let temp = TempDir::new().unwrap();
  for file in files {
    touch(temp.path(), file);
  }
  temp
}
