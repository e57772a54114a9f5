//! Scratch directories and files for tests that touch the filesystem.

use std::path::{Path, PathBuf};

/// A scratch directory, removed when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("plot_test_")
        .tempdir()
        .expect("Failed to create temporary test directory")
}

/// Write `contents` to `dir/name` and return the full path.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write fixture file");
    path
}
