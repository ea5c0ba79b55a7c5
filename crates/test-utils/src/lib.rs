//! Shared test utilities for the cross-section workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic cross-section sample sets
//! - Grid and ring generators for contouring tests
//! - Clustered label midpoints for culling tests and benches
//! - CoverageJSON and EDR metadata fixtures
//!
//! Generators return plain tuples and vectors so this crate does not depend
//! on the crates it helps test.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Create a temporary directory holding one file with the given contents.
///
/// Returns the directory guard (delete on drop) and the file path.
pub fn temp_file_with(name: &str, contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::Builder::new()
        .prefix("xsection-test-")
        .tempdir()
        .expect("Failed to create temp directory");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write temp file");
    (dir, path)
}
