//! Test harness for the `routeglue` binary.
//!
//! CLI regression tests live in the `cli` module; the shared fixtures live
//! under `tests/fixtures` at the workspace root.

use std::path::PathBuf;

#[cfg(test)]
pub mod cli;

/// Absolute path to the shared test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    // CARGO_MANIFEST_DIR = .../crates/routeglue-test
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures")
}

/// Absolute path to a named fixture.
pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}
