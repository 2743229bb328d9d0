//! Test utilities shared across the workspace.
//!
//! Available to other crates' tests through the `testing` feature.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// A temporary locales directory, removed on drop.
#[derive(Debug)]
pub struct LocaleFixture {
    dir: TempDir,
}

impl LocaleFixture {
    /// Create an empty locales directory
    pub fn new() -> Self {
        Self {
            dir: create_temp_dir(),
        }
    }

    /// Add a file, creating nested directories as needed
    pub fn with_file(self, name: &str, content: &str) -> Self {
        self.write(name, content);
        self
    }

    /// Write (or overwrite) a file relative to the locales directory
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create locale subdirectory");
        }
        fs::write(&path, content).expect("Failed to write locale file");
        path
    }

    /// Path of the locales directory
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for LocaleFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `(name, content)` pairs into `dir`
pub fn write_locale_files(dir: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create locale subdirectory");
        }
        fs::write(path, content).expect("Failed to write locale file");
    }
}
