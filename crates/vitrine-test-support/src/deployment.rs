//! Scratch deployment directories.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tempfile::TempDir;

/// Temporary deployment directory removed on drop.
#[derive(Debug)]
pub struct TempDeployment {
    dir: TempDir,
}

impl TempDeployment {
    /// Create an empty deployment directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("vitrine-deployment-")
            .tempdir()
            .context("failed to create temporary deployment directory")?;
        Ok(Self { dir })
    }

    /// Root of the deployment.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a file inside the deployment.
    #[must_use]
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `value` as pretty JSON to `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_json(&self, name: &str, value: &Value) -> Result<()> {
        let payload = serde_json::to_string_pretty(value)?;
        fs::write(self.file(name), payload).with_context(|| format!("failed to write {name}"))
    }

    /// Read `name` back as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or not valid JSON.
    pub fn read_json(&self, name: &str) -> Result<Value> {
        let raw = fs::read(self.file(name)).with_context(|| format!("failed to read {name}"))?;
        serde_json::from_slice(&raw).with_context(|| format!("{name} is not valid JSON"))
    }
}
