//! File-backed deployment configuration store.
//!
//! # Design
//! - Reads tolerate a missing file and return an empty document.
//! - Writes go to a sibling temporary file that is renamed over the target, so
//!   readers never observe a half-written document.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::error::{ConfigError, ConfigResult};
use crate::model::ConfigDocument;

/// Reader/writer for the shared deployment configuration file.
#[derive(Debug, Clone)]
pub struct DeploymentConfigStore {
    path: PathBuf,
}

impl DeploymentConfigStore {
    /// Store backed by the JSON document at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the current document, or an empty one when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON object.
    pub async fn load(&self) -> ConfigResult<ConfigDocument> {
        Ok(read_json(&self.path, "read_deployment_config")
            .await?
            .unwrap_or_default())
    }

    /// Merge `sections` over the stored document and persist the result.
    ///
    /// Sections not named in `sections` are left untouched. Returns the document
    /// as written.
    ///
    /// # Errors
    ///
    /// Returns an error if the current document cannot be read or the merged
    /// document cannot be written.
    #[instrument(name = "deployment_config.save", skip(self, sections), fields(path = %self.path.display()))]
    pub async fn save(&self, sections: ConfigDocument) -> ConfigResult<ConfigDocument> {
        let mut document = self.load().await?;
        document.merge(sections);
        write_json_atomically(&self.path, &document, "write_deployment_config").await?;
        debug!(sections = document.section_names().count(), "deployment config written");
        Ok(document)
    }
}

/// Read a JSON document, mapping a missing file to `None`.
pub(crate) async fn read_json<T>(path: &Path, operation: &'static str) -> ConfigResult<Option<T>>
where
    T: DeserializeOwned,
{
    let raw = match fs::read(path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(ConfigError::io(operation, path, err)),
    };
    serde_json::from_slice(&raw)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Serialize `value` as pretty JSON and swap it into place.
pub(crate) async fn write_json_atomically<T>(
    path: &Path,
    value: &T,
    operation: &'static str,
) -> ConfigResult<()>
where
    T: Serialize + Sync,
{
    let mut payload = serde_json::to_vec_pretty(value)
        .map_err(|source| ConfigError::Serialize { operation, source })?;
    payload.push(b'\n');

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|err| ConfigError::io(operation, parent, err))?;
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| ConfigError::InvalidSection {
            section: path.display().to_string(),
            reason: "missing_file_name",
        })?;
    let staging = path.with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4()));

    let swapped = match stage(&staging, &payload).await {
        Ok(()) => fs::rename(&staging, path)
            .await
            .map_err(|err| ConfigError::io(operation, path, err)),
        Err(err) => Err(ConfigError::io(operation, &staging, err)),
    };
    if swapped.is_err() && fs::remove_file(&staging).await.is_err() {
        warn!(staging = %staging.display(), "failed to remove staging file");
    }
    swapped
}

/// Write and flush `payload` to disk before it is renamed into place.
async fn stage(staging: &Path, payload: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(staging).await?;
    file.write_all(payload).await?;
    file.sync_all().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn missing_file_loads_empty_document() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = DeploymentConfigStore::new(dir.path().join("config.json"));
        assert!(store.load().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn save_merges_and_leaves_no_staging_files() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = DeploymentConfigStore::new(dir.path().join("etc").join("config.json"));
        store
            .save(ConfigDocument::new().with_section("themes", json!({"frontend/blank": {}})))
            .await?;
        let written = store
            .save(ConfigDocument::new().with_section("system", json!({"default": {}})))
            .await?;

        assert!(written.section("themes").is_some());
        assert_eq!(store.load().await?, written);

        let names: Vec<String> = std::fs::read_dir(dir.path().join("etc"))?
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["config.json".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn failed_swap_leaves_no_staging_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("config.json");
        std::fs::create_dir(&target)?;
        std::fs::write(target.join("occupied"), "x")?;

        let result = write_json_atomically(&target, &json!({"system": {}}), "write_test").await;
        assert!(matches!(result, Err(ConfigError::Io { operation: "write_test", .. })));

        let names: Vec<String> = std::fs::read_dir(dir.path())?
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["config.json".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_json_surfaces_parse_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json")?;
        let result = DeploymentConfigStore::new(&path).load().await;
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
        Ok(())
    }
}
