//! Flag store: small named payloads that outlive a single request.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;
use vitrine_policy::FlagLookup;

use crate::error::ConfigResult;
use crate::store::{read_json, write_json_atomically};

#[async_trait]
/// Abstraction over flag backends.
pub trait FlagStore: Send + Sync {
    /// Read the flag stored under `code`.
    async fn get_flag(&self, code: &str) -> ConfigResult<FlagLookup>;
    /// Create or replace the flag stored under `code`.
    async fn save_flag(&self, code: &str, value: Value) -> ConfigResult<()>;
}

/// Flags persisted as a single JSON object on disk.
#[derive(Debug)]
pub struct FileFlagStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileFlagStore {
    /// Store backed by the JSON document at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> ConfigResult<BTreeMap<String, Value>> {
        Ok(read_json(&self.path, "read_flags").await?.unwrap_or_default())
    }
}

#[async_trait]
impl FlagStore for FileFlagStore {
    async fn get_flag(&self, code: &str) -> ConfigResult<FlagLookup> {
        let mut flags = self.read_all().await?;
        Ok(flags.remove(code).into())
    }

    async fn save_flag(&self, code: &str, value: Value) -> ConfigResult<()> {
        let guard = self.write_lock.lock().await;
        let mut flags = self.read_all().await?;
        flags.insert(code.to_string(), value);
        write_json_atomically(&self.path, &flags, "write_flags").await?;
        drop(guard);
        debug!(flag = code, "flag saved");
        Ok(())
    }
}

/// Process-local flag store.
#[derive(Debug, Default)]
pub struct MemoryFlagStore {
    flags: Mutex<BTreeMap<String, Value>>,
}

impl MemoryFlagStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlagStore for MemoryFlagStore {
    async fn get_flag(&self, code: &str) -> ConfigResult<FlagLookup> {
        Ok(self.flags.lock().await.get(code).cloned().into())
    }

    async fn save_flag(&self, code: &str, value: Value) -> ConfigResult<()> {
        self.flags.lock().await.insert(code.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn file_store_round_trips_and_replaces() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileFlagStore::new(dir.path().join("flags.json"));

        assert_eq!(store.get_flag("attempts").await?, FlagLookup::Absent);
        store.save_flag("attempts", json!(3)).await?;
        store.save_flag("other", Value::Null).await?;
        assert_eq!(store.get_flag("attempts").await?, FlagLookup::Present(json!(3)));
        assert!(store.get_flag("other").await?.is_present());

        store.save_flag("attempts", json!(2)).await?;
        assert_eq!(store.get_flag("attempts").await?, FlagLookup::Present(json!(2)));
        assert_eq!(store.get_flag("missing").await?, FlagLookup::Absent);
        Ok(())
    }

    #[tokio::test]
    async fn memory_store_tracks_presence() -> anyhow::Result<()> {
        let store = MemoryFlagStore::new();
        store.save_flag("code", json!("x")).await?;
        assert!(store.get_flag("code").await?.is_present());
        assert!(!store.get_flag("other").await?.is_present());
        Ok(())
    }
}
