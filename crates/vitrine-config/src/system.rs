//! System configuration source and the token store layered on it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use vitrine_policy::ConfigEntry;

use crate::defaults::ANALYTICS_TOKEN_PATH;
use crate::error::ConfigResult;
use crate::model::{flatten_system, lookup_path};
use crate::store::read_json;

/// Whether a stored config value switches a feature on.
///
/// `true`, non-zero numbers and non-empty strings other than `"0"` are truthy.
#[must_use]
pub fn is_truthy_value(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number
            .as_u64()
            .map(|n| n != 0)
            .or_else(|| number.as_i64().map(|n| n != 0))
            .or_else(|| number.as_f64().map(|n| n != 0.0))
            .unwrap_or(false),
        Value::String(text) => vitrine_policy::is_truthy_flag(text),
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[async_trait]
/// Read access to scoped system configuration.
pub trait SystemConfigSource: Send + Sync {
    /// The whole nested `system` section as one consistent snapshot.
    async fn snapshot(&self) -> ConfigResult<Value>;

    /// Value at a full scope-qualified path such as `default/web/secure/base_url`.
    async fn get(&self, path: &str) -> ConfigResult<Option<Value>> {
        let snapshot = self.snapshot().await?;
        Ok(lookup_path(&snapshot, path).cloned())
    }

    /// Every stored value as flat scoped entries.
    async fn entries(&self) -> ConfigResult<Vec<ConfigEntry>> {
        let snapshot = self.snapshot().await?;
        if snapshot.is_null() {
            return Ok(Vec::new());
        }
        flatten_system(&snapshot)
    }
}

/// System configuration read from a JSON snapshot on disk.
///
/// The file is re-read for every snapshot, so each request sees current values.
#[derive(Debug, Clone)]
pub struct FileSystemConfig {
    path: PathBuf,
}

impl FileSystemConfig {
    /// Source backed by the JSON document at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SystemConfigSource for FileSystemConfig {
    async fn snapshot(&self) -> ConfigResult<Value> {
        Ok(read_json(&self.path, "read_system_config")
            .await?
            .unwrap_or_else(|| Value::Object(Map::new())))
    }
}

/// System configuration held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySystemConfig {
    section: Value,
}

impl MemorySystemConfig {
    /// Source over an already nested `system` section.
    #[must_use]
    pub const fn new(section: Value) -> Self {
        Self { section }
    }
}

#[async_trait]
impl SystemConfigSource for MemorySystemConfig {
    async fn snapshot(&self) -> ConfigResult<Value> {
        Ok(self.section.clone())
    }
}

#[async_trait]
/// Answers whether the analytics service has issued a token.
pub trait TokenStore: Send + Sync {
    /// Whether a usable token is stored, judged against the same `system`
    /// snapshot the caller reads its other signals from.
    async fn token_exists(&self, system: &Value) -> ConfigResult<bool>;
}

/// Token store reading the token from system configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigTokenStore;

#[async_trait]
impl TokenStore for ConfigTokenStore {
    async fn token_exists(&self, system: &Value) -> ConfigResult<bool> {
        Ok(lookup_path(system, ANALYTICS_TOKEN_PATH)
            .and_then(Value::as_str)
            .is_some_and(|token| !token.is_empty()))
    }
}
