//! Hash of the dumped deployment configuration.
//!
//! # Design
//! - The hash covers the serialized document; section maps are key-sorted, so
//!   equal documents hash equally.
//! - The last dumped hash lives in the flag store alongside its timestamp.

use std::fmt::{self, Display, Formatter};

use chrono::Utc;
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::defaults::CONFIG_HASH_FLAG_CODE;
use crate::error::{ConfigError, ConfigResult};
use crate::flags::FlagStore;
use crate::model::ConfigDocument;

/// Hex-encoded SHA-256 of a deployment configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigHash(String);

impl ConfigHash {
    /// Hash `document`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized.
    pub fn compute(document: &ConfigDocument) -> ConfigResult<Self> {
        let bytes = serde_json::to_vec(document).map_err(|source| ConfigError::Serialize {
            operation: "hash_deployment_config",
            source,
        })?;
        let digest = Sha256::digest(&bytes);
        Ok(Self(hex::encode(digest)))
    }

    /// Hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Persist this hash as the last dumped one.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag store cannot be written.
    pub async fn record(&self, flags: &dyn FlagStore) -> ConfigResult<()> {
        flags
            .save_flag(
                CONFIG_HASH_FLAG_CODE,
                json!({ "hash": self.0, "recorded_at": Utc::now().to_rfc3339() }),
            )
            .await?;
        debug!(hash = %self.0, "config hash recorded");
        Ok(())
    }

    /// Hash recorded by the last dump, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag store cannot be read.
    pub async fn stored(flags: &dyn FlagStore) -> ConfigResult<Option<Self>> {
        Ok(flags
            .get_flag(CONFIG_HASH_FLAG_CODE)
            .await?
            .into_option()
            .and_then(|payload| {
                payload
                    .get("hash")
                    .and_then(serde_json::Value::as_str)
                    .map(|hash| Self(hash.to_string()))
            }))
    }

    /// Whether `document` still matches the hash recorded by the last dump.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing or the flag lookup fails.
    pub async fn is_current(document: &ConfigDocument, flags: &dyn FlagStore) -> ConfigResult<bool> {
        let current = Self::compute(document)?;
        Ok(Self::stored(flags).await?.is_some_and(|stored| stored == current))
    }
}

impl Display for ConfigHash {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}
