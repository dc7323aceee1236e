//! Loader for the sensitive/environment classification tables.
//!
//! The policy document is a JSON object with up to three tables, each mapping a
//! scope-relative path to a flag:
//!
//! ```json
//! {
//!   "exclude":     { "payment/gateway/api_key": "1" },
//!   "sensitive":   { "payment/gateway/api_key": "0", "web/secure/key": "1" },
//!   "environment": { "web/secure/base_url": "1" }
//! }
//! ```
//!
//! `exclude` is folded into the sensitive table as an extra declaration slot.
//! A path repeated inside one table keeps every declaration, so a truthy flag
//! is never overwritten by a later falsy one.

use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::{info, warn};
use vitrine_policy::{ClassificationTable, SensitiveConfigFilter};

use crate::error::ConfigResult;
use crate::store::read_json;

/// Classification tables as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassificationPolicy {
    /// Paths never exported.
    pub exclude: Declarations,
    /// Paths whose values are secrets.
    pub sensitive: Declarations,
    /// Paths expected to come from environment variables.
    pub environment: Declarations,
}

/// Every `(path, flag)` pair of one table in document order, duplicates included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations(Vec<(String, Value)>);

impl Declarations {
    /// Number of declarations, counting repeated paths once per occurrence.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table declares nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Declarations in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(path, flag)| (path.as_str(), flag))
    }
}

impl Serialize for Declarations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (path, flag) in &self.0 {
            map.serialize_entry(path, flag)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Declarations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DeclarationsVisitor)
    }
}

struct DeclarationsVisitor;

impl<'de> Visitor<'de> for DeclarationsVisitor {
    type Value = Declarations;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object mapping configuration paths to flags")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut declarations = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry::<String, Value>()? {
            declarations.push(entry);
        }
        Ok(Declarations(declarations))
    }
}

impl ClassificationPolicy {
    /// Load the policy at `path`; a missing file yields empty tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not match the
    /// expected shape.
    pub async fn load(path: &Path) -> ConfigResult<Self> {
        match read_json::<Self>(path, "read_classification").await? {
            Some(policy) => {
                info!(
                    path = %path.display(),
                    exclude = policy.exclude.len(),
                    sensitive = policy.sensitive.len(),
                    environment = policy.environment.len(),
                    "classification tables loaded"
                );
                Ok(policy)
            }
            None => {
                warn!(path = %path.display(), "classification file missing; nothing will be withheld");
                Ok(Self::default())
            }
        }
    }

    /// Sensitive table with the exclude list folded in.
    #[must_use]
    pub fn sensitive_table(&self) -> ClassificationTable {
        let mut table = table_from(&self.sensitive);
        table.absorb(&table_from(&self.exclude));
        table
    }

    /// Environment table.
    #[must_use]
    pub fn environment_table(&self) -> ClassificationTable {
        table_from(&self.environment)
    }

    /// Filter built from both tables.
    #[must_use]
    pub fn filter(&self) -> SensitiveConfigFilter {
        SensitiveConfigFilter::new(self.sensitive_table(), self.environment_table())
    }
}

fn table_from(declarations: &Declarations) -> ClassificationTable {
    declarations
        .iter()
        .map(|(path, flag)| (path, flag_text(flag)))
        .collect()
}

/// Normalise a declared flag to the string form the policy rules expect.
fn flag_text(flag: &Value) -> String {
    match flag {
        Value::String(text) => text.clone(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        other => other.to_string(),
    }
}
