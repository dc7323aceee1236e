//! Deployment configuration documents and system-section flattening.
//!
//! # Design
//! - `ConfigDocument` is the on-disk shape: a JSON object of named sections.
//! - The `system` section nests values as `scope -> [code ->] segments -> value`;
//!   flattening turns it into `ConfigEntry` values, unflattening rebuilds it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use vitrine_policy::{ConfigEntry, ConfigScope};

use crate::error::{ConfigError, ConfigResult};

/// Section holding scoped system configuration.
pub const SYSTEM_SECTION: &str = "system";

/// Named sections persisted in the deployment configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    sections: Map<String, Value>,
}

impl ConfigDocument {
    /// Empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ConfigDocument::set_section`].
    #[must_use]
    pub fn with_section(mut self, name: impl Into<String>, value: Value) -> Self {
        self.set_section(name, value);
        self
    }

    /// Replace (or insert) a section.
    pub fn set_section(&mut self, name: impl Into<String>, value: Value) {
        self.sections.insert(name.into(), value);
    }

    /// Borrow a section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }

    /// Section names in document order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Overlay every section of `other`, replacing sections with the same name.
    pub fn merge(&mut self, other: Self) {
        for (name, value) in other.sections {
            self.sections.insert(name, value);
        }
    }

    /// Whether the document has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Flatten a `system` section into scoped entries.
///
/// # Errors
///
/// Returns an error when the section is not an object, names an unknown scope
/// kind, or a scope body is not an object.
pub fn flatten_system(section: &Value) -> ConfigResult<Vec<ConfigEntry>> {
    let scopes = section
        .as_object()
        .ok_or_else(|| ConfigError::InvalidSection {
            section: SYSTEM_SECTION.to_string(),
            reason: "not_an_object",
        })?;

    let mut entries = Vec::new();
    for (kind, body) in scopes {
        match kind.as_str() {
            "default" => flatten_into(&ConfigScope::Default, body, kind, &mut entries)?,
            "websites" | "stores" => {
                let codes = body.as_object().ok_or_else(|| ConfigError::InvalidSection {
                    section: kind.clone(),
                    reason: "not_an_object",
                })?;
                for (code, values) in codes {
                    let scope = if kind == "websites" {
                        ConfigScope::Websites(code.clone())
                    } else {
                        ConfigScope::Stores(code.clone())
                    };
                    flatten_into(&scope, values, &scope.prefix(), &mut entries)?;
                }
            }
            other => {
                return Err(ConfigError::InvalidScope {
                    scope: other.to_string(),
                });
            }
        }
    }
    Ok(entries)
}

fn flatten_into(
    scope: &ConfigScope,
    body: &Value,
    label: &str,
    entries: &mut Vec<ConfigEntry>,
) -> ConfigResult<()> {
    let map = body.as_object().ok_or_else(|| ConfigError::InvalidSection {
        section: label.to_string(),
        reason: "not_an_object",
    })?;
    for (key, value) in map {
        walk(scope, key.clone(), value, entries);
    }
    Ok(())
}

fn walk(scope: &ConfigScope, path: String, value: &Value, entries: &mut Vec<ConfigEntry>) {
    match value {
        Value::Object(children) => {
            for (key, child) in children {
                walk(scope, format!("{path}/{key}"), child, entries);
            }
        }
        leaf => entries.push(ConfigEntry::scoped(scope.clone(), path, leaf.clone())),
    }
}

/// Rebuild a nested `system` section from scoped entries.
///
/// Later entries win when two paths collide.
#[must_use]
pub fn unflatten_system(entries: &[ConfigEntry]) -> Value {
    let mut root = Map::new();
    for entry in entries {
        let mut segments: Vec<&str> = match &entry.scope {
            ConfigScope::Default => vec!["default"],
            ConfigScope::Websites(code) => vec!["websites", code.as_str()],
            ConfigScope::Stores(code) => vec!["stores", code.as_str()],
        };
        segments.extend(entry.path.split('/'));
        insert_path(&mut root, &segments, entry.value.clone());
    }
    Value::Object(root)
}

fn insert_path(node: &mut Map<String, Value>, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [leaf] => {
            node.insert((*leaf).to_string(), value);
        }
        [head, rest @ ..] => {
            let slot = node
                .entry((*head).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(child) = &mut *slot {
                insert_path(child, rest, value);
            } else {
                let mut child = Map::new();
                insert_path(&mut child, rest, value);
                *slot = Value::Object(child);
            }
        }
    }
}

/// Look up a full scope-qualified path (`default/web/secure/key`) in a `system` section.
#[must_use]
pub fn lookup_path<'a>(section: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('/')
        .try_fold(section, |node, segment| node.as_object()?.get(segment))
}
