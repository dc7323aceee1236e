//! Scoped configuration entries.

use std::fmt::{self, Display, Formatter};

use serde_json::Value;

/// Prefix applied to every environment variable that can carry a config value.
pub const ENVIRONMENT_VARIABLE_PREFIX: &str = "CONFIG__";

/// Scope a configuration value applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ConfigScope {
    /// Global default scope.
    #[default]
    Default,
    /// Website scope identified by its code.
    Websites(String),
    /// Store view scope identified by its code.
    Stores(String),
}

impl ConfigScope {
    /// Slash-delimited prefix used when the scope is spelled out in full paths.
    #[must_use]
    pub fn prefix(&self) -> String {
        match self {
            Self::Default => "default".to_string(),
            Self::Websites(code) => format!("websites/{code}"),
            Self::Stores(code) => format!("stores/{code}"),
        }
    }
}

impl Display for ConfigScope {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.prefix())
    }
}

/// A single `(path, value)` pair read from the system configuration.
///
/// `path` is scope-relative (`web/secure/base_url`); the value is carried
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEntry {
    /// Scope the value is stored under.
    pub scope: ConfigScope,
    /// Slash-delimited path relative to the scope.
    pub path: String,
    /// Stored value.
    pub value: Value,
}

impl ConfigEntry {
    /// Entry in the default scope.
    #[must_use]
    pub fn new(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::scoped(ConfigScope::Default, path, value)
    }

    /// Entry in an explicit scope.
    #[must_use]
    pub fn scoped(scope: ConfigScope, path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            scope,
            path: path.into(),
            value: value.into(),
        }
    }

    /// Scope prefix joined with the relative path.
    #[must_use]
    pub fn full_path(&self) -> String {
        format!("{}/{}", self.scope.prefix(), self.path)
    }
}

/// Environment variable able to supply the value of `path` in `scope`.
///
/// `web/test/key` in the default scope becomes `CONFIG__DEFAULT__WEB__TEST__KEY`.
/// Empty segments are kept, so `web//key` yields a run of four underscores.
#[must_use]
pub fn environment_variable_name(scope: &ConfigScope, path: &str) -> String {
    let full = format!("{}/{path}", scope.prefix());
    format!(
        "{ENVIRONMENT_VARIABLE_PREFIX}{}",
        full.to_uppercase().replace('/', "__")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scope_variable_name() {
        assert_eq!(
            environment_variable_name(
                &ConfigScope::Default,
                "web/test/test_sensitive_environment4"
            ),
            "CONFIG__DEFAULT__WEB__TEST__TEST_SENSITIVE_ENVIRONMENT4"
        );
    }

    #[test]
    fn scoped_variable_names_include_code() {
        assert_eq!(
            environment_variable_name(&ConfigScope::Websites("base".into()), "payment/key"),
            "CONFIG__WEBSITES__BASE__PAYMENT__KEY"
        );
        assert_eq!(
            environment_variable_name(&ConfigScope::Stores("en".into()), "payment/key"),
            "CONFIG__STORES__EN__PAYMENT__KEY"
        );
    }

    #[test]
    fn empty_segments_pass_through() {
        assert_eq!(
            environment_variable_name(&ConfigScope::Default, "web//key"),
            "CONFIG__DEFAULT__WEB____KEY"
        );
    }

    #[test]
    fn full_path_joins_scope_prefix() {
        let entry = ConfigEntry::scoped(ConfigScope::Stores("fr".into()), "general/locale", "fr_FR");
        assert_eq!(entry.full_path(), "stores/fr/general/locale");
        assert_eq!(ConfigEntry::new("a/b", "1").full_path(), "default/a/b");
    }
}
