//! Export filtering for sensitive and environment-supplied configuration.
//!
//! # Design
//! - A path with a truthy `sensitive` declaration is withheld.
//! - A path with a truthy `environment` declaration is withheld whatever its value.
//! - Withheld paths that are environment-overridable (truthy `environment`
//!   declaration, or declared in both tables) are listed in the notice with the
//!   variable that can supply them.

use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

use tracing::debug;

use crate::classification::ClassificationTable;
use crate::entry::{ConfigEntry, environment_variable_name};

/// Leading sentence of the notice printed when values are withheld.
pub const SENSITIVE_NOTICE_HEADER: &str = "The configuration file doesn't contain sensitive data for security reasons. \
     Sensitive data can be stored in the following environment variables:";

/// How a single path is treated on export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct PathClassification {
    /// Truthy declaration in the sensitive table.
    pub sensitive_by_value: bool,
    /// Truthy declaration in the environment table.
    pub environment_flagged: bool,
    /// Value may be supplied through an environment variable.
    pub environment_overridable: bool,
    /// Entry is dropped from the exported file.
    pub excluded: bool,
}

/// Environment variable advertised for a withheld path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentVariable {
    /// Variable name, e.g. `CONFIG__DEFAULT__WEB__SECURE__KEY`.
    pub name: String,
    /// Scope-relative path the variable supplies.
    pub path: String,
}

/// Operator-facing notice listing withheld values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensitiveNotice {
    variables: Vec<EnvironmentVariable>,
}

impl SensitiveNotice {
    /// Variables in encounter order.
    #[must_use]
    pub fn variables(&self) -> &[EnvironmentVariable] {
        &self.variables
    }
}

impl Display for SensitiveNotice {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(SENSITIVE_NOTICE_HEADER)?;
        for variable in &self.variables {
            write!(formatter, "\n{} for {}", variable.name, variable.path)?;
        }
        Ok(())
    }
}

/// Result of filtering a configuration snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    /// Entries safe to persist, in input order.
    pub entries: Vec<ConfigEntry>,
    /// Entries that were dropped, in input order.
    pub withheld: Vec<ConfigEntry>,
    /// Notice to show the operator; `None` when no variable needs advertising.
    pub notice: Option<SensitiveNotice>,
}

/// Classifies configuration paths against the sensitive and environment tables.
#[derive(Debug, Clone, Default)]
pub struct SensitiveConfigFilter {
    sensitive: ClassificationTable,
    environment: ClassificationTable,
}

impl SensitiveConfigFilter {
    /// Build a filter from the two classification tables.
    #[must_use]
    pub const fn new(sensitive: ClassificationTable, environment: ClassificationTable) -> Self {
        Self {
            sensitive,
            environment,
        }
    }

    /// Sensitive declarations in use.
    #[must_use]
    pub const fn sensitive(&self) -> &ClassificationTable {
        &self.sensitive
    }

    /// Environment declarations in use.
    #[must_use]
    pub const fn environment(&self) -> &ClassificationTable {
        &self.environment
    }

    /// Classify one scope-relative path.
    #[must_use]
    pub fn classify(&self, path: &str) -> PathClassification {
        let sensitive_by_value = self.sensitive.is_flagged(path);
        let environment_flagged = self.environment.is_flagged(path);
        let environment_overridable = environment_flagged
            || (self.sensitive.is_declared(path) && self.environment.is_declared(path));
        PathClassification {
            sensitive_by_value,
            environment_flagged,
            environment_overridable,
            excluded: sensitive_by_value || environment_flagged,
        }
    }

    /// Split `entries` into persisted and withheld sets and build the notice.
    pub fn apply<I>(&self, entries: I) -> FilterOutcome
    where
        I: IntoIterator<Item = ConfigEntry>,
    {
        let mut kept = Vec::new();
        let mut withheld = Vec::new();
        let mut variables = Vec::new();
        let mut seen = HashSet::new();

        for entry in entries {
            let class = self.classify(&entry.path);
            if !class.excluded {
                kept.push(entry);
                continue;
            }
            if class.environment_overridable {
                let name = environment_variable_name(&entry.scope, &entry.path);
                if seen.insert(name.clone()) {
                    variables.push(EnvironmentVariable {
                        name,
                        path: entry.path.clone(),
                    });
                }
            }
            withheld.push(entry);
        }

        debug!(
            kept = kept.len(),
            withheld = withheld.len(),
            advertised = variables.len(),
            "filtered configuration export"
        );

        FilterOutcome {
            entries: kept,
            withheld,
            notice: (!variables.is_empty()).then_some(SensitiveNotice { variables }),
        }
    }
}

/// Filter `entries` against freshly supplied classification tables.
pub fn apply<I>(
    entries: I,
    sensitive: ClassificationTable,
    environment: ClassificationTable,
) -> FilterOutcome
where
    I: IntoIterator<Item = ConfigEntry>,
{
    SensitiveConfigFilter::new(sensitive, environment).apply(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ConfigScope;

    fn paths(entries: &[ConfigEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.path.as_str()).collect()
    }

    #[test]
    fn sensitive_only_path_is_dropped_without_notice() {
        let outcome = apply(
            vec![
                ConfigEntry::new("web/test/test_value_1", ""),
                ConfigEntry::new("web/test/test_sensitive", "1"),
            ],
            ClassificationTable::new().with("web/test/test_sensitive", "1"),
            ClassificationTable::new(),
        );

        assert_eq!(paths(&outcome.entries), vec!["web/test/test_value_1"]);
        assert_eq!(paths(&outcome.withheld), vec!["web/test/test_sensitive"]);
        assert!(outcome.notice.is_none());
    }

    #[test]
    fn falsy_sensitive_flag_keeps_value() {
        let outcome = apply(
            vec![ConfigEntry::new("web/test/test_sensitive2", "secret")],
            ClassificationTable::new().with("web/test/test_sensitive2", "0"),
            ClassificationTable::new(),
        );
        assert_eq!(paths(&outcome.entries), vec!["web/test/test_sensitive2"]);
        assert!(outcome.withheld.is_empty());
    }

    #[test]
    fn environment_flag_excludes_regardless_of_value() {
        let filter = SensitiveConfigFilter::new(
            ClassificationTable::new(),
            ClassificationTable::new().with("web/test/test_environment9", "1"),
        );
        let class = filter.classify("web/test/test_environment9");
        assert!(class.excluded);
        assert!(class.environment_overridable);
        assert!(!class.sensitive_by_value);

        let outcome = filter.apply(vec![ConfigEntry::new("web/test/test_environment9", "")]);
        assert!(outcome.entries.is_empty());
        let notice = outcome.notice.expect("notice for environment path");
        assert_eq!(
            notice.variables()[0].name,
            "CONFIG__DEFAULT__WEB__TEST__TEST_ENVIRONMENT9"
        );
    }

    #[test]
    fn compound_declaration_is_advertised_even_with_falsy_environment_flag() {
        let filter = SensitiveConfigFilter::new(
            ClassificationTable::new().with("web/test/test_sensitive_environment5", "1"),
            ClassificationTable::new().with("web/test/test_sensitive_environment5", "0"),
        );
        let outcome = filter.apply(vec![ConfigEntry::new(
            "web/test/test_sensitive_environment5",
            "value",
        )]);
        assert!(outcome.entries.is_empty());
        let notice = outcome.notice.expect("notice");
        assert_eq!(
            notice.to_string(),
            format!(
                "{SENSITIVE_NOTICE_HEADER}\nCONFIG__DEFAULT__WEB__TEST__TEST_SENSITIVE_ENVIRONMENT5 for web/test/test_sensitive_environment5"
            )
        );
    }

    #[test]
    fn compound_declaration_with_both_flags_falsy_is_kept() {
        let filter = SensitiveConfigFilter::new(
            ClassificationTable::new().with("web/test/key", "0"),
            ClassificationTable::new().with("web/test/key", ""),
        );
        let class = filter.classify("web/test/key");
        assert!(class.environment_overridable);
        assert!(!class.excluded);
        let outcome = filter.apply(vec![ConfigEntry::new("web/test/key", "v")]);
        assert_eq!(outcome.entries.len(), 1);
        assert!(outcome.notice.is_none());
    }

    #[test]
    fn variables_are_deduplicated_per_scope() {
        let filter = SensitiveConfigFilter::new(
            ClassificationTable::new(),
            ClassificationTable::new().with("payment/key", "1"),
        );
        let outcome = filter.apply(vec![
            ConfigEntry::new("payment/key", "a"),
            ConfigEntry::scoped(ConfigScope::Websites("base".into()), "payment/key", "b"),
            ConfigEntry::new("payment/key", "c"),
        ]);
        assert_eq!(outcome.withheld.len(), 3);
        let names: Vec<&str> = outcome
            .notice
            .as_ref()
            .map(|notice| {
                notice
                    .variables()
                    .iter()
                    .map(|variable| variable.name.as_str())
                    .collect()
            })
            .unwrap_or_default();
        assert_eq!(
            names,
            vec![
                "CONFIG__DEFAULT__PAYMENT__KEY",
                "CONFIG__WEBSITES__BASE__PAYMENT__KEY"
            ]
        );
    }

    #[test]
    fn unclassified_paths_pass_through_untouched() {
        let entries = vec![
            ConfigEntry::new("web//odd", "x"),
            ConfigEntry::new("", serde_json::Value::Null),
        ];
        let outcome = apply(
            entries.clone(),
            ClassificationTable::new().with("other", "1"),
            ClassificationTable::new().with("another", "1"),
        );
        assert_eq!(outcome.entries, entries);
        assert!(outcome.notice.is_none());
    }
}
