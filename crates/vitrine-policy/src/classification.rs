//! Per-path sensitivity declarations.
//!
//! # Design
//! - A table records every path declared by any source together with whether at
//!   least one declaration was truthy.
//! - Declaring the same path again never clears an earlier truthy flag; the
//!   classification is an OR across slots.

use std::collections::HashMap;

/// Whether a declaration flag marks its path.
///
/// Empty strings and `"0"` are falsy, any other value is truthy.
#[must_use]
pub fn is_truthy_flag(flag: &str) -> bool {
    !flag.is_empty() && flag != "0"
}

/// Declarations of one classification kind (sensitive or environment), keyed by
/// scope-relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationTable {
    paths: HashMap<String, bool>,
}

impl ClassificationTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one declaration for `path`.
    pub fn declare(&mut self, path: impl Into<String>, flag: &str) {
        let flagged = is_truthy_flag(flag);
        self.paths
            .entry(path.into())
            .and_modify(|current| *current |= flagged)
            .or_insert(flagged);
    }

    /// Builder form of [`ClassificationTable::declare`].
    #[must_use]
    pub fn with(mut self, path: impl Into<String>, flag: &str) -> Self {
        self.declare(path, flag);
        self
    }

    /// Fold every declaration of `other` into this table.
    pub fn absorb(&mut self, other: &Self) {
        for (path, flagged) in &other.paths {
            self.paths
                .entry(path.clone())
                .and_modify(|current| *current |= *flagged)
                .or_insert(*flagged);
        }
    }

    /// Whether any declaration, truthy or not, names `path`.
    #[must_use]
    pub fn is_declared(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }

    /// Whether at least one declaration for `path` is truthy.
    #[must_use]
    pub fn is_flagged(&self, path: &str) -> bool {
        self.paths.get(path).copied().unwrap_or(false)
    }

    /// Number of distinct declared paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no path has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Declared paths with their folded flag, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.paths
            .iter()
            .map(|(path, flagged)| (path.as_str(), *flagged))
    }
}

impl<P, F> FromIterator<(P, F)> for ClassificationTable
where
    P: Into<String>,
    F: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (P, F)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (path, flag) in iter {
            table.declare(path, flag.as_ref());
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_follows_flag_string() {
        assert!(is_truthy_flag("1"));
        assert!(is_truthy_flag("yes"));
        assert!(!is_truthy_flag("0"));
        assert!(!is_truthy_flag(""));
    }

    #[test]
    fn later_falsy_slot_does_not_clear_truthy_one() {
        let table = ClassificationTable::new()
            .with("web/test/key", "1")
            .with("web/test/key", "0");
        assert!(table.is_flagged("web/test/key"));

        let reversed = ClassificationTable::new()
            .with("web/test/key", "")
            .with("web/test/key", "1");
        assert!(reversed.is_flagged("web/test/key"));
    }

    #[test]
    fn falsy_declaration_is_declared_but_not_flagged() {
        let table: ClassificationTable = [("web/test/key", "0")].into_iter().collect();
        assert!(table.is_declared("web/test/key"));
        assert!(!table.is_flagged("web/test/key"));
        assert!(!table.is_declared("web/test/other"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn absorb_ors_overlapping_paths() {
        let mut sensitive = ClassificationTable::new().with("a", "0").with("b", "1");
        let excluded = ClassificationTable::new().with("a", "1").with("c", "");
        sensitive.absorb(&excluded);

        assert!(sensitive.is_flagged("a"));
        assert!(sensitive.is_flagged("b"));
        assert!(sensitive.is_declared("c"));
        assert!(!sensitive.is_flagged("c"));
        assert_eq!(sensitive.iter().filter(|(_, flagged)| *flagged).count(), 2);
    }
}
