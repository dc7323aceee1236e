//! Tri-state result for flag store lookups.
//!
//! Flag stores distinguish "no row" from "row with an empty payload"; the
//! [`FlagLookup`] keeps that distinction explicit instead of folding it into
//! `null`. Callers convert to `bool` at the edge with [`FlagLookup::is_present`].

use serde_json::Value;

/// Outcome of reading a flag by code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagLookup<T = Value> {
    /// A flag row exists and carries this payload.
    Present(T),
    /// No flag row exists for the code.
    Absent,
}

impl<T> FlagLookup<T> {
    /// Whether a flag row exists, regardless of its payload.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Borrow the payload when present.
    #[must_use]
    pub const fn as_ref(&self) -> FlagLookup<&T> {
        match self {
            Self::Present(value) => FlagLookup::Present(value),
            Self::Absent => FlagLookup::Absent,
        }
    }

    /// Convert into an `Option`, dropping the tri-state naming.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent => None,
        }
    }
}

impl<T> From<Option<T>> for FlagLookup<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }
}
