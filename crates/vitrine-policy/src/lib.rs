#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Pure policy rules for the Vitrine administrative tooling.
//!
//! Layout: `status.rs` (subscription status resolution), `flag.rs` (tri-state flag
//! lookups), `entry.rs` (scoped configuration entries), `classification.rs`
//! (per-path sensitivity declarations), `filter.rs` (export filtering and notices).
//!
//! Nothing in this crate performs I/O; callers hand in snapshots and receive values.

pub mod classification;
pub mod entry;
pub mod filter;
pub mod flag;
pub mod status;

pub use classification::{ClassificationTable, is_truthy_flag};
pub use entry::{ConfigEntry, ConfigScope, environment_variable_name};
pub use filter::{
    EnvironmentVariable, FilterOutcome, PathClassification, SENSITIVE_NOTICE_HEADER,
    SensitiveConfigFilter, SensitiveNotice, apply,
};
pub use flag::FlagLookup;
pub use status::{StatusResolver, SubscriptionStatus};
