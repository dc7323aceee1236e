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

//! File-backed configuration collaborators for the Vitrine admin commands.
//!
//! Layout: `model.rs` (documents and system-section flattening), `store.rs`
//! (deployment config reader/writer), `system.rs` (system config source and token
//! store), `flags.rs` (flag store), `classification.rs` (policy tables),
//! `hash.rs` (dump hash), `analytics.rs` (subscription status), `dump.rs`
//! (config export), `deployment.rs` (directory wiring).

pub mod analytics;
pub mod classification;
pub mod defaults;
pub mod deployment;
pub mod dump;
pub mod error;
pub mod flags;
pub mod hash;
pub mod model;
pub mod store;
pub mod system;

pub use analytics::SubscriptionStatusProvider;
pub use classification::{ClassificationPolicy, Declarations};
pub use deployment::Deployment;
pub use dump::{ConfigDumper, DumpReport};
pub use error::{ConfigError, ConfigResult};
pub use flags::{FileFlagStore, FlagStore, MemoryFlagStore};
pub use hash::ConfigHash;
pub use model::{ConfigDocument, SYSTEM_SECTION, flatten_system, lookup_path, unflatten_system};
pub use store::DeploymentConfigStore;
pub use system::{
    ConfigTokenStore, FileSystemConfig, MemorySystemConfig, SystemConfigSource, TokenStore,
    is_truthy_value,
};
