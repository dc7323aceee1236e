//! File-backed wiring for a deployment directory.
//!
//! # Design
//! - One directory holds every document the admin commands touch; see
//!   [`crate::defaults`] for the file names.
//! - Classification tables are read once when the deployment is opened.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::instrument;

use crate::analytics::SubscriptionStatusProvider;
use crate::classification::ClassificationPolicy;
use crate::defaults::{CLASSIFICATION_FILE, DEPLOYMENT_CONFIG_FILE, FLAGS_FILE, SYSTEM_CONFIG_FILE};
use crate::dump::ConfigDumper;
use crate::error::ConfigResult;
use crate::flags::{FileFlagStore, FlagStore};
use crate::store::DeploymentConfigStore;
use crate::system::{ConfigTokenStore, FileSystemConfig, SystemConfigSource};

/// Collaborators rooted at one deployment directory.
#[derive(Clone)]
pub struct Deployment {
    root: PathBuf,
    system: Arc<dyn SystemConfigSource>,
    flags: Arc<dyn FlagStore>,
    store: DeploymentConfigStore,
    policy: ClassificationPolicy,
}

impl Deployment {
    /// Open the deployment rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the classification file exists but cannot be read.
    #[instrument(name = "deployment.open", skip(root))]
    pub async fn open(root: impl Into<PathBuf>) -> ConfigResult<Self> {
        let root = root.into();
        let policy = ClassificationPolicy::load(&root.join(CLASSIFICATION_FILE)).await?;
        Ok(Self {
            system: Arc::new(FileSystemConfig::new(root.join(SYSTEM_CONFIG_FILE))),
            flags: Arc::new(FileFlagStore::new(root.join(FLAGS_FILE))),
            store: DeploymentConfigStore::new(root.join(DEPLOYMENT_CONFIG_FILE)),
            policy,
            root,
        })
    }

    /// Deployment directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store for the deployment configuration file.
    #[must_use]
    pub const fn store(&self) -> &DeploymentConfigStore {
        &self.store
    }

    /// Flag store of this deployment.
    #[must_use]
    pub fn flags(&self) -> Arc<dyn FlagStore> {
        Arc::clone(&self.flags)
    }

    /// Classification tables loaded at open time.
    #[must_use]
    pub const fn policy(&self) -> &ClassificationPolicy {
        &self.policy
    }

    /// Dumper writing the filtered system config into the deployment file.
    #[must_use]
    pub fn dumper(&self) -> ConfigDumper {
        ConfigDumper::new(
            Arc::clone(&self.system),
            self.store.clone(),
            Arc::clone(&self.flags),
            self.policy.filter(),
        )
    }

    /// Analytics subscription status provider.
    #[must_use]
    pub fn status_provider(&self) -> SubscriptionStatusProvider {
        SubscriptionStatusProvider::new(
            Arc::clone(&self.system),
            Arc::new(ConfigTokenStore),
            Arc::clone(&self.flags),
        )
    }
}
