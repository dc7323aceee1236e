//! Export of system configuration into the shared deployment file.

use std::sync::Arc;

use tracing::{info, instrument, warn};
use vitrine_policy::{SensitiveConfigFilter, SensitiveNotice};

use crate::error::ConfigResult;
use crate::flags::FlagStore;
use crate::hash::ConfigHash;
use crate::model::{ConfigDocument, SYSTEM_SECTION, unflatten_system};
use crate::store::DeploymentConfigStore;
use crate::system::SystemConfigSource;

/// Summary of one dump run.
#[derive(Debug, Clone)]
pub struct DumpReport {
    /// Entries persisted to the deployment file.
    pub written: usize,
    /// Entries withheld from the deployment file.
    pub withheld: usize,
    /// Notice for the operator, when any withheld value has an environment variable.
    pub notice: Option<SensitiveNotice>,
    /// Hash of the document as written.
    pub hash: ConfigHash,
    /// The file had been edited since the previous dump recorded its hash.
    pub drifted: bool,
}

/// Writes the filtered `system` section of the system configuration to the
/// deployment file.
#[derive(Clone)]
pub struct ConfigDumper {
    system: Arc<dyn SystemConfigSource>,
    store: DeploymentConfigStore,
    flags: Arc<dyn FlagStore>,
    filter: SensitiveConfigFilter,
}

impl ConfigDumper {
    /// Dumper wiring a source, a target store, the flag store and a filter.
    #[must_use]
    pub const fn new(
        system: Arc<dyn SystemConfigSource>,
        store: DeploymentConfigStore,
        flags: Arc<dyn FlagStore>,
        filter: SensitiveConfigFilter,
    ) -> Self {
        Self {
            system,
            store,
            flags,
            filter,
        }
    }

    /// Filter the current system configuration and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read, the deployment file
    /// cannot be written, or the hash cannot be recorded.
    #[instrument(name = "config.dump", skip(self), fields(target = %self.store.path().display()))]
    pub async fn dump(&self) -> ConfigResult<DumpReport> {
        let drifted = self.detect_drift().await?;
        let entries = self.system.entries().await?;
        let outcome = self.filter.apply(entries);

        let section = unflatten_system(&outcome.entries);
        let written = self
            .store
            .save(ConfigDocument::new().with_section(SYSTEM_SECTION, section))
            .await?;

        let hash = ConfigHash::compute(&written)?;
        hash.record(self.flags.as_ref()).await?;

        info!(
            written = outcome.entries.len(),
            withheld = outcome.withheld.len(),
            hash = %hash,
            "configuration dumped"
        );

        Ok(DumpReport {
            written: outcome.entries.len(),
            withheld: outcome.withheld.len(),
            notice: outcome.notice,
            hash,
            drifted,
        })
    }

    /// Whether the deployment file no longer matches the hash of the last dump.
    ///
    /// A file that was never dumped has nothing to drift from.
    async fn detect_drift(&self) -> ConfigResult<bool> {
        if ConfigHash::stored(self.flags.as_ref()).await?.is_none() {
            return Ok(false);
        }
        let current = self.store.load().await?;
        let drifted = !ConfigHash::is_current(&current, self.flags.as_ref()).await?;
        if drifted {
            warn!(
                target_file = %self.store.path().display(),
                "deployment config changed since the last dump; edits outside the system section are kept"
            );
        }
        Ok(drifted)
    }
}
