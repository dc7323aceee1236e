//! Analytics subscription status provider.

use std::sync::Arc;

use tracing::{info, instrument};
use vitrine_policy::{StatusResolver, SubscriptionStatus};

use crate::defaults::{ATTEMPTS_REVERSE_COUNTER_FLAG_CODE, SUBSCRIPTION_ENABLED_PATH};
use crate::error::ConfigResult;
use crate::flags::FlagStore;
use crate::model::lookup_path;
use crate::system::{SystemConfigSource, TokenStore, is_truthy_value};

/// Gathers the subscription signals and resolves the status shown to operators.
#[derive(Clone)]
pub struct SubscriptionStatusProvider {
    system: Arc<dyn SystemConfigSource>,
    token: Arc<dyn TokenStore>,
    flags: Arc<dyn FlagStore>,
}

impl SubscriptionStatusProvider {
    /// Provider over the three signal sources.
    #[must_use]
    pub const fn new(
        system: Arc<dyn SystemConfigSource>,
        token: Arc<dyn TokenStore>,
        flags: Arc<dyn FlagStore>,
    ) -> Self {
        Self {
            system,
            token,
            flags,
        }
    }

    /// Current subscription status.
    ///
    /// The switch and the token are read from one system snapshot. The token
    /// and attempt counter are only consulted while the subscription is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if any backing store cannot be read.
    #[instrument(name = "analytics.subscription_status", skip(self))]
    pub async fn status(&self) -> ConfigResult<SubscriptionStatus> {
        let snapshot = self.system.snapshot().await?;
        let enabled =
            lookup_path(&snapshot, SUBSCRIPTION_ENABLED_PATH).is_some_and(is_truthy_value);

        let status = if enabled {
            let token_exists = self.token.token_exists(&snapshot).await?;
            let attempts_remain = !token_exists
                && self
                    .flags
                    .get_flag(ATTEMPTS_REVERSE_COUNTER_FLAG_CODE)
                    .await?
                    .is_present();
            StatusResolver::resolve(true, token_exists, attempts_remain)
        } else {
            StatusResolver::resolve(false, false, false)
        };

        info!(status = status.as_str(), "subscription status resolved");
        Ok(status)
    }
}
