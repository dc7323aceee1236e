//! Subscription status resolution for the analytics integration.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status of the analytics subscription as shown on the admin status page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubscriptionStatus {
    /// Subscription is enabled and the service issued a token.
    Enabled,
    /// Subscription is enabled, no token yet, attempts remain.
    Pending,
    /// Subscription is turned off in configuration.
    Disabled,
    /// Subscription is enabled but attempts ran out without a token.
    Failed,
}

impl SubscriptionStatus {
    /// Label rendered to operators.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "Enabled",
            Self::Pending => "Pending",
            Self::Disabled => "Disabled",
            Self::Failed => "Failed",
        }
    }
}

impl Display for SubscriptionStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Enabled" => Ok(Self::Enabled),
            "Pending" => Ok(Self::Pending),
            "Disabled" => Ok(Self::Disabled),
            "Failed" => Ok(Self::Failed),
            other => Err(format!("unknown subscription status '{other}'")),
        }
    }
}

/// Maps the three subscription signals to a [`SubscriptionStatus`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusResolver;

impl StatusResolver {
    /// Resolve the status in fixed order: config switch, token, remaining attempts.
    ///
    /// The token and retry inputs are ignored while the subscription is disabled.
    #[must_use]
    pub const fn resolve(
        subscription_enabled_in_config: bool,
        token_exists: bool,
        retry_counter_flag_is_set: bool,
    ) -> SubscriptionStatus {
        if !subscription_enabled_in_config {
            return SubscriptionStatus::Disabled;
        }
        if token_exists {
            return SubscriptionStatus::Enabled;
        }
        if retry_counter_flag_is_set {
            SubscriptionStatus::Pending
        } else {
            SubscriptionStatus::Failed
        }
    }
}
