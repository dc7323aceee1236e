//! Well-known file names, config paths and flag codes.

/// Deployment configuration document written by the dump command.
pub const DEPLOYMENT_CONFIG_FILE: &str = "config.json";
/// System configuration source read by the dump command.
pub const SYSTEM_CONFIG_FILE: &str = "system.json";
/// Sensitive/environment classification tables.
pub const CLASSIFICATION_FILE: &str = "classification.json";
/// Flag store document.
pub const FLAGS_FILE: &str = "flags.json";

/// System config switch for the analytics subscription.
pub const SUBSCRIPTION_ENABLED_PATH: &str = "default/analytics/subscription/enabled";
/// System config path holding the analytics token once issued.
pub const ANALYTICS_TOKEN_PATH: &str = "default/analytics/general/token";
/// Flag counting down the remaining subscription attempts.
pub const ATTEMPTS_REVERSE_COUNTER_FLAG_CODE: &str = "analytics_link_attempts_reverse_counter";
/// Flag holding the hash of the last dumped deployment config.
pub const CONFIG_HASH_FLAG_CODE: &str = "config_hash";
