//! Command handlers grouped by concern.

mod analytics;
mod config;

pub(crate) use analytics::handle_analytics_status;
pub(crate) use config::handle_config_dump;
