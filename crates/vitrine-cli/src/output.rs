//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use serde_json::json;
use vitrine_config::DumpReport;
use vitrine_policy::SubscriptionStatus;

use crate::cli::OutputFormat;
use crate::context::{CliError, CliResult};

/// Message closing a successful dump.
pub(crate) const DONE_MESSAGE: &str = "Done.";

pub(crate) fn render_dump_report(report: &DumpReport, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => {
            let variables: Vec<_> = report
                .notice
                .as_ref()
                .map(|notice| {
                    notice
                        .variables()
                        .iter()
                        .map(|variable| json!({"name": variable.name, "path": variable.path}))
                        .collect()
                })
                .unwrap_or_default();
            let body = json!({
                "written": report.written,
                "withheld": report.withheld,
                "hash": report.hash.as_str(),
                "drifted": report.drifted,
                "notice": report.notice.as_ref().map(ToString::to_string),
                "environment_variables": variables,
            });
            serde_json::to_string_pretty(&body)
                .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
        }
        OutputFormat::Table => {
            let mut lines = Vec::new();
            if let Some(notice) = &report.notice {
                lines.push(notice.to_string());
            }
            lines.push(DONE_MESSAGE.to_string());
            Ok(lines.join("\n"))
        }
    }
}

pub(crate) fn render_status(status: SubscriptionStatus, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&json!({ "status": status.as_str() }))
            .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}"))),
        OutputFormat::Table => Ok(status.as_str().to_string()),
    }
}
