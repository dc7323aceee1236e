use std::io::Write;

use anyhow::anyhow;
use tracing::info;

use crate::cli::OutputFormat;
use crate::context::{AppContext, CliError, CliResult};
use crate::output::render_dump_report;

pub(crate) async fn handle_config_dump(
    ctx: &AppContext,
    format: OutputFormat,
    out: &mut (dyn Write + Send),
) -> CliResult<()> {
    let report = ctx.deployment.dumper().dump().await?;
    info!(
        target_file = %ctx.deployment.store().path().display(),
        written = report.written,
        withheld = report.withheld,
        drifted = report.drifted,
        "deployment configuration written"
    );

    let rendered = render_dump_report(&report, format)?;
    writeln!(out, "{rendered}")
        .map_err(|err| CliError::failure(anyhow!("failed to write output: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use vitrine_config::{ConfigHash, SYSTEM_SECTION};
    use vitrine_test_support::deployment::TempDeployment;
    use vitrine_test_support::fixtures;

    async fn seeded() -> anyhow::Result<(TempDeployment, AppContext)> {
        let deployment = TempDeployment::new()?;
        deployment.write_json("system.json", &fixtures::system_config())?;
        deployment.write_json("classification.json", &fixtures::classification())?;
        let ctx = AppContext::open(deployment.path())
            .await
            .map_err(|err| anyhow!(err.display_message()))?;
        Ok((deployment, ctx))
    }

    #[tokio::test]
    async fn dump_prints_notice_then_done() -> anyhow::Result<()> {
        let (_deployment, ctx) = seeded().await?;
        let mut out = Vec::new();
        handle_config_dump(&ctx, OutputFormat::Table, &mut out)
            .await
            .map_err(|err| anyhow!(err.display_message()))?;

        let text = String::from_utf8(out)?;
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("The configuration file doesn't contain sensitive data"));
        assert_eq!(lines.last().copied(), Some("Done."));
        assert!(text.contains(
            "CONFIG__DEFAULT__WEB__TEST__TEST_SENSITIVE_ENVIRONMENT4 for web/test/test_sensitive_environment4"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn json_dump_reports_recorded_hash() -> anyhow::Result<()> {
        let (deployment, ctx) = seeded().await?;
        let mut out = Vec::new();
        handle_config_dump(&ctx, OutputFormat::Json, &mut out)
            .await
            .map_err(|err| anyhow!(err.display_message()))?;

        let report: Value = serde_json::from_slice(&out)?;
        let stored = ConfigHash::stored(ctx.deployment.flags().as_ref()).await?;
        assert_eq!(
            report["hash"].as_str(),
            stored.as_ref().map(ConfigHash::as_str)
        );
        assert_eq!(report["written"], json!(fixtures::EXPORTED_KEYS.len() + 1));
        assert_eq!(report["withheld"], json!(fixtures::WITHHELD_KEYS.len()));
        assert_eq!(report["drifted"], json!(false));

        let written: Value = deployment.read_json("config.json")?;
        assert!(written.get(SYSTEM_SECTION).is_some());
        Ok(())
    }
}
