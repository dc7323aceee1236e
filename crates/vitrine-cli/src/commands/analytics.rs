use std::io::Write;

use anyhow::anyhow;

use crate::cli::OutputFormat;
use crate::context::{AppContext, CliError, CliResult};
use crate::output::render_status;

pub(crate) async fn handle_analytics_status(
    ctx: &AppContext,
    format: OutputFormat,
    out: &mut (dyn Write + Send),
) -> CliResult<()> {
    let status = ctx.deployment.status_provider().status().await?;
    let rendered = render_status(status, format)?;
    writeln!(out, "{rendered}")
        .map_err(|err| CliError::failure(anyhow!("failed to write output: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vitrine_test_support::deployment::TempDeployment;
    use vitrine_test_support::fixtures;

    async fn status_output(
        deployment: &TempDeployment,
        format: OutputFormat,
    ) -> anyhow::Result<String> {
        let ctx = AppContext::open(deployment.path())
            .await
            .map_err(|err| anyhow!(err.display_message()))?;
        let mut out = Vec::new();
        handle_analytics_status(&ctx, format, &mut out)
            .await
            .map_err(|err| anyhow!(err.display_message()))?;
        Ok(String::from_utf8(out)?)
    }

    #[tokio::test]
    async fn disabled_without_subscription() -> anyhow::Result<()> {
        let deployment = TempDeployment::new()?;
        deployment.write_json("system.json", &fixtures::analytics_config("0", ""))?;
        assert_eq!(status_output(&deployment, OutputFormat::Table).await?, "Disabled\n");
        Ok(())
    }

    #[tokio::test]
    async fn json_output_wraps_the_label() -> anyhow::Result<()> {
        let deployment = TempDeployment::new()?;
        deployment.write_json("system.json", &fixtures::analytics_config("1", "token"))?;
        let rendered = status_output(&deployment, OutputFormat::Json).await?;
        let value: serde_json::Value = serde_json::from_str(&rendered)?;
        assert_eq!(value, json!({"status": "Enabled"}));
        Ok(())
    }
}
