//! Argument parsing and command dispatch for the `vitrine` binary.

use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;
use vitrine_telemetry::{
    DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, TelemetryError, build_sha, init_logging,
};

use crate::commands::{handle_analytics_status, handle_config_dump};
use crate::context::{AppContext, CliResult};

const DEFAULT_CONFIG_DIR: &str = "app/etc";
const BUILD_SHA: &str = match option_env!("VITRINE_BUILD_SHA") {
    Some(sha) => sha,
    None => "dev",
};

/// Parses CLI arguments, executes the requested command, and reports the
/// outcome. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.unwrap_or_else(LogFormat::infer),
        build_sha: BUILD_SHA,
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err}");
    }

    let command_name = command_label(&cli.command);
    let trace_id = Uuid::new_v4().to_string();
    let span = info_span!(
        "command",
        command = command_name,
        trace_id = %trace_id,
        build_sha = build_sha()
    );

    let result = dispatch(cli).instrument(span).await;

    match result {
        Ok(()) => {
            info!(command = command_name, outcome = "success", "command finished");
            0
        }
        Err(err) => {
            let exit_code = err.exit_code();
            let message = err.display_message();
            warn!(
                command = command_name,
                outcome = "error",
                exit_code,
                error = %message,
                "command failed"
            );
            eprintln!("error: {message}");
            exit_code
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let ctx = AppContext::open(&cli.config_dir).await?;
    let mut stdout = io::stdout();

    match cli.command {
        Command::Config(ConfigCommand::Dump(_)) => {
            handle_config_dump(&ctx, cli.output, &mut stdout).await
        }
        Command::Analytics(AnalyticsCommand::Status(_)) => {
            handle_analytics_status(&ctx, cli.output, &mut stdout).await
        }
    }
}

#[derive(Parser)]
#[command(
    name = "vitrine",
    about = "Deployment configuration tooling for the Vitrine storefront"
)]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "VITRINE_CONFIG_DIR",
        default_value = DEFAULT_CONFIG_DIR,
        help = "Directory holding the deployment configuration files"
    )]
    pub(crate) config_dir: PathBuf,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for command results"
    )]
    pub(crate) output: OutputFormat,
    #[arg(
        long,
        global = true,
        env = "VITRINE_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL
    )]
    pub(crate) log_level: String,
    #[arg(
        long,
        global = true,
        env = "VITRINE_LOG_FORMAT",
        value_parser = parse_log_format,
        help = "Log output format: json or pretty"
    )]
    pub(crate) log_format: Option<LogFormat>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    #[command(subcommand)]
    Config(ConfigCommand),
    #[command(subcommand)]
    Analytics(AnalyticsCommand),
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommand {
    /// Export the system configuration into the deployment file, withholding
    /// sensitive and environment-specific values.
    Dump(ConfigDumpArgs),
}

#[derive(Subcommand)]
pub(crate) enum AnalyticsCommand {
    /// Print the analytics subscription status.
    Status(AnalyticsStatusArgs),
}

#[derive(Args, Default)]
pub(crate) struct ConfigDumpArgs {}

#[derive(Args, Default)]
pub(crate) struct AnalyticsStatusArgs {}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    value
        .parse()
        .map_err(|err: TelemetryError| format!("{err} '{value}' (expected json or pretty)"))
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Config(ConfigCommand::Dump(_)) => "config_dump",
        Command::Analytics(AnalyticsCommand::Status(_)) => "analytics_status",
    }
}
