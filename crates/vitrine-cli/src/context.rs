//! Shared command context and error types for the CLI.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

use anyhow::anyhow;
use vitrine_config::{ConfigError, Deployment};

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        Self::failure(error)
    }
}

/// Application context passed to command handlers.
#[derive(Clone)]
pub(crate) struct AppContext {
    pub(crate) deployment: Deployment,
}

impl AppContext {
    /// Open the deployment rooted at `config_dir`.
    pub(crate) async fn open(config_dir: &Path) -> CliResult<Self> {
        if !config_dir.is_dir() {
            return Err(CliError::validation(format!(
                "configuration directory {} does not exist (pass --config-dir or set VITRINE_CONFIG_DIR)",
                config_dir.display()
            )));
        }
        let deployment = Deployment::open(config_dir)
            .await
            .map_err(|err| CliError::failure(anyhow!(err).context("failed to open deployment")))?;
        Ok(Self { deployment })
    }
}
