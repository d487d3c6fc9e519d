//! Command-line logging options and tracing subscriber installation.

use std::{fs::File, path::PathBuf, sync::Arc};

use clap::Args;
use thiserror::Error;
use tracing_subscriber::{filter::ParseError, EnvFilter};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid log filter {filter:?}: {source}")]
    Filter {
        filter: String,
        #[source]
        source: ParseError,
    },

    #[error("could not open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not install tracing subscriber: {0}")]
    Install(String),
}

/// Logging flags shared by every binary.
#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    /// Log filter used when RUST_LOG is not set (e.g. "debug", "tictactoe=trace")
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl LogArgs {
    fn filter(&self) -> Result<EnvFilter, SetupError> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.log_level).map_err(|source| SetupError::Filter {
            filter: self.log_level.clone(),
            source,
        })
    }
}

/// Installs the global subscriber, writing to stderr or to `--log-file`.
pub fn init_tracing(args: &LogArgs) -> Result<(), SetupError> {
    let filter = args.filter()?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match &args.log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| SetupError::LogFile {
                path: path.clone(),
                source,
            })?;
            builder
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| SetupError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_filter_is_reported() {
        let args = LogArgs {
            log_level: "tictactoe=notalevel".to_string(),
            log_file: None,
        };
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(matches!(args.filter(), Err(SetupError::Filter { .. })));
        }
    }

    #[test]
    fn default_level_parses() {
        let args = LogArgs {
            log_level: "warn".to_string(),
            log_file: None,
        };
        assert!(args.filter().is_ok());
    }
}
