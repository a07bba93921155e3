//! Server configuration
//!
//! The debounce interval can come from three places. Resolution order is
//! environment (`SCRIPT_LS_DEBOUNCE_MS`), then LSP initialization options
//! (`{ "debounceMs": n }`), then the `--debounce-ms` flag, then the default.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use tracing::warn;

use crate::error::ConfigError;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEBOUNCE_ENV_VAR: &str = "SCRIPT_LS_DEBOUNCE_MS";

/// Longest accepted debounce interval.
const MAX_DEBOUNCE_MS: u64 = 60_000;

/// CLI arguments for the script language server
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "script-language-server", author, version, about, long_about = None)]
pub struct ServerArgs {
    /// Annotated reference source for the catalog (defaults to the bundled one)
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Quiet period before a changed document is re-indexed
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Log level (overrides RUST_LOG env var)
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Disable ANSI colors in stderr output
    #[arg(long)]
    pub no_color: bool,

    /// Also write a DEBUG-level session log to the user cache directory
    #[arg(long)]
    pub log_file: bool,
}

/// Client-supplied `initializationOptions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializationOptions {
    #[serde(default)]
    pub debounce_ms: Option<u64>,
}

impl InitializationOptions {
    /// Absent or `null` options are the same as empty ones.
    pub fn from_value(value: Option<&serde_json::Value>) -> Result<Self, ConfigError> {
        match value {
            None | Some(serde_json::Value::Null) => Ok(Self::default()),
            Some(value) => Ok(serde_json::from_value(value.clone())?),
        }
    }
}

/// Parses a millisecond count such as `"250"`.
pub fn parse_debounce(value: &str) -> Result<Duration, ConfigError> {
    let millis: u64 = value.trim().parse().map_err(|e: std::num::ParseIntError| {
        ConfigError::InvalidDebounce {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })?;
    checked_debounce(millis)
}

fn checked_debounce(millis: u64) -> Result<Duration, ConfigError> {
    if millis > MAX_DEBOUNCE_MS {
        return Err(ConfigError::InvalidDebounce {
            value: millis.to_string(),
            reason: format!("must be at most {} ms", MAX_DEBOUNCE_MS),
        });
    }
    Ok(Duration::from_millis(millis))
}

/// Resolves the debounce interval from the process environment, the
/// initialization options and the CLI flag.
pub fn resolve_debounce(init_option: Option<u64>, cli: Option<u64>) -> Duration {
    let env = std::env::var(DEBOUNCE_ENV_VAR).ok();
    resolve_debounce_with(env.as_deref(), init_option, cli)
}

/// Same as [`resolve_debounce`] with the environment value passed in.
/// Invalid values are logged and skipped in favor of the next source.
pub fn resolve_debounce_with(env: Option<&str>, init_option: Option<u64>, cli: Option<u64>) -> Duration {
    if let Some(value) = env {
        match parse_debounce(value) {
            Ok(debounce) => return debounce,
            Err(e) => warn!("Ignoring {}: {}", DEBOUNCE_ENV_VAR, e),
        }
    }

    for (source, millis) in [("initializationOptions", init_option), ("--debounce-ms", cli)] {
        if let Some(millis) = millis {
            match checked_debounce(millis) {
                Ok(debounce) => return debounce,
                Err(e) => warn!("Ignoring {}: {}", source, e),
            }
        }
    }

    DEFAULT_DEBOUNCE
}
