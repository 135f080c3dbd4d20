//! CLI command definitions and handlers.

pub mod replay;
pub mod run;

use clap::{Parser, Subcommand};

/// Vigil - Real-time drowsiness monitoring
#[derive(Parser)]
#[command(name = "vigil")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared run arguments (source, thresholds, flags).
    #[command(flatten)]
    pub run: run::RunArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Monitor an EAR stream and raise drowsiness alerts
    Run(run::RunArgs),
    /// Re-run the engine over a recorded trace
    Replay(replay::ReplayArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Session completed with no alerts.
    Success,
    /// Session completed and at least one alert fired.
    AlertsFired,
    /// The command failed.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::from(0),
            ExitCode::AlertsFired => Self::from(1),
            ExitCode::Error => Self::from(2),
        }
    }
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
pub(crate) fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            tracing::debug!("timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
