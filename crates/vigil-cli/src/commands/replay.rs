//! Replay command - re-run the engine over a recorded trace.
//!
//! Replays never pace, never play sound, and never send SMS. They exist to
//! answer "what would the engine have done" for a captured session, as
//! fast as the trace can be read.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::{debug, info};
use vigil_adapters::{NullAudioAlert, NullNotifier, TraceSignalSource};
use vigil_core::{DecisionEngine, MonitorLoop, MonitorOutputs, SessionSummary};

use super::run::EngineOverrides;
use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonlEventWriter, StatusLine};

/// Arguments for trace replay.
#[derive(Args, Clone)]
pub struct ReplayArgs {
    /// Trace file to replay (JSON Lines)
    pub trace: PathBuf,

    #[command(flatten)]
    pub engine: EngineOverrides,

    /// Write events to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub events: Option<PathBuf>,

    /// Collect events into one pretty-printed JSON array
    #[arg(long)]
    pub pretty: bool,

    /// Print a session summary object as the last line of stdout
    #[arg(long)]
    pub summary: bool,
}

/// Summary report printed with `--summary`.
#[derive(Serialize)]
struct ReplayReport<'a> {
    /// Replay wall-clock start (ISO 8601).
    started_at: &'a str,
    #[serde(flatten)]
    summary: SessionSummary,
}

/// Result of a replay.
pub struct ReplayOutcome {
    /// Session counters.
    #[allow(dead_code)] // Exposed for programmatic use
    pub summary: SessionSummary,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the replay command.
///
/// # Errors
///
/// Returns an error if the trace cannot be opened, the configuration is
/// invalid, or event output fails.
pub fn run(args: &ReplayArgs) -> Result<ReplayOutcome> {
    let config = AppConfig::load();
    let engine_config = args.engine.engine_config(&config)?;
    debug!(?engine_config, "engine configured");
    let engine = DecisionEngine::new(&engine_config)?;

    let started_at = super::iso_timestamp();
    let mut source = TraceSignalSource::open(&args.trace)?;

    let events = match &args.events {
        Some(path) => JsonlEventWriter::file(path)?,
        None => JsonlEventWriter::stdout(),
    };
    let events = if args.pretty { events.pretty() } else { events };

    info!("replaying {}", args.trace.display());

    let audio = NullAudioAlert;
    let notifier = NullNotifier;
    let status = StatusLine::disabled();

    let outputs = MonitorOutputs {
        audio: &audio,
        notifier: &notifier,
        events: &events,
        display: &status,
    };
    let mut session = MonitorLoop::new(engine, outputs);
    let summary = session.run(&mut source)?;

    if args.summary {
        let report = ReplayReport {
            started_at: &started_at,
            summary,
        };
        println!("{}", serde_json::to_string(&report)?);
    }

    debug!(
        ticks = summary.ticks,
        alerts = summary.alerts,
        "replay finished"
    );

    let exit_code = if summary.alerts > 0 {
        ExitCode::AlertsFired
    } else {
        ExitCode::Success
    };
    Ok(ReplayOutcome { summary, exit_code })
}
