//! Run command - monitor an EAR stream and raise drowsiness alerts.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use tracing::{debug, info, warn};
use vigil_adapters::{
    CommandAudioAlert, NullAudioAlert, NullNotifier, StdinSignalSource, TraceSignalSource,
    TracingEventLogger, TwilioConfig, TwilioNotifier,
};
use vigil_core::{
    AudioAlert, DecisionEngine, EngineConfig, EventLogger, MonitorLoop, MonitorOutputs, Notifier,
    SessionSummary, SignalSource,
};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonlEventWriter, StatusLine};

/// Hardcoded default values for engine settings.
mod defaults {
    pub const EAR_THRESHOLD: f32 = 0.3;
    pub const CLOSED_EYE_MIN_SECS: f64 = 2.0;
    pub const ALERT_COOLDOWN_SECS: f64 = 5.0;
    pub const FATIGUE_THRESHOLD: u32 = 5;
}

/// Parse and validate a threshold value (0.0-1.0).
fn parse_threshold(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Parse and validate a non-negative seconds value.
fn parse_secs(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a valid number"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} is not a non-negative number of seconds"))
    }
}

/// Engine settings shared by `run` and `replay`.
#[derive(Args, Clone)]
pub struct EngineOverrides {
    /// Eye aspect ratio below which eyes count as closed (0.0-1.0)
    #[arg(long, value_parser = parse_threshold)]
    pub ear_threshold: Option<f32>,

    /// Seconds eyes must stay closed before an alert qualifies
    #[arg(long, value_name = "SECS", value_parser = parse_secs)]
    pub min_closed: Option<f64>,

    /// Minimum seconds between consecutive alerts
    #[arg(long, value_name = "SECS", value_parser = parse_secs)]
    pub cooldown: Option<f64>,

    /// Fatigue score at which the session counts as fatigued
    #[arg(long)]
    pub fatigue_threshold: Option<u32>,

    /// Upper bound on the fatigue score (unbounded when omitted)
    #[arg(long)]
    pub score_cap: Option<u32>,
}

impl EngineOverrides {
    /// Builds the engine configuration.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file values
    /// 3. CLI arguments (already set on self)
    ///
    /// # Errors
    ///
    /// Returns an error if a config file supplied an unusable duration.
    pub fn engine_config(&self, config: &AppConfig) -> Result<EngineConfig> {
        let ear_threshold = self
            .ear_threshold
            .or(config.engine.ear_threshold)
            .unwrap_or(defaults::EAR_THRESHOLD);
        let min_closed = self
            .min_closed
            .or(config.engine.closed_eye_min_secs)
            .unwrap_or(defaults::CLOSED_EYE_MIN_SECS);
        let cooldown = self
            .cooldown
            .or(config.engine.alert_cooldown_secs)
            .unwrap_or(defaults::ALERT_COOLDOWN_SECS);
        let fatigue_threshold = self
            .fatigue_threshold
            .or(config.engine.fatigue_threshold)
            .unwrap_or(defaults::FATIGUE_THRESHOLD);
        let fatigue_score_cap = self.score_cap.or(config.engine.fatigue_score_cap);

        Ok(EngineConfig {
            ear_threshold,
            closed_eye_min_duration: Duration::try_from_secs_f64(min_closed)
                .map_err(|_| anyhow::anyhow!("invalid closed-eye duration: {min_closed}"))?,
            alert_cooldown: Duration::try_from_secs_f64(cooldown)
                .map_err(|_| anyhow::anyhow!("invalid alert cooldown: {cooldown}"))?,
            fatigue_threshold,
            fatigue_score_cap,
        })
    }
}

/// Shared arguments for monitoring sessions.
#[derive(Args, Clone)]
pub struct RunArgs {
    /// EAR stream to monitor: a trace file replayed in real time, or `-`
    /// for one value per line on stdin
    #[arg(long, value_name = "PATH", default_value = "-")]
    pub from: PathBuf,

    #[command(flatten)]
    pub engine: EngineOverrides,

    /// Disable the alert sound
    #[arg(long)]
    pub no_audio: bool,

    /// Disable SMS notifications
    #[arg(long)]
    pub no_sms: bool,

    /// Write session events as JSON Lines to this file
    #[arg(long, value_name = "PATH")]
    pub events: Option<PathBuf>,

    /// Show the live status line even when stderr is not a terminal
    #[arg(long)]
    pub status: bool,

    /// Suppress status output
    #[arg(short, long)]
    pub quiet: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl RunArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// A `--no-audio` or `--no-sms` flag on the command line always wins;
    /// the config file only decides when the flag was not given.
    fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.no_audio {
            if let Some(enabled) = config.audio.enabled {
                args.no_audio = !enabled;
            }
        }
        if !args.no_sms {
            if let Some(enabled) = config.sms.enabled {
                args.no_sms = !enabled;
            }
        }

        if args.events.is_none() {
            args.events.clone_from(&config.output.events);
        }
        if !args.status {
            args.status = config.output.status.unwrap_or(false);
        }

        args.config = Some(config.clone());
        args
    }
}

/// Result of a monitoring session.
pub struct RunOutcome {
    /// Session counters.
    #[allow(dead_code)] // Exposed for programmatic use
    pub summary: SessionSummary,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the monitor command.
///
/// # Errors
///
/// Returns an error if the source cannot be opened, the configuration is
/// invalid, or the session aborts.
pub fn run(args: &RunArgs) -> Result<RunOutcome> {
    let config = AppConfig::load();
    let args = RunArgs::with_config(args.clone(), &config);

    let engine_config = args.engine.engine_config(&config)?;
    debug!(?engine_config, "engine configured");
    let engine = DecisionEngine::new(&engine_config)?;

    let mut source = open_source(&args)?;

    let audio = build_audio(&args)?;
    let notifier = build_notifier(&args);
    let events = build_event_logger(&args)?;

    let show_bar = args.status || std::io::stderr().is_terminal();
    let status = StatusLine::new(args.quiet, show_bar);

    info!(
        "session started at {}, monitoring {}",
        super::iso_timestamp(),
        source_label(&args)
    );

    let outputs = MonitorOutputs {
        audio: audio.as_ref(),
        notifier: notifier.as_ref(),
        events: events.as_ref(),
        display: &status,
    };
    let mut session = MonitorLoop::new(engine, outputs);
    if let Some(message) = config.sms.message.clone() {
        session = session.with_alert_message(message);
    }

    let summary = session.run(source.as_mut())?;

    status.finish(&summary);
    info!(
        ticks = summary.ticks,
        alerts = summary.alerts,
        peak_score = summary.peak_score,
        "session finished"
    );

    let exit_code = if summary.alerts > 0 {
        ExitCode::AlertsFired
    } else {
        ExitCode::Success
    };
    Ok(RunOutcome { summary, exit_code })
}

fn reads_stdin(args: &RunArgs) -> bool {
    args.from.as_os_str() == "-"
}

fn source_label(args: &RunArgs) -> String {
    if reads_stdin(args) {
        "stdin".to_string()
    } else {
        args.from.display().to_string()
    }
}

fn open_source(args: &RunArgs) -> Result<Box<dyn SignalSource>> {
    if reads_stdin(args) {
        Ok(Box::new(StdinSignalSource::new()))
    } else {
        // A recorded trace stands in for the live stream, so pace it.
        Ok(Box::new(TraceSignalSource::open(&args.from)?.paced()))
    }
}

fn build_audio(args: &RunArgs) -> Result<Box<dyn AudioAlert>> {
    if args.no_audio {
        debug!("alert sound disabled");
        return Ok(Box::new(NullAudioAlert));
    }

    match args
        .config
        .as_ref()
        .and_then(|c| c.audio.play_command.as_deref())
    {
        Some(command) => Ok(Box::new(CommandAudioAlert::new(command)?)),
        None => {
            info!("alert sound disabled: no audio.play_command configured");
            Ok(Box::new(NullAudioAlert))
        }
    }
}

fn build_notifier(args: &RunArgs) -> Box<dyn Notifier> {
    if args.no_sms {
        debug!("sms notifications disabled");
        return Box::new(NullNotifier);
    }

    let sms = args.config.as_ref().map(|c| &c.sms);
    let (Some(from), Some(to)) = (
        sms.and_then(|s| s.from.clone()),
        sms.and_then(|s| s.to.clone()),
    ) else {
        info!("sms disabled: no sms.from and sms.to configured");
        return Box::new(NullNotifier);
    };

    match TwilioConfig::from_env(from, to) {
        Ok(twilio) => Box::new(TwilioNotifier::spawn(twilio)),
        Err(e) => {
            warn!("sms disabled: {e:#}");
            Box::new(NullNotifier)
        }
    }
}

fn build_event_logger(args: &RunArgs) -> Result<Box<dyn EventLogger>> {
    match &args.events {
        Some(path) => Ok(Box::new(JsonlEventWriter::file(path)?)),
        None => Ok(Box::new(TracingEventLogger)),
    }
}
