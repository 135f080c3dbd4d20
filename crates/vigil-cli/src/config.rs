//! Configuration file support for vigil.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/vigil/config.toml` (lowest priority)
//! - Project-local: `.vigil.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Decision engine tuning.
    pub engine: EngineSection,
    /// Audible alert settings.
    pub audio: AudioSection,
    /// SMS notification settings.
    pub sms: SmsSection,
    /// Output settings.
    pub output: OutputSection,
}

/// Decision engine configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    /// Eye aspect ratio threshold (0.0-1.0).
    pub ear_threshold: Option<f32>,
    /// Seconds the eyes must stay closed before an alert fires.
    pub closed_eye_min_secs: Option<f64>,
    /// Minimum seconds between consecutive alerts.
    pub alert_cooldown_secs: Option<f64>,
    /// Fatigue score at which the break warning appears.
    pub fatigue_threshold: Option<u32>,
    /// Upper bound on the fatigue score.
    pub fatigue_score_cap: Option<u32>,
}

/// Audible alert configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSection {
    /// Enable/disable the alert sound.
    pub enabled: Option<bool>,
    /// Command that plays the alert sound, e.g. `aplay -q alert.wav`.
    pub play_command: Option<String>,
}

/// SMS notification configuration.
///
/// Twilio credentials are never read from this file. Set
/// `TWILIO_ACCOUNT_SID` and `TWILIO_AUTH_TOKEN` in the environment.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SmsSection {
    /// Enable/disable SMS notifications.
    pub enabled: Option<bool>,
    /// Sender phone number in E.164 form.
    pub from: Option<String>,
    /// Recipient phone number in E.164 form.
    pub to: Option<String>,
    /// Message body sent on each alert.
    pub message: Option<String>,
}

/// Output configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Event log path (JSON Lines).
    pub events: Option<PathBuf>,
    /// Show the status line even when stderr is not a terminal.
    pub status: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/vigil/config.toml`
    /// 2. Project-local: `.vigil.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load XDG config (lowest priority)
        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        // Load project-local config (higher priority, merged)
        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        // Validate merged config
        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(t) = self.engine.ear_threshold {
            if !(0.0..=1.0).contains(&t) {
                return Err(format!("engine.ear_threshold must be 0.0-1.0, got {t}"));
            }
        }
        if let Some(s) = self.engine.closed_eye_min_secs {
            if !s.is_finite() || s < 0.0 {
                return Err(format!(
                    "engine.closed_eye_min_secs must be non-negative seconds, got {s}"
                ));
            }
        }
        if let Some(s) = self.engine.alert_cooldown_secs {
            if !s.is_finite() || s < 0.0 {
                return Err(format!(
                    "engine.alert_cooldown_secs must be non-negative seconds, got {s}"
                ));
            }
        }
        if let Some(t) = self.engine.fatigue_threshold {
            if t == 0 {
                return Err("engine.fatigue_threshold must be at least 1".to_string());
            }
        }
        if let (Some(cap), Some(threshold)) =
            (self.engine.fatigue_score_cap, self.engine.fatigue_threshold)
        {
            if cap < threshold {
                return Err(format!(
                    "engine.fatigue_score_cap ({cap}) must not be below engine.fatigue_threshold ({threshold})"
                ));
            }
        }

        if self.sms.enabled == Some(true) && (self.sms.from.is_none() || self.sms.to.is_none()) {
            return Err("sms.enabled = true requires sms.from and sms.to".to_string());
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // Engine
        self.engine.ear_threshold = other.engine.ear_threshold.or(self.engine.ear_threshold);
        self.engine.closed_eye_min_secs = other
            .engine
            .closed_eye_min_secs
            .or(self.engine.closed_eye_min_secs);
        self.engine.alert_cooldown_secs = other
            .engine
            .alert_cooldown_secs
            .or(self.engine.alert_cooldown_secs);
        self.engine.fatigue_threshold = other
            .engine
            .fatigue_threshold
            .or(self.engine.fatigue_threshold);
        self.engine.fatigue_score_cap = other
            .engine
            .fatigue_score_cap
            .or(self.engine.fatigue_score_cap);

        // Audio
        self.audio.enabled = other.audio.enabled.or(self.audio.enabled);
        self.audio.play_command = other
            .audio
            .play_command
            .or_else(|| self.audio.play_command.take());

        // Sms
        self.sms.enabled = other.sms.enabled.or(self.sms.enabled);
        self.sms.from = other.sms.from.or_else(|| self.sms.from.take());
        self.sms.to = other.sms.to.or_else(|| self.sms.to.take());
        self.sms.message = other.sms.message.or_else(|| self.sms.message.take());

        // Output
        self.output.events = other.output.events.or_else(|| self.output.events.take());
        self.output.status = other.output.status.or(self.output.status);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vigil").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.vigil.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".vigil.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
