//! End-of-session accounting.

use serde::Serialize;

/// Counters accumulated over a monitoring session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SessionSummary {
    /// Ticks processed, absent-face ticks included.
    pub ticks: u64,
    /// Ticks where no face was visible.
    pub absent_ticks: u64,
    /// Samples dropped because the source failed to produce them.
    pub skipped_samples: u64,
    /// Alerts fired.
    pub alerts: u32,
    /// Highest fatigue score reached.
    pub peak_score: u32,
    /// Ticks spent at or above the fatigue threshold.
    pub fatigued_ticks: u64,
    /// Session length in seconds, taken from the last sample timestamp.
    pub duration_secs: f64,
}
