//! Engine configuration.

use std::time::Duration;

use anyhow::Result;

/// Tunable thresholds and timings for the decision engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// EAR below this value counts as closed eyes.
    pub ear_threshold: f32,
    /// How long the eyes must stay continuously closed before a closure
    /// qualifies for an alert.
    pub closed_eye_min_duration: Duration,
    /// Spacing between alerts. A new alert fires only when strictly more
    /// than this has elapsed since the previous one.
    pub alert_cooldown: Duration,
    /// Fatigue score at or above which the session counts as fatigued.
    pub fatigue_threshold: u32,
    /// Optional upper bound on the fatigue score. `None` lets the score
    /// grow without limit.
    pub fatigue_score_cap: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ear_threshold: 0.3,
            closed_eye_min_duration: Duration::from_secs(2),
            alert_cooldown: Duration::from_secs(5),
            fatigue_threshold: 5,
            fatigue_score_cap: None,
        }
    }
}

impl EngineConfig {
    /// Checks that all values are usable.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !self.ear_threshold.is_finite() || !(0.0..=1.0).contains(&self.ear_threshold) {
            anyhow::bail!(
                "ear_threshold must be in 0.0..=1.0, got {}",
                self.ear_threshold
            );
        }
        if self.fatigue_threshold == 0 {
            anyhow::bail!("fatigue_threshold must be at least 1");
        }
        if let Some(cap) = self.fatigue_score_cap {
            if cap < self.fatigue_threshold {
                anyhow::bail!(
                    "fatigue_score_cap ({cap}) must not be below fatigue_threshold ({})",
                    self.fatigue_threshold
                );
            }
        }
        Ok(())
    }
}
