//! Synthetic EAR trace builders for testing.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use vigil_core::domain::{FrameSample, Timestamp};

/// EAR reported for open eyes in scripted traces.
pub const OPEN_EAR: f32 = 0.35;

/// EAR reported for closed eyes in scripted traces.
pub const CLOSED_EAR: f32 = 0.18;

/// Builder for scripted EAR sample streams.
///
/// Appends runs of open, closed, or absent frames at a fixed sampling
/// interval, keeping a running clock. The result can be consumed as
/// in-memory samples or rendered as a JSON Lines trace file.
pub struct TraceBuilder {
    interval: Duration,
    next_at: Duration,
    samples: Vec<FrameSample>,
}

impl TraceBuilder {
    /// Creates a builder sampling every half second.
    #[must_use]
    pub fn new() -> Self {
        Self::with_interval(Duration::from_millis(500))
    }

    /// Creates a builder with a custom sampling interval.
    #[must_use]
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            next_at: Duration::ZERO,
            samples: Vec::new(),
        }
    }

    // === Runs ===

    /// Appends `secs` of open-eyed frames.
    #[must_use]
    pub fn open_for(mut self, secs: f64) -> Self {
        self.push_run(secs, Some(OPEN_EAR));
        self
    }

    /// Appends `secs` of closed-eyed frames.
    #[must_use]
    pub fn closed_for(mut self, secs: f64) -> Self {
        self.push_run(secs, Some(CLOSED_EAR));
        self
    }

    /// Appends `secs` of frames with no detectable face.
    #[must_use]
    pub fn absent_for(mut self, secs: f64) -> Self {
        self.push_run(secs, None);
        self
    }

    /// Appends a single frame with an explicit EAR value.
    #[must_use]
    pub fn ear(mut self, value: f32) -> Self {
        self.samples
            .push(FrameSample::present(value, Timestamp::from_elapsed(self.next_at)));
        self.next_at += self.interval;
        self
    }

    fn push_run(&mut self, secs: f64, ear: Option<f32>) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = (secs / self.interval.as_secs_f64()).round().max(1.0) as usize;
        for _ in 0..count {
            self.samples.push(FrameSample {
                ear,
                timestamp: Timestamp::from_elapsed(self.next_at),
            });
            self.next_at += self.interval;
        }
    }

    // === Output ===

    /// Returns the scripted samples.
    #[must_use]
    pub fn samples(self) -> Vec<FrameSample> {
        self.samples
    }

    /// Renders the script as a JSON Lines trace.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        let mut out = String::new();
        for sample in &self.samples {
            let record = serde_json::json!({
                "t": sample.timestamp.as_secs_f64(),
                "ear": sample.ear,
            });
            out.push_str(&record.to_string());
            out.push('\n');
        }
        out
    }

    /// Writes the script to a JSON Lines trace file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_jsonl(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let mut file = std::fs::File::create(path.as_ref())?;
        file.write_all(self.to_jsonl().as_bytes())?;
        Ok(())
    }
}

impl Default for TraceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Ready-made scripts for common scenarios.
///
/// Timings assume the default engine thresholds (2s debounce, 5s
/// cooldown).
impl TraceBuilder {
    /// A brief blink between open stretches. Never alerts.
    #[must_use]
    pub fn brief_blink() -> Self {
        Self::new().open_for(1.0).closed_for(1.0).open_for(1.0)
    }

    /// A single long closure that produces exactly one alert.
    #[must_use]
    pub fn long_closure() -> Self {
        Self::new().open_for(1.0).closed_for(3.0).open_for(1.0)
    }

    /// A closure interrupted by a face dropout just before it would
    /// qualify. Never alerts.
    #[must_use]
    pub fn interrupted_closure() -> Self {
        Self::new()
            .closed_for(1.5)
            .absent_for(0.5)
            .closed_for(1.5)
            .open_for(0.5)
    }
}
