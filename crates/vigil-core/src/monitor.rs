//! The monitoring loop.
//!
//! [`MonitorLoop`] pulls samples from a [`SignalSource`], runs each one
//! through the [`DecisionEngine`], and dispatches the outcome to the alert
//! collaborators. The engine decides, the loop performs.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::domain::{
    DisplayUpdate, EyeState, FrameSample, MonitorEvent, MonitorEventKind, SessionSummary, Timestamp,
};
use crate::engine::DecisionEngine;
use crate::ports::{AudioAlert, DisplayRenderer, EventLogger, Notifier, SignalSource};

/// Message sent with every alert notification.
pub const ALERT_MESSAGE: &str = "Drowsiness detected! Please stay alert.";

/// A source that fails this many times in a row is considered broken.
pub const SOURCE_ERROR_LIMIT: u32 = 30;

/// The collaborators a monitor loop dispatches to.
pub struct MonitorOutputs<'a> {
    /// Alert sound control.
    pub audio: &'a dyn AudioAlert,
    /// Out-of-band alert notifications.
    pub notifier: &'a dyn Notifier,
    /// Session event log.
    pub events: &'a dyn EventLogger,
    /// Per-tick status display.
    pub display: &'a dyn DisplayRenderer,
}

/// Drives the decision engine over a signal source.
///
/// Collaborator failures are logged and never stop the session. Only a
/// source that fails repeatedly brings the loop down.
pub struct MonitorLoop<'a> {
    engine: DecisionEngine,
    outputs: MonitorOutputs<'a>,
    alert_message: String,
    was_fatigued: bool,
    last_timestamp: Timestamp,
    summary: SessionSummary,
}

impl<'a> MonitorLoop<'a> {
    /// Creates a loop around an engine and its collaborators.
    #[must_use]
    pub fn new(engine: DecisionEngine, outputs: MonitorOutputs<'a>) -> Self {
        Self {
            engine,
            outputs,
            alert_message: ALERT_MESSAGE.to_string(),
            was_fatigued: false,
            last_timestamp: Timestamp::ZERO,
            summary: SessionSummary::default(),
        }
    }

    /// Replaces the notification message.
    #[must_use]
    pub fn with_alert_message(mut self, message: impl Into<String>) -> Self {
        self.alert_message = message.into();
        self
    }

    /// Pulls samples until the source is exhausted, processing each one,
    /// then flushes the event log.
    ///
    /// Samples the source fails to produce are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the source keeps failing or the event log cannot
    /// be flushed.
    pub fn run(&mut self, source: &mut dyn SignalSource) -> Result<SessionSummary> {
        let mut consecutive_errors = 0u32;
        loop {
            match source.next_sample() {
                Ok(Some(sample)) => {
                    consecutive_errors = 0;
                    self.process_sample(&sample);
                }
                Ok(None) => break,
                Err(e) => {
                    consecutive_errors += 1;
                    if consecutive_errors >= SOURCE_ERROR_LIMIT {
                        return Err(e.context("signal source failing repeatedly, giving up"));
                    }
                    warn!("skipping unreadable sample: {e:#}");
                    self.summary.skipped_samples += 1;
                }
            }
        }

        self.outputs
            .events
            .flush()
            .context("failed to flush event log")?;
        Ok(self.summary())
    }

    /// Runs one decision tick and dispatches its outcome.
    ///
    /// On an alert tick the sound starts first, then the event is logged,
    /// then the notification goes out. Open ticks stop the sound. The
    /// display renders last so it always sees the final state of the tick.
    pub fn process_sample(&mut self, sample: &FrameSample) -> DisplayUpdate {
        let update = self.engine.tick(sample);

        self.summary.ticks += 1;
        self.last_timestamp = sample.timestamp;
        if sample.ear.is_none() {
            self.summary.absent_ticks += 1;
        }

        if update.decision.is_fire() {
            self.summary.alerts += 1;
            debug!(
                t = sample.timestamp.as_secs_f64(),
                score = update.score,
                "alert fired"
            );

            if let Err(e) = self.outputs.audio.play() {
                warn!("alert sound failed to start: {e:#}");
            }
            self.outputs.events.record(&MonitorEvent::new(
                MonitorEventKind::AlertFired,
                sample.timestamp,
                update.score,
            ));
            if let Err(e) = self.outputs.notifier.send_alert(&self.alert_message) {
                warn!("alert notification failed: {e:#}");
            }
        }

        if update.eye_state == EyeState::Open {
            if let Err(e) = self.outputs.audio.stop() {
                warn!("alert sound failed to stop: {e:#}");
            }
        }

        if update.fatigued != self.was_fatigued {
            let kind = if update.fatigued {
                MonitorEventKind::FatigueEntered
            } else {
                MonitorEventKind::FatigueCleared
            };
            self.outputs
                .events
                .record(&MonitorEvent::new(kind, sample.timestamp, update.score));
            self.was_fatigued = update.fatigued;
        }
        if update.fatigued {
            self.summary.fatigued_ticks += 1;
        }
        self.summary.peak_score = self.summary.peak_score.max(update.score);

        self.outputs.display.render(&update);

        update
    }

    /// Counters so far, with the duration taken from the last sample seen.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            duration_secs: self.last_timestamp.as_secs_f64(),
            ..self.summary
        }
    }
}
