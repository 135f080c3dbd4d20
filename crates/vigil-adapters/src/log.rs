//! Event logging through the tracing subscriber.

use tracing::info;
use vigil_core::{EventLogger, MonitorEvent, MonitorEventKind};

/// Event logger that forwards session events to the `tracing` subscriber.
///
/// The default event sink when no event file is configured.
pub struct TracingEventLogger;

impl EventLogger for TracingEventLogger {
    fn record(&self, event: &MonitorEvent) {
        let t = event.timestamp.as_secs_f64();
        match event.kind {
            MonitorEventKind::AlertFired => {
                info!(t, score = event.score, "drowsiness alert");
            }
            MonitorEventKind::FatigueEntered => {
                info!(t, score = event.score, "fatigue threshold reached, take a break");
            }
            MonitorEventKind::FatigueCleared => {
                info!(t, score = event.score, "fatigue cleared");
            }
        }
    }
}
