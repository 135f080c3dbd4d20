//! Session events emitted by the monitor loop.

use serde::Serialize;

use super::Timestamp;

/// The kind of a session event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorEventKind {
    /// A drowsiness alert fired.
    AlertFired,
    /// The fatigue score reached the fatigue threshold.
    FatigueEntered,
    /// The fatigue score decayed back below the fatigue threshold.
    FatigueCleared,
}

/// A noteworthy moment in a monitoring session.
///
/// Serializes as a flat object, e.g.
/// `{"event":"alert_fired","t":3.0,"score":1}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonitorEvent {
    /// What happened.
    #[serde(rename = "event")]
    pub kind: MonitorEventKind,
    /// When it happened, in seconds since session start.
    #[serde(rename = "t")]
    pub timestamp: Timestamp,
    /// Fatigue score after the event.
    pub score: u32,
}

impl MonitorEvent {
    /// Creates an event.
    #[must_use]
    pub const fn new(kind: MonitorEventKind, timestamp: Timestamp, score: u32) -> Self {
        Self {
            kind,
            timestamp,
            score,
        }
    }
}
