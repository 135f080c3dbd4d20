//! Vigil Core - drowsiness monitoring engine.
//!
//! This crate contains the domain types, the temporal decision engine that
//! turns a stream of eye aspect ratio (EAR) samples into alert decisions,
//! and the port traits connecting the engine to signal sources and alert
//! collaborators.

pub mod config;
pub mod domain;
pub mod engine;
pub mod monitor;
pub mod ports;

pub use config::EngineConfig;
pub use domain::{
    AlertDecision, DisplayUpdate, EyeState, FrameSample, MonitorEvent, MonitorEventKind,
    SessionSummary, Timestamp,
};
pub use engine::{AlertGate, DecisionEngine, EyeStateTracker, FatigueAccumulator};
pub use monitor::{MonitorLoop, MonitorOutputs, ALERT_MESSAGE};
pub use ports::{AudioAlert, DisplayRenderer, EventLogger, Notifier, SignalSource};
