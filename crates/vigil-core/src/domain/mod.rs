//! Core domain types for drowsiness monitoring.

mod event;
mod sample;
mod state;
mod summary;

pub use event::{MonitorEvent, MonitorEventKind};
pub use sample::{FrameSample, Timestamp};
pub use state::{AlertDecision, DisplayUpdate, EyeState};
pub use summary::SessionSummary;
