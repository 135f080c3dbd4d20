//! Vigil Adapters - external adapters for vigil.
//!
//! This crate provides adapters for:
//! - Recorded trace and live stdin signal sources
//! - Alert sound playback through an external player command
//! - SMS notification delivery via the Twilio REST API
//! - Event logging through the tracing subscriber

pub mod audio;
pub mod log;
pub mod sms;
pub mod stdin;
pub mod trace;

pub use audio::{CommandAudioAlert, NullAudioAlert};
pub use log::TracingEventLogger;
pub use sms::{NullNotifier, TwilioConfig, TwilioNotifier};
pub use stdin::StdinSignalSource;
pub use trace::TraceSignalSource;
