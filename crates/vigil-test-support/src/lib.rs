//! Test support utilities for vigil.
//!
//! Provides mocks for the core ports and builders for synthetic EAR
//! traces, for testing the monitoring loop without a camera or alert
//! hardware.
//!
//! # Example
//!
//! ```
//! use vigil_test_support::{MockSignalSource, TraceBuilder};
//!
//! // Script a session: one second of open eyes, then a 3s closure
//! let samples = TraceBuilder::new()
//!     .open_for(1.0)
//!     .closed_for(3.0)
//!     .samples();
//!
//! // Feed it through a mock source
//! let source = MockSignalSource::new(samples);
//! ```

mod builders;
mod mocks;

pub use builders::{TraceBuilder, CLOSED_EAR, OPEN_EAR};
pub use mocks::{
    AudioCall, MockAudioAlert, MockDisplay, MockEventLogger, MockNotifier, MockSignalSource,
};
