//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the decision engine and
//! external adapters.

mod audio;
mod display;
mod event_log;
mod notifier;
mod signal_source;

pub use audio::AudioAlert;
pub use display::DisplayRenderer;
pub use event_log::EventLogger;
pub use notifier::Notifier;
pub use signal_source::SignalSource;
