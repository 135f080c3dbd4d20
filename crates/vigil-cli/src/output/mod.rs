//! Output adapters for CLI.

mod events;
mod status;

pub use events::JsonlEventWriter;
pub use status::StatusLine;
