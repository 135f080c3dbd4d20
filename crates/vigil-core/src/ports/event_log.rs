//! Session event log port.

use crate::domain::MonitorEvent;

/// Port for recording session events.
pub trait EventLogger: Send + Sync {
    /// Records one event. Fire-and-forget: implementations handle their
    /// own write failures.
    fn record(&self, event: &MonitorEvent);

    /// Flushes buffered events, called once when the session ends.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
