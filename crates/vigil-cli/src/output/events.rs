//! Event log output adapter.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use tracing::warn;
use vigil_core::{EventLogger, MonitorEvent};

enum Sink {
    /// One JSON object per line, written as events arrive.
    Lines(Box<dyn Write + Send>),
    /// Events held back and written as one JSON array on flush.
    Array {
        writer: Box<dyn Write + Send>,
        events: Vec<MonitorEvent>,
    },
}

/// JSON Lines event log adapter.
pub struct JsonlEventWriter {
    sink: Mutex<Sink>,
}

impl JsonlEventWriter {
    /// Creates an event writer targeting stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates an event writer targeting the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Mutex::new(Sink::Lines(writer)),
        }
    }

    /// Creates an event writer targeting a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn file(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create event log {}", path.display()))?;
        Ok(Self::new(Box::new(file)))
    }

    /// Switches to pretty output: events are held back and written as one
    /// indented JSON array when the log is flushed.
    #[must_use]
    pub fn pretty(self) -> Self {
        let writer = match self
            .sink
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
        {
            Sink::Lines(writer) | Sink::Array { writer, .. } => writer,
        };
        Self {
            sink: Mutex::new(Sink::Array {
                writer,
                events: Vec::new(),
            }),
        }
    }
}

impl EventLogger for JsonlEventWriter {
    fn record(&self, event: &MonitorEvent) {
        let Ok(mut sink) = self.sink.lock() else {
            return;
        };
        match &mut *sink {
            Sink::Lines(writer) => match serde_json::to_string(event) {
                Ok(json) => {
                    if let Err(e) = writeln!(writer, "{json}") {
                        warn!("failed to write event: {e}");
                    }
                }
                Err(e) => warn!("failed to serialize event: {e}"),
            },
            Sink::Array { events, .. } => events.push(*event),
        }
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut sink = self
            .sink
            .lock()
            .map_err(|e| anyhow::anyhow!("lock poisoned: {e}"))?;
        match &mut *sink {
            Sink::Lines(writer) => writer.flush()?,
            Sink::Array { writer, events } => {
                let json = serde_json::to_string_pretty(events)?;
                writeln!(writer, "{json}")?;
                writer.flush()?;
            }
        }
        Ok(())
    }
}
