//! Recorded trace signal source.
//!
//! Traces are JSON Lines files with one record per frame:
//!
//! ```text
//! {"t": 0.0, "ear": 0.31}
//! {"t": 0.5, "ear": 0.18}
//! {"t": 1.0, "ear": null}
//! ```
//!
//! `t` is seconds since session start. A null or missing `ear` marks a
//! frame with no detectable face.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;
use vigil_core::{FrameSample, SignalSource, Timestamp};

/// One line of a trace file.
#[derive(Debug, Deserialize)]
struct TraceRecord {
    t: f64,
    #[serde(default)]
    ear: Option<f32>,
}

/// Signal source reading a recorded trace file.
///
/// Malformed lines surface as errors that name the file and line number;
/// the caller decides whether to skip them. Blank lines are ignored.
#[derive(Debug)]
pub struct TraceSignalSource {
    reader: BufReader<File>,
    path: String,
    line_no: usize,
    replay_started: Option<Instant>,
}

impl TraceSignalSource {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("failed to open trace {}", path.display()))?;
        debug!("reading trace from {}", path.display());
        Ok(Self {
            reader: BufReader::new(file),
            path: path.display().to_string(),
            line_no: 0,
            replay_started: None,
        })
    }

    /// Replays the trace in real time: each sample is held back until its
    /// recorded timestamp has elapsed on the wall clock.
    #[must_use]
    pub fn paced(mut self) -> Self {
        self.replay_started = Some(Instant::now());
        self
    }
}

impl SignalSource for TraceSignalSource {
    fn next_sample(&mut self) -> Result<Option<FrameSample>> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .with_context(|| format!("failed to read {}", self.path))?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let record: TraceRecord = serde_json::from_str(trimmed)
                .with_context(|| format!("{}:{}: invalid trace record", self.path, self.line_no))?;
            let timestamp = Timestamp::from_secs_f64(record.t)
                .with_context(|| format!("{}:{}: invalid timestamp", self.path, self.line_no))?;

            if let Some(started) = self.replay_started {
                let due = timestamp.as_duration();
                let elapsed = started.elapsed();
                if due > elapsed {
                    std::thread::sleep(due - elapsed);
                }
            }

            return Ok(Some(FrameSample {
                ear: record.ear,
                timestamp,
            }));
        }
    }
}
