//! Live signal source reading EAR values from standard input.
//!
//! One value per line: a float EAR, or `-` (or an empty line) for a frame
//! with no detectable face. Samples are stamped on arrival from a
//! monotonic clock, so timestamps never run backwards.

use std::io::{self, BufRead, BufReader};
use std::time::Instant;

use anyhow::{Context, Result};
use vigil_core::{FrameSample, SignalSource, Timestamp};

/// Signal source reading one EAR value per line.
pub struct StdinSignalSource {
    input: Box<dyn BufRead + Send>,
    started: Instant,
}

impl StdinSignalSource {
    /// Creates a source reading from stdin. The session clock starts now.
    #[must_use]
    pub fn new() -> Self {
        Self::from_reader(BufReader::new(io::stdin()))
    }

    /// Creates a source reading from an arbitrary reader.
    pub fn from_reader(reader: impl BufRead + Send + 'static) -> Self {
        Self {
            input: Box::new(reader),
            started: Instant::now(),
        }
    }
}

impl Default for StdinSignalSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalSource for StdinSignalSource {
    fn next_sample(&mut self) -> Result<Option<FrameSample>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from input")?;
        if read == 0 {
            return Ok(None);
        }

        // One clock read per tick; every consumer sees the same timestamp.
        let timestamp = Timestamp::from_elapsed(self.started.elapsed());

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == "-" {
            return Ok(Some(FrameSample::absent(timestamp)));
        }

        let ear: f32 = trimmed
            .parse()
            .with_context(|| format!("invalid EAR value {trimmed:?}"))?;
        Ok(Some(FrameSample::present(ear, timestamp)))
    }
}
