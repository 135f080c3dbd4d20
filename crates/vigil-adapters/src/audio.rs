//! Alert sound playback through an external player command.

use std::process::{Child, Command, Stdio};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{debug, warn};
use vigil_core::AudioAlert;

/// Plays the alert sound by spawning an external player process.
///
/// The command line is split on whitespace, so `aplay -q alert.wav` runs
/// `aplay` with two arguments; no shell is involved. While an earlier
/// player process is still running, `play` is a no-op. `stop` kills it.
pub struct CommandAudioAlert {
    program: String,
    args: Vec<String>,
    child: Mutex<Option<Child>>,
}

impl CommandAudioAlert {
    /// Creates an adapter from a player command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is empty.
    pub fn new(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace().map(String::from);
        let program = parts.next().context("audio command is empty")?;
        Ok(Self {
            program,
            args: parts.collect(),
            child: Mutex::new(None),
        })
    }
}

impl AudioAlert for CommandAudioAlert {
    fn play(&self) -> Result<()> {
        let mut child = self
            .child
            .lock()
            .map_err(|e| anyhow::anyhow!("lock poisoned: {e}"))?;

        // Still playing from an earlier alert, leave it running.
        if let Some(current) = child.as_mut() {
            if current
                .try_wait()
                .context("failed to poll audio player")?
                .is_none()
            {
                return Ok(());
            }
        }

        debug!("starting alert sound: {} {:?}", self.program, self.args);
        let spawned = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to spawn audio player {}", self.program))?;
        *child = Some(spawned);
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        let mut child = self
            .child
            .lock()
            .map_err(|e| anyhow::anyhow!("lock poisoned: {e}"))?;

        if let Some(mut current) = child.take() {
            if current
                .try_wait()
                .context("failed to poll audio player")?
                .is_none()
            {
                if let Err(e) = current.kill() {
                    warn!("failed to kill audio player: {e}");
                }
            }
            // Reap so the player never lingers as a zombie.
            let _ = current.wait();
        }
        Ok(())
    }
}

impl Drop for CommandAudioAlert {
    fn drop(&mut self) {
        if let Ok(mut child) = self.child.lock() {
            if let Some(mut current) = child.take() {
                let _ = current.kill();
                let _ = current.wait();
            }
        }
    }
}

/// Audio adapter that does nothing, used when no player is configured.
pub struct NullAudioAlert;

impl AudioAlert for NullAudioAlert {
    fn play(&self) -> Result<()> {
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        Ok(())
    }
}
