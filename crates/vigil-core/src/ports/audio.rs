//! Alert sound port.

/// Port for controlling the alert sound.
pub trait AudioAlert: Send + Sync {
    /// Starts the alert sound. Calling while it is already playing is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if playback could not start.
    fn play(&self) -> anyhow::Result<()>;

    /// Stops the alert sound. Calling while nothing is playing is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if an active playback could not be stopped.
    fn stop(&self) -> anyhow::Result<()>;
}
