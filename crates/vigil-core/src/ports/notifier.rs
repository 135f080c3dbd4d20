//! Out-of-band notification port.

/// Port for delivering alert notifications (SMS, webhooks).
///
/// Implementations must return quickly. Slow delivery belongs on a
/// background worker so the monitor loop never stalls on the network.
pub trait Notifier: Send + Sync {
    /// Queues one notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be accepted.
    fn send_alert(&self, message: &str) -> anyhow::Result<()>;
}
