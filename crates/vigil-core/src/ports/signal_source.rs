//! Signal source port for pulling frame samples.

use crate::domain::FrameSample;

/// Port for pulling EAR samples from a source.
///
/// The monitor loop drives the source. A live source blocks until the next
/// sample arrives; a recorded source returns immediately.
pub trait SignalSource: Send {
    /// Pulls the next sample.
    ///
    /// Returns `Ok(None)` once the source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error when a sample could not be produced. The caller may
    /// skip it and keep pulling.
    fn next_sample(&mut self) -> anyhow::Result<Option<FrameSample>>;
}
