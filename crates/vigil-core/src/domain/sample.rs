//! Frame samples and session-relative timestamps.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A point in time measured from the start of a monitoring session.
///
/// Timestamps come from a monotonic clock (or from a recorded trace) and
/// are only ever compared against other timestamps of the same session.
/// Wall-clock time never enters the engine.
///
/// Serializes as fractional seconds since session start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Timestamp(Duration);

impl Timestamp {
    /// The session start.
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Creates a timestamp from elapsed time since session start.
    #[must_use]
    pub const fn from_elapsed(elapsed: Duration) -> Self {
        Self(elapsed)
    }

    /// Creates a timestamp from whole seconds since session start.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    /// Creates a timestamp from fractional seconds since session start.
    ///
    /// # Errors
    ///
    /// Returns an error if `secs` is negative, NaN, or infinite.
    pub fn from_secs_f64(secs: f64) -> anyhow::Result<Self> {
        let elapsed = Duration::try_from_secs_f64(secs).map_err(|_| {
            anyhow::anyhow!("timestamp must be a finite, non-negative number of seconds, got {secs}")
        })?;
        Ok(Self(elapsed))
    }

    /// Elapsed time since `earlier`, clamped to zero when this timestamp is
    /// the older one. A clock that jumps backwards therefore reads as zero
    /// elapsed time instead of underflowing.
    #[must_use]
    pub fn saturating_since(self, earlier: Self) -> Duration {
        self.0.saturating_sub(earlier.0)
    }

    /// Seconds since session start as a float.
    #[must_use]
    pub fn as_secs_f64(self) -> f64 {
        self.0.as_secs_f64()
    }

    /// The underlying duration since session start.
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        self.0
    }
}

impl TryFrom<f64> for Timestamp {
    type Error = anyhow::Error;

    fn try_from(secs: f64) -> Result<Self, Self::Error> {
        Self::from_secs_f64(secs)
    }
}

impl From<Timestamp> for f64 {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.as_secs_f64()
    }
}

/// One tick of input: the eye aspect ratio measured for a frame, or `None`
/// when no face was detectable, stamped with the session-relative time the
/// frame was observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    /// Eye aspect ratio, `None` when no face was detected.
    pub ear: Option<f32>,
    /// When the frame was observed.
    pub timestamp: Timestamp,
}

impl FrameSample {
    /// A sample with a measured EAR.
    #[must_use]
    pub const fn present(ear: f32, timestamp: Timestamp) -> Self {
        Self {
            ear: Some(ear),
            timestamp,
        }
    }

    /// A sample for a frame with no detectable face.
    #[must_use]
    pub const fn absent(timestamp: Timestamp) -> Self {
        Self {
            ear: None,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturating_since_forward() {
        let earlier = Timestamp::from_secs(2);
        let later = Timestamp::from_secs(5);
        assert_eq!(later.saturating_since(earlier), Duration::from_secs(3));
    }

    #[test]
    fn test_saturating_since_clamps_backwards() {
        let earlier = Timestamp::from_secs(5);
        let later = Timestamp::from_secs(2);
        assert_eq!(later.saturating_since(earlier), Duration::ZERO);
    }

    #[test]
    fn test_from_secs_f64_rejects_negative() {
        assert!(Timestamp::from_secs_f64(-0.5).is_err());
    }

    #[test]
    fn test_from_secs_f64_rejects_non_finite() {
        assert!(Timestamp::from_secs_f64(f64::NAN).is_err());
        assert!(Timestamp::from_secs_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn test_from_secs_f64_accepts_zero() {
        let timestamp = Timestamp::from_secs_f64(0.0).unwrap();
        assert_eq!(timestamp, Timestamp::ZERO);
    }

    #[test]
    fn test_roundtrip_through_seconds() {
        let timestamp = Timestamp::from_secs_f64(1.5).unwrap();
        assert!((timestamp.as_secs_f64() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sample_constructors() {
        let present = FrameSample::present(0.25, Timestamp::from_secs(1));
        assert_eq!(present.ear, Some(0.25));

        let absent = FrameSample::absent(Timestamp::from_secs(1));
        assert_eq!(absent.ear, None);
    }
}
