//! Closed-eye debouncing.

use std::time::Duration;

use crate::domain::{EyeState, Timestamp};

/// Tracks continuous eye closure against a minimum duration.
///
/// A closure only *qualifies* for alerting once the eyes have stayed closed
/// for at least the configured minimum. Any open frame or face dropout
/// resets the closure clock, so brief blinks never qualify.
#[derive(Debug)]
pub struct EyeStateTracker {
    ear_threshold: f32,
    min_closed: Duration,
    closure_start: Option<Timestamp>,
}

impl EyeStateTracker {
    /// Creates a tracker with no closure in progress.
    #[must_use]
    pub const fn new(ear_threshold: f32, min_closed: Duration) -> Self {
        Self {
            ear_threshold,
            min_closed,
            closure_start: None,
        }
    }

    /// Consumes one EAR observation and reports the debounced state plus
    /// whether the current closure has lasted long enough to qualify.
    ///
    /// `None` means no face was visible. The tracker treats that as open
    /// eyes and forgets any closure in progress. A NaN value compares false
    /// against the threshold and therefore also reads as open.
    pub fn update(&mut self, ear: Option<f32>, now: Timestamp) -> (EyeState, bool) {
        let Some(ear) = ear else {
            self.closure_start = None;
            return (EyeState::Open, false);
        };

        if ear < self.ear_threshold {
            let start = *self.closure_start.get_or_insert(now);
            let qualifies = now.saturating_since(start) >= self.min_closed;
            (EyeState::Closed, qualifies)
        } else {
            self.closure_start = None;
            (EyeState::Open, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> EyeStateTracker {
        EyeStateTracker::new(0.3, Duration::from_secs(2))
    }

    fn at(secs: f64) -> Timestamp {
        Timestamp::from_secs_f64(secs).unwrap()
    }

    #[test]
    fn test_open_frame_reports_open() {
        let mut tracker = tracker();
        assert_eq!(tracker.update(Some(0.35), at(0.0)), (EyeState::Open, false));
    }

    #[test]
    fn test_first_closed_frame_never_qualifies() {
        let mut tracker = tracker();
        assert_eq!(tracker.update(Some(0.2), at(0.0)), (EyeState::Closed, false));
    }

    #[test]
    fn test_qualifies_at_exact_minimum_duration() {
        let mut tracker = tracker();
        tracker.update(Some(0.2), at(0.0));
        tracker.update(Some(0.2), at(1.0));
        assert_eq!(tracker.update(Some(0.2), at(2.0)), (EyeState::Closed, true));
    }

    #[test]
    fn test_brief_blink_never_qualifies() {
        let mut tracker = tracker();
        assert_eq!(tracker.update(Some(0.2), at(0.0)), (EyeState::Closed, false));
        assert_eq!(tracker.update(Some(0.2), at(0.5)), (EyeState::Closed, false));
        assert_eq!(tracker.update(Some(0.35), at(1.0)), (EyeState::Open, false));
    }

    #[test]
    fn test_reopening_resets_the_closure_clock() {
        let mut tracker = tracker();
        tracker.update(Some(0.2), at(0.0));
        tracker.update(Some(0.35), at(1.5));
        tracker.update(Some(0.2), at(2.0));
        // Only 1.5s into the new closure, the old one does not count.
        assert_eq!(tracker.update(Some(0.2), at(3.5)), (EyeState::Closed, false));
        assert_eq!(tracker.update(Some(0.2), at(4.0)), (EyeState::Closed, true));
    }

    #[test]
    fn test_face_dropout_reports_open_and_resets() {
        let mut tracker = tracker();
        tracker.update(Some(0.2), at(0.0));
        tracker.update(Some(0.2), at(1.5));
        assert_eq!(tracker.update(None, at(1.6)), (EyeState::Open, false));
        tracker.update(Some(0.2), at(2.0));
        // The closure restarted at 2.0, so 3.5 is still too early.
        assert_eq!(tracker.update(Some(0.2), at(3.5)), (EyeState::Closed, false));
        assert_eq!(tracker.update(Some(0.2), at(4.0)), (EyeState::Closed, true));
    }

    #[test]
    fn test_ear_equal_to_threshold_is_open() {
        let mut tracker = tracker();
        assert_eq!(tracker.update(Some(0.3), at(0.0)), (EyeState::Open, false));
    }

    #[test]
    fn test_nan_ear_reads_as_open() {
        let mut tracker = tracker();
        tracker.update(Some(0.2), at(0.0));
        assert_eq!(
            tracker.update(Some(f32::NAN), at(1.0)),
            (EyeState::Open, false)
        );
    }

    #[test]
    fn test_zero_minimum_qualifies_immediately() {
        let mut tracker = EyeStateTracker::new(0.3, Duration::ZERO);
        assert_eq!(tracker.update(Some(0.2), at(0.0)), (EyeState::Closed, true));
    }

    #[test]
    fn test_backwards_clock_does_not_qualify() {
        let mut tracker = tracker();
        tracker.update(Some(0.2), at(5.0));
        // Out-of-order sample reads as zero elapsed closure time.
        assert_eq!(tracker.update(Some(0.2), at(3.0)), (EyeState::Closed, false));
    }
}
