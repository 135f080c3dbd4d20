//! Fatigue scoring.

/// Decaying count of recent alerts.
///
/// Each fired alert adds one. Each open-eyed tick subtracts one, floored at
/// zero. Growth is bounded by the alert cadence while decay runs at the
/// tick rate, so the score only builds while closures keep coming.
#[derive(Debug)]
pub struct FatigueAccumulator {
    threshold: u32,
    cap: Option<u32>,
    score: u32,
}

impl FatigueAccumulator {
    /// Creates an accumulator starting at zero.
    #[must_use]
    pub const fn new(threshold: u32, cap: Option<u32>) -> Self {
        Self {
            threshold,
            cap,
            score: 0,
        }
    }

    /// Records a fired alert.
    pub fn on_alert_fired(&mut self) {
        self.score = self.score.saturating_add(1);
        if let Some(cap) = self.cap {
            self.score = self.score.min(cap);
        }
    }

    /// Records an open-eyed tick.
    pub fn on_tick_open(&mut self) {
        self.score = self.score.saturating_sub(1);
    }

    /// Whether the score is at or above the fatigue threshold.
    ///
    /// Not sticky: once decay brings the score back under the threshold
    /// this reads false again.
    #[must_use]
    pub const fn is_fatigued(&self) -> bool {
        self.score >= self.threshold
    }

    /// Current score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let fatigue = FatigueAccumulator::new(5, None);
        assert_eq!(fatigue.score(), 0);
        assert!(!fatigue.is_fatigued());
    }

    #[test]
    fn test_alert_increments_and_open_decrements() {
        let mut fatigue = FatigueAccumulator::new(5, None);
        fatigue.on_alert_fired();
        fatigue.on_alert_fired();
        assert_eq!(fatigue.score(), 2);

        fatigue.on_tick_open();
        assert_eq!(fatigue.score(), 1);
    }

    #[test]
    fn test_score_never_goes_below_zero() {
        let mut fatigue = FatigueAccumulator::new(5, None);
        fatigue.on_tick_open();
        fatigue.on_tick_open();
        assert_eq!(fatigue.score(), 0);
    }

    #[test]
    fn test_fatigued_at_exact_threshold() {
        let mut fatigue = FatigueAccumulator::new(3, None);
        fatigue.on_alert_fired();
        fatigue.on_alert_fired();
        assert!(!fatigue.is_fatigued());
        fatigue.on_alert_fired();
        assert!(fatigue.is_fatigued());
    }

    #[test]
    fn test_fatigue_is_not_sticky() {
        let mut fatigue = FatigueAccumulator::new(2, None);
        fatigue.on_alert_fired();
        fatigue.on_alert_fired();
        assert!(fatigue.is_fatigued());

        fatigue.on_tick_open();
        assert!(!fatigue.is_fatigued());

        fatigue.on_alert_fired();
        assert!(fatigue.is_fatigued());
    }

    #[test]
    fn test_uncapped_score_keeps_growing() {
        let mut fatigue = FatigueAccumulator::new(5, None);
        for _ in 0..100 {
            fatigue.on_alert_fired();
        }
        assert_eq!(fatigue.score(), 100);
    }

    #[test]
    fn test_cap_bounds_the_score() {
        let mut fatigue = FatigueAccumulator::new(5, Some(6));
        for _ in 0..100 {
            fatigue.on_alert_fired();
        }
        assert_eq!(fatigue.score(), 6);
        assert!(fatigue.is_fatigued());
    }
}
