//! Alert rate limiting.

use std::time::Duration;

use crate::domain::{AlertDecision, Timestamp};

/// Spaces alerts by a cooldown window.
///
/// The first qualifying tick of a session always fires. After that, a new
/// alert fires only when strictly more than the cooldown has elapsed since
/// the previous fire. The window is measured fire-to-fire, not from the
/// start of the closure.
#[derive(Debug)]
pub struct AlertGate {
    cooldown: Duration,
    last_alert: Option<Timestamp>,
}

impl AlertGate {
    /// Creates a gate that has never fired.
    #[must_use]
    pub const fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_alert: None,
        }
    }

    /// Decides whether an alert fires on this tick.
    ///
    /// A fire records `now` as the new cooldown anchor. Suppressed and
    /// non-qualifying ticks never touch the anchor.
    pub fn try_fire(&mut self, qualifies: bool, now: Timestamp) -> AlertDecision {
        if !qualifies {
            return AlertDecision::None;
        }

        let ready = match self.last_alert {
            None => true,
            Some(last) => now.saturating_since(last) > self.cooldown,
        };

        if ready {
            self.last_alert = Some(now);
            AlertDecision::Fire
        } else {
            AlertDecision::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AlertGate {
        AlertGate::new(Duration::from_secs(5))
    }

    fn at(secs: f64) -> Timestamp {
        Timestamp::from_secs_f64(secs).unwrap()
    }

    #[test]
    fn test_first_qualifying_tick_fires() {
        let mut gate = gate();
        assert_eq!(gate.try_fire(true, at(2.0)), AlertDecision::Fire);
    }

    #[test]
    fn test_non_qualifying_tick_never_fires() {
        let mut gate = gate();
        assert_eq!(gate.try_fire(false, at(2.0)), AlertDecision::None);
        // The gate is still fresh, so the next qualifying tick fires.
        assert_eq!(gate.try_fire(true, at(2.5)), AlertDecision::Fire);
    }

    #[test]
    fn test_fire_within_cooldown_is_suppressed() {
        let mut gate = gate();
        gate.try_fire(true, at(2.0));
        assert_eq!(gate.try_fire(true, at(6.0)), AlertDecision::None);
    }

    #[test]
    fn test_exactly_cooldown_elapsed_is_still_suppressed() {
        let mut gate = gate();
        gate.try_fire(true, at(2.0));
        assert_eq!(gate.try_fire(true, at(7.0)), AlertDecision::None);
        assert_eq!(gate.try_fire(true, at(7.5)), AlertDecision::Fire);
    }

    #[test]
    fn test_suppressed_tick_does_not_reset_the_window() {
        let mut gate = gate();
        gate.try_fire(true, at(2.0));
        // Suppressed at 6.0. If that had moved the anchor, 7.5 would also
        // be suppressed.
        gate.try_fire(true, at(6.0));
        assert_eq!(gate.try_fire(true, at(7.5)), AlertDecision::Fire);
    }

    #[test]
    fn test_backwards_clock_reads_as_within_cooldown() {
        let mut gate = gate();
        gate.try_fire(true, at(10.0));
        assert_eq!(gate.try_fire(true, at(3.0)), AlertDecision::None);
    }

    #[test]
    fn test_zero_cooldown_needs_some_elapsed_time() {
        let mut gate = AlertGate::new(Duration::ZERO);
        assert_eq!(gate.try_fire(true, at(1.0)), AlertDecision::Fire);
        // Same instant: zero elapsed is not strictly greater than zero.
        assert_eq!(gate.try_fire(true, at(1.0)), AlertDecision::None);
        assert_eq!(gate.try_fire(true, at(1.001)), AlertDecision::Fire);
    }
}
