//! Per-tick engine outputs.

use std::fmt;

/// Debounced eye state for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyeState {
    /// Eyes open, or no face visible.
    Open,
    /// Eyes closed (EAR below threshold).
    Closed,
}

impl fmt::Display for EyeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::Closed => f.write_str("closed"),
        }
    }
}

/// Whether an alert fired on a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlertDecision {
    /// No alert this tick.
    #[default]
    None,
    /// A drowsiness alert fired this tick.
    Fire,
}

impl AlertDecision {
    /// True when the decision is [`AlertDecision::Fire`].
    #[must_use]
    pub const fn is_fire(self) -> bool {
        matches!(self, Self::Fire)
    }
}

/// Everything downstream consumers need to render one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayUpdate {
    /// Debounced eye state.
    pub eye_state: EyeState,
    /// Alert decision for this tick.
    pub decision: AlertDecision,
    /// Whether the fatigue score is at or above the fatigue threshold.
    pub fatigued: bool,
    /// Fatigue score after this tick.
    pub score: u32,
    /// True when the sample carried no face.
    pub signal_lost: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye_state_display() {
        assert_eq!(EyeState::Open.to_string(), "open");
        assert_eq!(EyeState::Closed.to_string(), "closed");
    }

    #[test]
    fn test_decision_default_is_none() {
        assert_eq!(AlertDecision::default(), AlertDecision::None);
        assert!(!AlertDecision::None.is_fire());
        assert!(AlertDecision::Fire.is_fire());
    }
}
