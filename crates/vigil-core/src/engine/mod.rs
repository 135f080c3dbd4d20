//! The temporal decision engine.
//!
//! Three small state machines do the real work. [`EyeStateTracker`]
//! debounces eye closures against a minimum duration, [`AlertGate`] spaces
//! alerts by a cooldown, and [`FatigueAccumulator`] keeps a decaying score
//! of recent alerts. [`DecisionEngine`] wires them together per tick.

mod alert_gate;
mod eye_tracker;
mod fatigue;

pub use alert_gate::AlertGate;
pub use eye_tracker::EyeStateTracker;
pub use fatigue::FatigueAccumulator;

use anyhow::Result;

use crate::config::EngineConfig;
use crate::domain::{DisplayUpdate, EyeState, FrameSample};

/// The per-tick decision engine.
///
/// [`DecisionEngine::tick`] is pure with respect to the outside world: it
/// consumes one sample, advances internal state, and returns a
/// [`DisplayUpdate`]. All I/O stays with the caller.
#[derive(Debug)]
pub struct DecisionEngine {
    tracker: EyeStateTracker,
    gate: AlertGate,
    fatigue: FatigueAccumulator,
}

impl DecisionEngine {
    /// Creates an engine from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tracker: EyeStateTracker::new(config.ear_threshold, config.closed_eye_min_duration),
            gate: AlertGate::new(config.alert_cooldown),
            fatigue: FatigueAccumulator::new(config.fatigue_threshold, config.fatigue_score_cap),
        })
    }

    /// Advances the engine by one sample.
    ///
    /// An alert tick leaves the score untouched by decay (the eyes are
    /// closed on such a tick by construction), while every open or absent
    /// tick decays it by one.
    pub fn tick(&mut self, sample: &FrameSample) -> DisplayUpdate {
        let (eye_state, qualifies) = self.tracker.update(sample.ear, sample.timestamp);
        let decision = self.gate.try_fire(qualifies, sample.timestamp);

        if decision.is_fire() {
            self.fatigue.on_alert_fired();
        }
        if eye_state == EyeState::Open {
            self.fatigue.on_tick_open();
        }

        DisplayUpdate {
            eye_state,
            decision,
            fatigued: self.fatigue.is_fatigued(),
            score: self.fatigue.score(),
            signal_lost: sample.ear.is_none(),
        }
    }

    /// Current fatigue score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.fatigue.score()
    }
}
