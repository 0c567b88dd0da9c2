//! Score accrual and the multiplier state machine
//!
//! Score grows with elapsed game time while the clock is running, at
//! double rate while a multiplier is active. Transitions surface as
//! [`MultiplierEvent`]s returned to the caller, which reacts
//! synchronously (the engine uses them to restyle the balloon); the
//! state machine itself knows nothing about shields or rendering.

use crate::consts::{MULTIPLIER_DURATION, MULTIPLIER_FACTOR, SCORE_RATE};

/// Phase of the scoring clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScorePhase {
    /// Frozen: before the warm-up ends and after game over
    #[default]
    Inactive,
    /// Accruing at the base rate
    Running,
    /// Accruing at the amplified rate, counting down to `Running`
    MultiplierActive,
}

/// Transition notification, delivered synchronously to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiplierEvent {
    Entered,
    Exited,
}

/// The scoring clock
#[derive(Debug, Clone, Default)]
pub struct ScoreClock {
    phase: ScorePhase,
    /// Fractional score accumulator; truncated for display
    units: f64,
    /// Remaining multiplier window, meaningful in `MultiplierActive`
    multiplier_left: f32,
}

impl ScoreClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ScorePhase {
        self.phase
    }

    /// Current score. Never decreases over a session.
    pub fn score(&self) -> u64 {
        self.units as u64
    }

    /// Inactive -> Running; idempotent once running
    pub fn start(&mut self) {
        if self.phase == ScorePhase::Inactive {
            self.phase = ScorePhase::Running;
        }
    }

    /// Any phase -> Inactive; accrual freezes, score is kept
    pub fn stop(&mut self) {
        self.phase = ScorePhase::Inactive;
    }

    /// Running -> MultiplierActive with a fresh window.
    ///
    /// Collecting another multiplier while one is active refreshes the
    /// window without firing a second `Entered`. Ignored while inactive
    /// (no power-up can exist before the warm-up ends, but a stale
    /// pickup racing game over must not restart accrual).
    pub fn begin_multiplier(&mut self) -> Option<MultiplierEvent> {
        match self.phase {
            ScorePhase::Running => {
                self.phase = ScorePhase::MultiplierActive;
                self.multiplier_left = MULTIPLIER_DURATION;
                Some(MultiplierEvent::Entered)
            }
            ScorePhase::MultiplierActive => {
                self.multiplier_left = MULTIPLIER_DURATION;
                None
            }
            ScorePhase::Inactive => {
                log::debug!("multiplier pickup ignored while scoring is inactive");
                None
            }
        }
    }

    /// Advance by one tick's delta time.
    ///
    /// Returns `Exited` exactly once, on the tick the multiplier window
    /// reaches zero accumulated delta.
    pub fn advance(&mut self, dt: f32) -> Option<MultiplierEvent> {
        match self.phase {
            ScorePhase::Inactive => None,
            ScorePhase::Running => {
                self.units += SCORE_RATE * dt as f64;
                None
            }
            ScorePhase::MultiplierActive => {
                self.units += SCORE_RATE * MULTIPLIER_FACTOR * dt as f64;
                self.multiplier_left -= dt;
                if self.multiplier_left <= 0.0 {
                    self.phase = ScorePhase::Running;
                    Some(MultiplierEvent::Exited)
                } else {
                    None
                }
            }
        }
    }
}
