//! Spawn scheduling and difficulty ramping
//!
//! Each hazard kind and the power-up pool gets an independent
//! [`SpawnTimer`]: a spawn countdown plus a difficulty countdown, held
//! as a small by-value record and advanced by a pure reducer. The
//! scheduler stays dormant through the warm-up, gates the late-game
//! kinds behind their activation times, and reports what to instantiate
//! each tick; actually placing the objects is the engine's job.

use serde::{Deserialize, Serialize};

use super::entity::HazardKind;

/// What a difficulty expiry does to its timer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RampEffect {
    /// Shorten the spawn interval by `step`, clamped to `floor`
    Quicken { step: f32, floor: f32 },
    /// Add one to the per-wave count, clamped to `cap`
    Swell { cap: u32 },
}

/// Difficulty-ramp tuning for one spawn timer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampTuning {
    /// Seconds between difficulty steps
    pub interval: f32,
    pub effect: RampEffect,
}

/// Static tuning for one spawn timer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimerTuning {
    /// Starting seconds between spawns
    pub interval: f32,
    /// Session time before this timer starts counting at all
    pub activation: f32,
    /// Absent for timers that never get harder (power-ups)
    pub ramp: Option<RampTuning>,
}

/// Live countdown state for one spawn timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTimer {
    /// Seconds until the next spawn
    countdown: f32,
    /// Current reset value; quicken ramps tighten this
    interval: f32,
    /// Seconds until the next difficulty step
    ramp_countdown: f32,
    /// Instances per spawn; swell ramps grow this
    wave: u32,
    tuning: TimerTuning,
}

impl SpawnTimer {
    pub fn new(tuning: TimerTuning) -> Self {
        Self {
            countdown: tuning.interval,
            interval: tuning.interval,
            ramp_countdown: tuning.ramp.map(|r| r.interval).unwrap_or(0.0),
            wave: 1,
            tuning,
        }
    }

    /// Pure reducer: one tick of countdown, returning the new state and
    /// how many instances to spawn this tick.
    ///
    /// The spawn countdown fires at most once per tick and resets to the
    /// current (possibly tightened) interval. The difficulty countdown
    /// runs in parallel; both may fire on the same tick.
    pub fn advance(mut self, dt: f32) -> (Self, u32) {
        self.countdown -= dt;
        let mut burst = 0;
        if self.countdown <= 0.0 {
            burst = self.wave;
            self.countdown = self.interval;
        }

        if let Some(ramp) = self.tuning.ramp {
            self.ramp_countdown -= dt;
            if self.ramp_countdown <= 0.0 {
                match ramp.effect {
                    RampEffect::Quicken { step, floor } => {
                        self.interval = (self.interval - step).max(floor);
                    }
                    RampEffect::Swell { cap } => {
                        self.wave = (self.wave + 1).min(cap);
                    }
                }
                self.ramp_countdown = ramp.interval;
            }
        }

        (self, burst)
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }
}

/// Full spawn tuning table, serializable for data-driven balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTuning {
    /// Seconds before the scheduler (and scoring) goes live
    pub warmup: f32,
    pub powerup: TimerTuning,
    pub bullet: TimerTuning,
    pub laser: TimerTuning,
    pub thornball: TimerTuning,
    pub explosion: TimerTuning,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            warmup: 3.0,
            powerup: TimerTuning {
                interval: 7.0,
                activation: 0.0,
                ramp: None,
            },
            bullet: TimerTuning {
                interval: 2.0,
                activation: 0.0,
                ramp: Some(RampTuning {
                    interval: 4.0,
                    effect: RampEffect::Quicken {
                        step: 0.1,
                        floor: 0.3,
                    },
                }),
            },
            laser: TimerTuning {
                interval: 5.0,
                activation: 0.0,
                ramp: Some(RampTuning {
                    interval: 15.0,
                    effect: RampEffect::Swell { cap: 10 },
                }),
            },
            thornball: TimerTuning {
                interval: 4.0,
                activation: 20.0,
                ramp: Some(RampTuning {
                    interval: 15.0,
                    effect: RampEffect::Swell { cap: 5 },
                }),
            },
            explosion: TimerTuning {
                interval: 8.0,
                activation: 60.0,
                ramp: Some(RampTuning {
                    interval: 15.0,
                    effect: RampEffect::Quicken {
                        step: 0.5,
                        floor: 1.0,
                    },
                }),
            },
        }
    }
}

/// One instantiation request, handed to the engine's factory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnRequest {
    Hazard(HazardKind),
    PowerUp,
}

/// Everything the scheduler decided during one tick
#[derive(Debug, Clone, Default)]
pub struct SchedulerTick {
    pub requests: Vec<SpawnRequest>,
    /// Set once, on the tick the warm-up ends: scoring begins now
    pub scoring_started: bool,
}

/// Per-kind spawn timers plus the warm-up gate
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    warmup: f32,
    powerup: SpawnTimer,
    bullet: SpawnTimer,
    laser: SpawnTimer,
    thornball: SpawnTimer,
    explosion: SpawnTimer,
    started: bool,
}

impl SpawnScheduler {
    pub fn new(tuning: &SpawnTuning) -> Self {
        Self {
            warmup: tuning.warmup,
            powerup: SpawnTimer::new(tuning.powerup),
            bullet: SpawnTimer::new(tuning.bullet),
            laser: SpawnTimer::new(tuning.laser),
            thornball: SpawnTimer::new(tuning.thornball),
            explosion: SpawnTimer::new(tuning.explosion),
            started: false,
        }
    }

    /// One tick of scheduling at session time `now`.
    ///
    /// Dormant before the warm-up ends, even if timers are pre-expired.
    /// Gated timers neither advance nor fire before their activation
    /// time. Every timer that expires this tick contributes requests.
    pub fn advance(&mut self, now: f32, dt: f32) -> SchedulerTick {
        let mut out = SchedulerTick::default();
        if now < self.warmup {
            return out;
        }
        if !self.started {
            self.started = true;
            out.scoring_started = true;
            log::info!("spawn scheduler live at t={now:.2}s");
        }

        let streams: [(&mut SpawnTimer, SpawnRequest); 5] = [
            (&mut self.powerup, SpawnRequest::PowerUp),
            (&mut self.bullet, SpawnRequest::Hazard(HazardKind::Bullet)),
            (&mut self.laser, SpawnRequest::Hazard(HazardKind::Laser)),
            (
                &mut self.thornball,
                SpawnRequest::Hazard(HazardKind::Thornball),
            ),
            (
                &mut self.explosion,
                SpawnRequest::Hazard(HazardKind::Explosion),
            ),
        ];
        for (timer, request) in streams {
            if now < timer.tuning.activation {
                continue;
            }
            let (next, burst) = timer.advance(dt);
            *timer = next;
            for _ in 0..burst {
                out.requests.push(request);
            }
        }

        if !out.requests.is_empty() {
            log::debug!("t={now:.2}s spawning {:?}", out.requests);
        }
        out
    }

    /// Current bullet interval, exposed for balance inspection
    pub fn bullet_interval(&self) -> f32 {
        self.bullet.interval()
    }

    /// Current laser wave size, exposed for balance inspection
    pub fn laser_wave(&self) -> u32 {
        self.laser.wave()
    }
}
