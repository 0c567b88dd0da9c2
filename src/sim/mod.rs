//! Simulation core
//!
//! Everything gameplay lives here, on a single logical thread:
//! - Stable iteration order (spawn order, by entity ID)
//! - Destruction buffered through a once-per-tick queue
//! - Seeded RNG only, isolated in `spawn_point`
//! - No rendering, audio or platform dependencies beyond the sink traits

pub mod collision;
pub mod engine;
pub mod entity;
pub mod score;
pub mod spawn;
pub mod spawn_point;

pub use collision::{CircleCollider, circles_intersect};
pub use engine::{GameEngine, GameObject, InputSource, RenderSink, Renderable};
pub use entity::{
    EntityId, Fate, Hazard, HazardKind, Player, PlayerSkin, PowerUp, PowerUpKind, ScoreOverlay,
    StartCountdown,
};
pub use score::{MultiplierEvent, ScoreClock, ScorePhase};
pub use spawn::{
    RampEffect, RampTuning, SchedulerTick, SpawnRequest, SpawnScheduler, SpawnTimer, SpawnTuning,
    TimerTuning,
};
pub use spawn_point::SpawnPoints;
