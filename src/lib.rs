//! Sky Pop - a balloon-dodging arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (entities, spawn scheduling, collisions, the game loop)
//! - `audio`: Cue and music sink abstraction
//! - `platform`: Thread-safe input handoff between presentation and simulation
//! - `highscores`: Ranked leaderboard with JSON persistence
//! - `settings`: Player preferences, persisted as JSON

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal tick duration (60 Hz simulation)
    pub const TICK_DT: f32 = 1.0 / 60.0;

    /// Board space is [0,1]x[0,1]; positions outside are off-board spawns
    pub const BOARD_CENTER_X: f32 = 0.5;
    pub const BOARD_CENTER_Y: f32 = 0.5;
    /// How far outside the board edge hazards enter
    pub const SPAWN_MARGIN: f32 = 0.2;
    /// Hazards past this distance outside the board are discarded
    pub const DESPAWN_MARGIN: f32 = 0.4;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 0.05;
    /// Board units per second the balloon drifts toward the pointer
    pub const PLAYER_SPEED: f32 = 1.2;

    /// Power-up defaults
    pub const POWERUP_RADIUS: f32 = 0.05;
    /// Seconds an uncollected power-up stays on the board
    pub const POWERUP_LIFETIME: f32 = 5.0;

    /// Hazard sizes
    pub const BULLET_RADIUS: f32 = 0.02;
    pub const LASER_RADIUS: f32 = 0.015;
    pub const THORNBALL_RADIUS: f32 = 0.04;
    pub const EXPLOSION_RADIUS: f32 = 0.12;

    /// Hazard speeds (board units per second)
    pub const BULLET_SPEED: f32 = 0.35;
    pub const LASER_SPEED: f32 = 0.9;
    pub const THORNBALL_SPEED: f32 = 0.2;

    /// Explosions arm silently, then detonate briefly
    pub const EXPLOSION_ARM_TIME: f32 = 1.0;
    pub const EXPLOSION_BLAST_TIME: f32 = 0.5;

    /// Scoring
    pub const SCORE_RATE: f64 = 100.0;
    pub const MULTIPLIER_FACTOR: f64 = 2.0;
    /// Seconds a multiplier stays active once collected
    pub const MULTIPLIER_DURATION: f32 = 5.0;

    /// Overlay anchors (board space)
    pub const SCORE_POS_X: f32 = 0.5;
    pub const SCORE_POS_Y: f32 = 0.03;
    pub const COUNTDOWN_POS_X: f32 = 0.5;
    pub const COUNTDOWN_POS_Y: f32 = 0.5;
}

/// Center of the board
#[inline]
pub fn board_center() -> Vec2 {
    Vec2::new(consts::BOARD_CENTER_X, consts::BOARD_CENTER_Y)
}

/// Move `from` toward `to` by at most `max_step`, without overshooting
#[inline]
pub fn step_toward(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist <= max_step || dist <= f32::EPSILON {
        to
    } else {
        from + delta * (max_step / dist)
    }
}

/// Unit vector from `from` toward `to`; falls back to +X for coincident points
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    if delta.length_squared() <= f32::EPSILON {
        Vec2::X
    } else {
        delta.normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_toward_clamps_to_max_step() {
        let from = Vec2::new(0.0, 0.0);
        let to = Vec2::new(1.0, 0.0);
        let stepped = step_toward(from, to, 0.25);
        assert!((stepped.x - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_step_toward_does_not_overshoot() {
        let from = Vec2::new(0.0, 0.0);
        let to = Vec2::new(0.1, 0.0);
        let stepped = step_toward(from, to, 0.5);
        assert_eq!(stepped, to);
    }

    #[test]
    fn test_direction_to_degenerate() {
        let p = Vec2::new(0.3, 0.3);
        assert_eq!(direction_to(p, p), Vec2::X);
    }
}
