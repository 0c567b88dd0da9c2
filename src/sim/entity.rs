//! Game entities and their per-tick behavior
//!
//! A closed set of tagged variants rather than an open class hierarchy:
//! the engine has to reason exhaustively about type when instantiating,
//! colliding and destroying, so the kinds are plain enums and the
//! per-kind update logic lives here next to them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::CircleCollider;
use crate::consts::*;
use crate::step_toward;

/// Identity of a live entity, unique within a session
pub type EntityId = u32;

/// Hazard variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Aimed shot, medium speed
    Bullet,
    /// Fast bolt crossing the whole board
    Laser,
    /// Slow roller entering from the west or east edge
    Thornball,
    /// Stationary charge that arms, then detonates in place
    Explosion,
}

/// Power-up variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Absorbs exactly one hazard hit
    Shield,
    /// Doubles score accrual for a fixed window
    Multiplier,
    /// Clears every live hazard on pickup
    Sweeper,
}

/// Whether an entity survives its own update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Live,
    /// The entity asks to be routed through the destroy queue
    Expire,
}

/// The balloon's visual state, driven by the engine from the shield and
/// multiplier flags. The four combinations are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerSkin {
    #[default]
    Normal,
    Shielded,
    Golden,
    GoldenShielded,
}

impl PlayerSkin {
    /// Pick the skin matching the current shield/multiplier flags
    pub fn from_flags(shielded: bool, multiplied: bool) -> Self {
        match (shielded, multiplied) {
            (false, false) => PlayerSkin::Normal,
            (true, false) => PlayerSkin::Shielded,
            (false, true) => PlayerSkin::Golden,
            (true, true) => PlayerSkin::GoldenShielded,
        }
    }
}

/// The player balloon. Exactly one exists per session.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub skin: PlayerSkin,
    pub alive: bool,
    pub collider: CircleCollider,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            skin: PlayerSkin::default(),
            alive: true,
            collider: CircleCollider::centered(PLAYER_RADIUS),
        }
    }

    /// Drift toward the pointer, clamped to the balloon's top speed
    pub fn update(&mut self, dt: f32, pointer: Vec2) {
        if !self.alive {
            return;
        }
        self.pos = step_toward(self.pos, pointer, PLAYER_SPEED * dt);
    }

    /// Deactivate on game over; a popped balloon no longer moves or collides
    pub fn pop(&mut self) {
        self.alive = false;
    }
}

/// A live hazard
#[derive(Debug, Clone)]
pub struct Hazard {
    pub id: EntityId,
    pub kind: HazardKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Age in seconds since spawn; drives the explosion phases
    pub age: f32,
    /// Absent while an explosion is still arming
    pub collider: Option<CircleCollider>,
}

impl Hazard {
    pub fn new(id: EntityId, kind: HazardKind, pos: Vec2, vel: Vec2) -> Self {
        let collider = match kind {
            HazardKind::Bullet => Some(CircleCollider::centered(BULLET_RADIUS)),
            HazardKind::Laser => Some(CircleCollider::centered(LASER_RADIUS)),
            HazardKind::Thornball => Some(CircleCollider::centered(THORNBALL_RADIUS)),
            // Armed later, in update
            HazardKind::Explosion => None,
        };
        Self {
            id,
            kind,
            pos,
            vel,
            age: 0.0,
            collider,
        }
    }

    /// Advance one tick of straight-line travel (or the explosion phases)
    pub fn update(&mut self, dt: f32) -> Fate {
        self.age += dt;
        match self.kind {
            HazardKind::Explosion => {
                if self.age >= EXPLOSION_ARM_TIME + EXPLOSION_BLAST_TIME {
                    return Fate::Expire;
                }
                if self.age >= EXPLOSION_ARM_TIME {
                    self.collider = Some(CircleCollider::centered(EXPLOSION_RADIUS));
                }
                Fate::Live
            }
            _ => {
                self.pos += self.vel * dt;
                if self.is_far_off_board() {
                    Fate::Expire
                } else {
                    Fate::Live
                }
            }
        }
    }

    /// True once a traveling hazard has left the board and its margin
    fn is_far_off_board(&self) -> bool {
        let lo = -DESPAWN_MARGIN;
        let hi = 1.0 + DESPAWN_MARGIN;
        self.pos.x < lo || self.pos.x > hi || self.pos.y < lo || self.pos.y > hi
    }
}

/// A live power-up
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: EntityId,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    /// Seconds since spawn; power-ups expire uncollected
    pub age: f32,
    pub collider: CircleCollider,
}

impl PowerUp {
    pub fn new(id: EntityId, kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            age: 0.0,
            collider: CircleCollider::centered(POWERUP_RADIUS),
        }
    }

    /// Count lifetime; self-request destruction once it runs out
    pub fn update(&mut self, dt: f32) -> Fate {
        self.age += dt;
        if self.age >= POWERUP_LIFETIME {
            Fate::Expire
        } else {
            Fate::Live
        }
    }
}

/// On-screen score readout, refreshed by the engine every tick
#[derive(Debug, Clone)]
pub struct ScoreOverlay {
    pub pos: Vec2,
    pub value: u64,
}

impl ScoreOverlay {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(SCORE_POS_X, SCORE_POS_Y),
            value: 0,
        }
    }
}

impl Default for ScoreOverlay {
    fn default() -> Self {
        Self::new()
    }
}

/// Warm-up countdown shown before the first spawn wave
#[derive(Debug, Clone)]
pub struct StartCountdown {
    pub pos: Vec2,
    pub remaining: f32,
}

impl StartCountdown {
    pub fn new(duration: f32) -> Self {
        Self {
            pos: Vec2::new(COUNTDOWN_POS_X, COUNTDOWN_POS_Y),
            remaining: duration,
        }
    }

    pub fn update(&mut self, dt: f32) -> Fate {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            Fate::Expire
        } else {
            Fate::Live
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_skin_covers_all_flag_combinations() {
        assert_eq!(PlayerSkin::from_flags(false, false), PlayerSkin::Normal);
        assert_eq!(PlayerSkin::from_flags(true, false), PlayerSkin::Shielded);
        assert_eq!(PlayerSkin::from_flags(false, true), PlayerSkin::Golden);
        assert_eq!(
            PlayerSkin::from_flags(true, true),
            PlayerSkin::GoldenShielded
        );
    }

    #[test]
    fn test_player_moves_toward_pointer_at_clamped_speed() {
        let mut player = Player::new(Vec2::new(0.5, 0.5));
        player.update(1.0 / 60.0, Vec2::new(1.0, 0.5));
        let expected = 0.5 + PLAYER_SPEED / 60.0;
        assert!((player.pos.x - expected).abs() < 1e-5);
        assert_eq!(player.pos.y, 0.5);
    }

    #[test]
    fn test_popped_player_stops_moving() {
        let mut player = Player::new(Vec2::new(0.5, 0.5));
        player.pop();
        player.update(1.0, Vec2::new(0.0, 0.0));
        assert_eq!(player.pos, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_powerup_expires_after_lifetime() {
        let mut p = PowerUp::new(1, PowerUpKind::Shield, Vec2::new(0.5, 0.5));
        let mut fate = Fate::Live;
        // 5 seconds of 60 Hz ticks
        for _ in 0..300 {
            fate = p.update(1.0 / 60.0);
        }
        assert_eq!(fate, Fate::Expire);
    }

    #[test]
    fn test_powerup_survives_before_lifetime() {
        let mut p = PowerUp::new(1, PowerUpKind::Multiplier, Vec2::new(0.5, 0.5));
        for _ in 0..299 {
            assert_eq!(p.update(1.0 / 60.0), Fate::Live);
        }
    }

    #[test]
    fn test_bullet_travels_straight() {
        let mut h = Hazard::new(1, HazardKind::Bullet, Vec2::new(-0.2, 0.5), Vec2::X * 0.35);
        h.update(1.0);
        assert!((h.pos.x - 0.15).abs() < 1e-6);
        assert_eq!(h.pos.y, 0.5);
    }

    #[test]
    fn test_hazard_expires_far_off_board() {
        let mut h = Hazard::new(1, HazardKind::Laser, Vec2::new(1.3, 0.5), Vec2::X * 0.9);
        // One big step carries it past the despawn margin
        assert_eq!(h.update(1.0), Fate::Expire);
    }

    #[test]
    fn test_explosion_arms_then_detonates_then_expires() {
        let mut h = Hazard::new(1, HazardKind::Explosion, Vec2::new(0.5, 0.5), Vec2::ZERO);
        assert!(h.collider.is_none());

        // Still arming just before the threshold
        h.update(EXPLOSION_ARM_TIME - 0.01);
        assert!(h.collider.is_none());

        // Crosses into the blast window
        assert_eq!(h.update(0.02), Fate::Live);
        assert!(h.collider.is_some());

        // Blast window runs out
        assert_eq!(h.update(EXPLOSION_BLAST_TIME), Fate::Expire);
    }

    #[test]
    fn test_countdown_expires_at_zero() {
        let mut c = StartCountdown::new(0.05);
        assert_eq!(c.update(0.02), Fate::Live);
        assert_eq!(c.update(0.04), Fate::Expire);
    }
}
