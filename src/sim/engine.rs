//! The game engine: entity ownership and the fixed-rate loop
//!
//! One logical simulation thread owns every collection and drives the
//! per-tick order of operations: clock, scoring, spawning, destruction,
//! updates, collisions, render handoff, pacing. Nothing in here locks;
//! the engine is intentionally not reentrant. Presentation and input
//! live on the far side of the [`RenderSink`] and [`InputSource`] seams
//! and only ever see point-in-time snapshots.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::{Duration, Instant};

use glam::Vec2;

use super::collision::circles_intersect;
use super::entity::{
    EntityId, Fate, Hazard, HazardKind, Player, PlayerSkin, PowerUp, PowerUpKind, ScoreOverlay,
    StartCountdown,
};
use super::score::{MultiplierEvent, ScoreClock};
use super::spawn::{SpawnRequest, SpawnScheduler, SpawnTuning};
use super::spawn_point::SpawnPoints;
use crate::audio::{AudioSink, Cue, Track};
use crate::consts::*;
use crate::{board_center, direction_to};

/// Starting capacity for the hazard collection
const HAZARD_CAPACITY: usize = 50;

/// Snapshot item handed to the render sink each tick
#[derive(Debug, Clone, PartialEq)]
pub enum Renderable {
    Hazard {
        kind: HazardKind,
        pos: Vec2,
    },
    Player {
        pos: Vec2,
        skin: PlayerSkin,
        alive: bool,
    },
    PowerUp {
        kind: PowerUpKind,
        pos: Vec2,
    },
    Score {
        pos: Vec2,
        value: u64,
    },
    Countdown {
        pos: Vec2,
        remaining: f32,
    },
}

/// Receives the per-tick snapshot and, once, the final score.
///
/// The frame slice is a point-in-time copy; the sink must not assume it
/// can reach back into engine state.
pub trait RenderSink {
    fn present(&mut self, frame: &[Renderable]);
    fn session_over(&mut self, score: u64);
}

/// Supplies the latest known pointer position in board space.
///
/// Written by the presentation side, only ever read here; implementations
/// must be safe to read while the writer updates (see `platform`).
pub trait InputSource {
    fn pointer(&self) -> Vec2;
}

/// A freshly built object awaiting classification by `instantiate`
#[derive(Debug, Clone)]
pub enum GameObject {
    Hazard(Hazard),
    PowerUp(PowerUp),
}

/// The simulation core for one session
pub struct GameEngine {
    /// Session clock in seconds; advances only inside `tick`
    time: f32,
    /// Measured duration of the previous iteration
    delta: f32,
    player: Player,
    hazards: Vec<Hazard>,
    powerups: Vec<PowerUp>,
    /// Pending removals, drained once per tick before updates
    destroy_queue: Vec<EntityId>,
    score_overlay: ScoreOverlay,
    countdown: Option<StartCountdown>,
    scheduler: SpawnScheduler,
    score: ScoreClock,
    spawn_points: SpawnPoints,
    has_shield: bool,
    has_multiplier: bool,
    game_over: bool,
    next_id: EntityId,
}

impl GameEngine {
    pub fn new(seed: u64, tuning: &SpawnTuning) -> Self {
        Self {
            time: 0.0,
            delta: TICK_DT,
            player: Player::new(board_center()),
            hazards: Vec::with_capacity(HAZARD_CAPACITY),
            powerups: Vec::new(),
            destroy_queue: Vec::new(),
            score_overlay: ScoreOverlay::new(),
            countdown: Some(StartCountdown::new(tuning.warmup)),
            scheduler: SpawnScheduler::new(tuning),
            score: ScoreClock::new(),
            spawn_points: SpawnPoints::new(seed),
            has_shield: false,
            has_multiplier: false,
            game_over: false,
            next_id: 1,
        }
    }

    /// Session time in seconds
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn score(&self) -> u64 {
        self.score.score()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn powerups(&self) -> &[PowerUp] {
        &self.powerups
    }

    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Classify a built object by kind and append it to its collection
    pub fn instantiate(&mut self, obj: GameObject) {
        match obj {
            GameObject::Hazard(hazard) => self.hazards.push(hazard),
            GameObject::PowerUp(powerup) => self.powerups.push(powerup),
        }
    }

    /// Queue an entity for removal at the start of the next tick.
    ///
    /// Entities are never pulled out of a collection mid-iteration;
    /// everything funnels through this queue.
    pub fn destroy(&mut self, id: EntityId) {
        if !self.destroy_queue.contains(&id) {
            self.destroy_queue.push(id);
        }
    }

    /// Factory keyed by spawn request: picks an entry point and aim,
    /// allocates an identity, and builds the object
    fn build(&mut self, request: SpawnRequest) -> GameObject {
        match request {
            SpawnRequest::PowerUp => {
                let kind = self.spawn_points.powerup_kind();
                let pos = self.spawn_points.board_site();
                let id = self.next_entity_id();
                GameObject::PowerUp(PowerUp::new(id, kind, pos))
            }
            SpawnRequest::Hazard(kind) => {
                let (pos, vel) = match kind {
                    HazardKind::Bullet => {
                        let pos = self.spawn_points.hazard_entry();
                        (pos, direction_to(pos, self.player.pos) * BULLET_SPEED)
                    }
                    HazardKind::Laser => {
                        let pos = self.spawn_points.hazard_entry();
                        (pos, direction_to(pos, self.player.pos) * LASER_SPEED)
                    }
                    HazardKind::Thornball => {
                        let pos = self.spawn_points.thornball_entry();
                        let dir = if pos.x < BOARD_CENTER_X {
                            Vec2::X
                        } else {
                            -Vec2::X
                        };
                        (pos, dir * THORNBALL_SPEED)
                    }
                    HazardKind::Explosion => (self.spawn_points.board_site(), Vec2::ZERO),
                };
                let id = self.next_entity_id();
                GameObject::Hazard(Hazard::new(id, kind, pos, vel))
            }
        }
    }

    /// Advance the session by one tick of `dt` seconds.
    ///
    /// Order of operations: clock, scoring, spawning, destroy-queue
    /// drain, entity updates, power-up collisions, hazard collisions,
    /// terminal-condition handling. A no-op once the session is over.
    pub fn tick(&mut self, dt: f32, pointer: Vec2, audio: &mut dyn AudioSink) {
        if self.game_over {
            return;
        }

        self.time += dt;

        if let Some(MultiplierEvent::Exited) = self.score.advance(dt) {
            self.has_multiplier = false;
            self.refresh_player_skin();
        }

        let decided = self.scheduler.advance(self.time, dt);
        if decided.scoring_started {
            self.score.start();
        }
        for request in decided.requests {
            let obj = self.build(request);
            self.instantiate(obj);
        }

        self.drain_destroy_queue();
        self.update_entities(dt, pointer);
        self.check_powerup_collisions(audio);

        if self.check_hazard_collisions(audio) {
            audio.cue(Cue::Pop);
            self.player.pop();
            self.score.stop();
            self.game_over = true;
            log::info!(
                "game over at t={:.2}s with score {}",
                self.time,
                self.score()
            );
        }

        self.score_overlay.value = self.score.score();
    }

    /// Remove every queued entity from its collection, then clear the queue
    fn drain_destroy_queue(&mut self) {
        if self.destroy_queue.is_empty() {
            return;
        }
        let queue = std::mem::take(&mut self.destroy_queue);
        self.hazards.retain(|h| !queue.contains(&h.id));
        self.powerups.retain(|p| !queue.contains(&p.id));
    }

    fn update_entities(&mut self, dt: f32, pointer: Vec2) {
        self.player.update(dt, pointer);

        let mut expired: Vec<EntityId> = Vec::new();
        for hazard in &mut self.hazards {
            if hazard.update(dt) == Fate::Expire {
                expired.push(hazard.id);
            }
        }
        for powerup in &mut self.powerups {
            if powerup.update(dt) == Fate::Expire {
                expired.push(powerup.id);
            }
        }
        for id in expired {
            self.destroy(id);
        }

        let countdown_done = self
            .countdown
            .as_mut()
            .is_some_and(|c| c.update(dt) == Fate::Expire);
        if countdown_done {
            self.countdown = None;
        }
    }

    /// Apply and queue-destroy every power-up touching the player.
    ///
    /// A power-up already sitting in the destroy queue is skipped, so an
    /// effect can never be applied twice however often the check runs.
    fn check_powerup_collisions(&mut self, audio: &mut dyn AudioSink) {
        let player_pos = self.player.pos;
        let player_col = self.player.collider;

        let mut collected: Vec<(EntityId, PowerUpKind)> = Vec::new();
        for powerup in &self.powerups {
            if self.destroy_queue.contains(&powerup.id) {
                continue;
            }
            if circles_intersect(powerup.pos, &powerup.collider, player_pos, &player_col) {
                collected.push((powerup.id, powerup.kind));
            }
        }

        for (id, kind) in collected {
            self.apply_powerup(kind, audio);
            self.destroy(id);
        }
    }

    fn apply_powerup(&mut self, kind: PowerUpKind, audio: &mut dyn AudioSink) {
        match kind {
            PowerUpKind::Shield => {
                self.has_shield = true;
                self.refresh_player_skin();
                audio.cue(Cue::ShieldGet);
            }
            PowerUpKind::Multiplier => {
                if let Some(MultiplierEvent::Entered) = self.score.begin_multiplier() {
                    self.has_multiplier = true;
                    self.refresh_player_skin();
                }
                audio.cue(Cue::MultiplierGet);
            }
            PowerUpKind::Sweeper => {
                // Bypasses the destroy queue on purpose: the board clears now
                self.hazards.clear();
                audio.cue(Cue::SweeperGet);
            }
        }
    }

    /// Scan hazards in stable spawn order for contact with the player.
    ///
    /// A shield absorbs the first intersecting hazard and is consumed on
    /// the spot; the scan continues under the now-unshielded state, so a
    /// second intersecting hazard on the same tick is fatal. Returns
    /// true on a fatal hit; the offending hazard stays on the board.
    fn check_hazard_collisions(&mut self, audio: &mut dyn AudioSink) -> bool {
        let player_pos = self.player.pos;
        let player_col = self.player.collider;

        let mut absorbed: Option<EntityId> = None;
        let mut fatal = false;
        for i in 0..self.hazards.len() {
            let Some(collider) = self.hazards[i].collider else {
                continue;
            };
            if !circles_intersect(self.hazards[i].pos, &collider, player_pos, &player_col) {
                continue;
            }
            if self.has_shield {
                self.has_shield = false;
                absorbed = Some(self.hazards[i].id);
            } else {
                fatal = true;
                break;
            }
        }

        if let Some(id) = absorbed {
            self.destroy(id);
            self.refresh_player_skin();
            audio.cue(Cue::ShieldHit);
        }
        fatal
    }

    /// The four shield/multiplier combinations map to one skin each
    fn refresh_player_skin(&mut self) {
        self.player.skin = PlayerSkin::from_flags(self.has_shield, self.has_multiplier);
    }

    /// Point-in-time render list: hazards, then player, then power-ups,
    /// then overlays. Order is stable and part of the sink contract.
    pub fn snapshot(&self) -> Vec<Renderable> {
        let mut frame = Vec::with_capacity(self.hazards.len() + self.powerups.len() + 3);
        for hazard in &self.hazards {
            frame.push(Renderable::Hazard {
                kind: hazard.kind,
                pos: hazard.pos,
            });
        }
        frame.push(Renderable::Player {
            pos: self.player.pos,
            skin: self.player.skin,
            alive: self.player.alive,
        });
        for powerup in &self.powerups {
            frame.push(Renderable::PowerUp {
                kind: powerup.kind,
                pos: powerup.pos,
            });
        }
        frame.push(Renderable::Score {
            pos: self.score_overlay.pos,
            value: self.score_overlay.value,
        });
        if let Some(countdown) = &self.countdown {
            frame.push(Renderable::Countdown {
                pos: countdown.pos,
                remaining: countdown.remaining,
            });
        }
        frame
    }

    /// Run the fixed-rate loop until game over; returns the final score.
    ///
    /// Each iteration measures its own wall-clock duration and sleeps
    /// off the remainder of the nominal tick; an overrunning frame just
    /// skips the nap. The measured total (work plus nap) becomes the
    /// next iteration's delta time, seeded with the nominal tick for the
    /// first pass.
    pub fn run(
        &mut self,
        input: &dyn InputSource,
        render: &mut dyn RenderSink,
        audio: &mut dyn AudioSink,
    ) -> u64 {
        let period = Duration::from_secs_f32(TICK_DT);
        self.delta = TICK_DT;
        audio.play_music(Track::BalloonGroove);
        log::info!("session start");

        while !self.game_over {
            let frame_start = Instant::now();

            let pointer = input.pointer();
            self.tick(self.delta, pointer, audio);
            self.present(render);

            let worked = frame_start.elapsed();
            if worked < period {
                std::thread::sleep(period - worked);
            }
            self.delta = frame_start.elapsed().as_secs_f32();
        }

        audio.stop_music();
        render.session_over(self.score());
        self.score()
    }

    /// Hand the frame to the sink. A panicking sink costs us that frame,
    /// not the session.
    fn present(&self, render: &mut dyn RenderSink) {
        let frame = self.snapshot();
        if catch_unwind(AssertUnwindSafe(|| render.present(&frame))).is_err() {
            log::error!("render sink panicked; frame dropped");
        }
    }
}
