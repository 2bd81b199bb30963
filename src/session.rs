//! One game session: owns the pools, the player, the emitter and the world
//! bounds snapshot, and drives the strict per-frame order
//! update → emit → collide → sweep.  Destroy flags set during collision are
//! reclaimed by the sweep in the same frame, never before updates finish.

use std::rc::Rc;

use rand::Rng;

use crate::audio::SoundFx;
use crate::collision::{resolve_against, resolve_pools, BULLET_HIT, RAM};
use crate::emitter::EnemyEmitter;
use crate::entities::{BulletOwner, Warplane};
use crate::error::ConfigError;
use crate::math::Rect;
use crate::pool::{BulletPool, EnemyPool, ExplosionPool};

const PLAYER_RELOAD: f32 = 0.35;
const ENEMY_SPAWN_INTERVAL: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionStatus {
    Playing,
    GameOver,
}

/// Shared audio handles injected at construction; the session only triggers
/// them and never manages their lifetime.
#[derive(Default)]
pub struct SessionSounds {
    pub player_shot: Option<Rc<dyn SoundFx>>,
    pub enemy_shot: Option<Rc<dyn SoundFx>>,
}

pub struct GameSession {
    world: Rect,
    pub player: Warplane,
    pub bullets: BulletPool,
    pub enemies: EnemyPool,
    pub explosions: ExplosionPool,
    emitter: EnemyEmitter,
    score: u32,
    high_score: u32,
    status: SessionStatus,
}

impl GameSession {
    pub fn new(world: Rect, sounds: SessionSounds) -> Result<Self, ConfigError> {
        if world.width() <= 0.0 || world.height() <= 0.0 {
            return Err(ConfigError::EmptyBounds {
                width: world.width(),
                height: world.height(),
            });
        }
        Ok(GameSession {
            player: Warplane::new(&world, PLAYER_RELOAD, sounds.player_shot)?,
            bullets: BulletPool::new(),
            enemies: EnemyPool::new(sounds.enemy_shot),
            explosions: ExplosionPool::new(),
            emitter: EnemyEmitter::new(ENEMY_SPAWN_INTERVAL)?,
            world,
            score: 0,
            high_score: 0,
            status: SessionStatus::Playing,
        })
    }

    pub fn world(&self) -> Rect {
        self.world
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Seed the best-score line from a previous session in this process.
    pub fn carry_high_score(&mut self, best: u32) {
        self.high_score = self.high_score.max(best);
    }

    /// Viewport notifier hook: refresh the bounds snapshot between frames.
    pub fn resize(&mut self, world: Rect) {
        self.world = world;
        self.player.resize(&world);
    }

    /// Advance the simulation one frame.
    pub fn frame(&mut self, dt: f32, rng: &mut impl Rng) {
        if self.status != SessionStatus::Playing {
            return;
        }
        self.update(dt, rng);
        self.check_collision();
        self.sweep_destroyed();

        if self.player.is_destroyed() {
            self.status = SessionStatus::GameOver;
        }
    }

    fn update(&mut self, dt: f32, rng: &mut impl Rng) {
        let world = self.world;
        self.bullets.update_active(dt, &world);
        self.enemies.update_active(dt, &world, &mut self.bullets);
        self.explosions.update_active(dt);
        self.player.update(dt, &world, &mut self.bullets);
        self.emitter.generate(dt, &mut self.enemies, &world, rng);
    }

    fn check_collision(&mut self) {
        let mut gained = 0;

        gained += resolve_pools(
            &mut self.bullets,
            |b| b.owner == BulletOwner::Player,
            &mut self.enemies,
            &BULLET_HIT,
            &mut self.explosions,
        );
        gained += resolve_against(
            &mut self.bullets,
            |b| b.owner == BulletOwner::Enemy,
            &mut self.player,
            &BULLET_HIT,
            &mut self.explosions,
        );
        gained += resolve_against(
            &mut self.enemies,
            |_| true,
            &mut self.player,
            &RAM,
            &mut self.explosions,
        );

        self.score += gained;
        self.high_score = self.high_score.max(self.score);
    }

    fn sweep_destroyed(&mut self) {
        self.bullets.sweep_destroyed();
        self.enemies.sweep_destroyed();
        self.explosions.sweep_destroyed();
    }

    // ── Input interface (thin field writes) ───────────────────────────────────

    pub fn steer(&mut self, dx: f32, dy: f32) {
        self.player.steer(crate::math::Vec2::new(dx, dy));
    }

    pub fn trigger_fire(&mut self) {
        self.player.trigger_fire();
    }

    pub fn release_fire(&mut self) {
        self.player.release_fire();
    }

    /// Session teardown.  Releases every pool-held resource (slots and their
    /// shared sound handles); called once on any exit path.
    pub fn dispose(&mut self) {
        self.bullets.dispose();
        self.enemies.dispose();
        self.explosions.dispose();
    }
}
