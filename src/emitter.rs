//! Cooldown-driven enemy spawner with a time-keyed difficulty curve.
//!
//! The countdown uses `timer += base_interval` on reset, so overshoot from a
//! large frame delta carries forward: total spawn count depends only on
//! elapsed time, never on how it was sliced into frames.  Several spawns in
//! one frame are legal after a stall.

use rand::Rng;

use crate::entities::EnemySpawn;
use crate::error::ConfigError;
use crate::math::{Rect, Vec2};
use crate::pool::EnemyPool;

// ── Difficulty table ──────────────────────────────────────────────────────────
//
// Each tier takes over at `after` seconds of session time.  Speed, hit-points,
// damage and fire rate are non-decreasing from tier to tier.

struct Tier {
    after: f32,
    speed: f32,
    hp: i32,
    damage: i32,
    reload_interval: f32,
    bullet_speed: f32,
    bullet_damage: i32,
    half_width: f32,
    half_height: f32,
    score_value: u32,
}

const TIERS: &[Tier] = &[
    Tier {
        after: 0.0,
        speed: 4.0,
        hp: 25,
        damage: 10,
        reload_interval: 3.0,
        bullet_speed: 9.0,
        bullet_damage: 5,
        half_width: 1.5,
        half_height: 1.0,
        score_value: 100,
    },
    Tier {
        after: 45.0,
        speed: 5.5,
        hp: 50,
        damage: 15,
        reload_interval: 2.2,
        bullet_speed: 12.0,
        bullet_damage: 10,
        half_width: 1.8,
        half_height: 1.2,
        score_value: 150,
    },
    Tier {
        after: 120.0,
        speed: 7.0,
        hp: 100,
        damage: 25,
        reload_interval: 1.5,
        bullet_speed: 16.0,
        bullet_damage: 15,
        half_width: 2.2,
        half_height: 1.5,
        score_value: 250,
    },
];

fn tier_for(elapsed: f32) -> &'static Tier {
    TIERS
        .iter()
        .rev()
        .find(|t| elapsed >= t.after)
        .unwrap_or(&TIERS[0])
}

/// Spawn parameters for the current difficulty, before lane randomization.
/// Exposed so tests can check curve monotonicity directly.
pub fn spawn_params(elapsed: f32) -> EnemySpawn {
    let tier = tier_for(elapsed);
    EnemySpawn {
        pos: Vec2::ZERO,
        approach_velocity: Vec2::new(-2.0 * tier.speed, 0.0),
        cruise_velocity: Vec2::new(-tier.speed, 0.0),
        hp: tier.hp,
        damage: tier.damage,
        reload_interval: tier.reload_interval,
        bullet_speed: Vec2::new(-tier.bullet_speed, 0.0),
        bullet_damage: tier.bullet_damage,
        bullet_height: 0.5,
        half_width: tier.half_width,
        half_height: tier.half_height,
        score_value: tier.score_value,
    }
}

// ── Emitter ───────────────────────────────────────────────────────────────────

pub struct EnemyEmitter {
    timer: f32,
    base_interval: f32,
    elapsed: f32,
}

impl EnemyEmitter {
    pub fn new(base_interval: f32) -> Result<Self, ConfigError> {
        if !(base_interval > 0.0) {
            return Err(ConfigError::NonPositiveInterval(base_interval));
        }
        Ok(EnemyEmitter {
            timer: base_interval,
            base_interval,
            elapsed: 0.0,
        })
    }

    /// Seconds until the next spawn fires.
    pub fn remaining(&self) -> f32 {
        self.timer
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Re-arm for a fresh session.
    pub fn reset(&mut self) {
        self.timer = self.base_interval;
        self.elapsed = 0.0;
    }

    pub fn generate(
        &mut self,
        dt: f32,
        enemies: &mut EnemyPool,
        world: &Rect,
        rng: &mut impl Rng,
    ) {
        self.elapsed += dt;
        self.timer -= dt;
        while self.timer <= 0.0 {
            self.spawn(enemies, world, rng);
            self.timer += self.base_interval;
        }
    }

    fn spawn(&self, enemies: &mut EnemyPool, world: &Rect, rng: &mut impl Rng) {
        let mut spawn = spawn_params(self.elapsed);

        // Random lane within the vertical extent, clear of the edges.
        let lo = world.bottom() + spawn.half_height;
        let hi = world.top() - spawn.half_height;
        let lane = if lo < hi {
            rng.gen_range(lo..hi)
        } else {
            world.pos.y
        };
        // Nose exactly on the right edge: visible next frame, not yet outside.
        spawn.pos = Vec2::new(world.right() + spawn.half_width, lane);

        // A full pool under its ceiling silently drops this spawn.
        let _ = enemies.obtain(&spawn);
    }
}
