//! All poolable entity kinds plus the player craft.
//!
//! Each kind embeds a [`Body`] carrying the shared lifecycle state machine:
//! a slot is *free* (`!active`), *active-alive* (`active && !destroyed`) or
//! *active-destroyed* (`active && destroyed`, waiting for the sweep).  The
//! only legal transitions are free → active-alive (pool obtain),
//! active-alive → active-destroyed (`destroy()`) and active-destroyed → free
//! (sweep).

use std::rc::Rc;

use crate::audio::SoundFx;
use crate::error::ConfigError;
use crate::math::{Rect, Vec2};
use crate::pool::BulletPool;

// ── Shared entity base ────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct Body {
    active: bool,
    destroyed: bool,
    pub pos: Vec2,
    pub velocity: Vec2,
    half_width: f32,
    half_height: f32,
}

impl Body {
    pub fn set_size(&mut self, half_width: f32, half_height: f32) {
        debug_assert!(half_width >= 0.0 && half_height >= 0.0);
        self.half_width = half_width;
        self.half_height = half_height;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.half_width, self.half_height)
    }

    /// `pos += velocity * dt`.
    pub fn integrate(&mut self, dt: f32) {
        self.pos.scaled_add(self.velocity, dt);
    }

    /// True when the body's own rect lies fully beyond any world edge.
    /// An exactly touching edge still counts as inside.
    pub fn outside(&self, world: &Rect) -> bool {
        let b = self.bounds();
        b.right() < world.left()
            || b.left() > world.right()
            || b.top() < world.bottom()
            || b.bottom() > world.top()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Mark for end-of-frame reclamation.  Idempotent: a second call on an
    /// already-destroyed body changes nothing.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    pub fn clear_destroyed(&mut self) {
        self.destroyed = false;
    }
}

// ── Bullets ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BulletOwner {
    #[default]
    Player,
    Enemy,
}

#[derive(Clone, Debug, Default)]
pub struct Bullet {
    pub body: Body,
    pub owner: BulletOwner,
    pub damage: i32,
}

impl Bullet {
    /// Configure a freshly obtained slot for its new role.
    pub fn set(&mut self, pos: Vec2, velocity: Vec2, damage: i32, owner: BulletOwner, height: f32) {
        self.body.pos = pos;
        self.body.velocity = velocity;
        self.body.set_size(height * 0.5, height * 0.5);
        self.damage = damage;
        self.owner = owner;
    }

    pub fn update(&mut self, dt: f32, world: &Rect) {
        self.body.integrate(dt);
        if self.body.outside(world) {
            self.body.destroy();
        }
    }
}

// ── Enemy planes ──────────────────────────────────────────────────────────────

/// Everything needed to configure one recycled enemy slot.
#[derive(Clone, Debug)]
pub struct EnemySpawn {
    pub pos: Vec2,
    pub approach_velocity: Vec2,
    pub cruise_velocity: Vec2,
    pub hp: i32,
    pub damage: i32,
    pub reload_interval: f32,
    pub bullet_speed: Vec2,
    pub bullet_damage: i32,
    pub bullet_height: f32,
    pub half_width: f32,
    pub half_height: f32,
    pub score_value: u32,
}

#[derive(Clone, Default)]
pub struct EnemyPlane {
    pub body: Body,
    pub hp: i32,
    pub damage: i32,
    pub score_value: u32,
    reload_timer: f32,
    reload_interval: f32,
    bullet_speed: Vec2,
    bullet_damage: i32,
    bullet_height: f32,
    cruise_velocity: Vec2,
    settled: bool,
    shoot_sound: Option<Rc<dyn SoundFx>>,
}

impl EnemyPlane {
    pub fn set(&mut self, spawn: &EnemySpawn, shoot_sound: Option<Rc<dyn SoundFx>>) {
        self.body.pos = spawn.pos;
        self.body.velocity = spawn.approach_velocity;
        self.body.set_size(spawn.half_width, spawn.half_height);
        self.hp = spawn.hp;
        self.damage = spawn.damage;
        self.score_value = spawn.score_value;
        self.reload_interval = spawn.reload_interval;
        self.reload_timer = spawn.reload_interval * 0.9;
        self.bullet_speed = spawn.bullet_speed;
        self.bullet_damage = spawn.bullet_damage;
        self.bullet_height = spawn.bullet_height;
        self.cruise_velocity = spawn.cruise_velocity;
        self.settled = false;
        self.shoot_sound = shoot_sound;
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn update(&mut self, dt: f32, world: &Rect, bullets: &mut BulletPool) {
        // 1. Reload.  Held just under a full interval while still approaching
        //    so the plane never fires from outside the field.  The reset goes
        //    back to the configured interval, never an accumulated deficit:
        //    a long stall produces one shot, not a burst.
        if !self.settled {
            self.reload_timer = self.reload_interval * 0.9;
        } else {
            self.reload_timer -= dt;
            if self.reload_timer <= 0.0 {
                self.fire(bullets);
                self.reload_timer = self.reload_interval;
            }
        }

        // 2. Integrate.
        self.body.integrate(dt);

        // 3. One-way switch from approach to cruise speed once the plane has
        //    fully entered from the right.  Never reverts for this life.
        if !self.settled && self.body.bounds().right() <= world.right() {
            self.body.velocity = self.cruise_velocity;
            self.settled = true;
        }

        // 4. Boundary: destroyed once fully past the exit (left) edge.
        if self.body.bounds().right() < world.left() {
            self.body.destroy();
        }

        // 5. Health.
        if self.hp <= 0 {
            self.body.destroy();
        }
    }

    fn fire(&mut self, bullets: &mut BulletPool) {
        let nose = Vec2::new(self.body.bounds().left(), self.body.pos.y);
        // Pool exhaustion just skips this shot.
        if bullets
            .obtain(
                nose,
                self.bullet_speed,
                self.bullet_damage,
                BulletOwner::Enemy,
                self.bullet_height,
            )
            .is_ok()
        {
            if let Some(sound) = &self.shoot_sound {
                sound.play();
            }
        }
    }
}

// ── Explosions (visual effects) ───────────────────────────────────────────────

pub const EXPLOSION_SECS: f32 = 0.4;

#[derive(Clone, Debug, Default)]
pub struct Explosion {
    pub body: Body,
    remaining: f32,
}

impl Explosion {
    pub fn set(&mut self, center: Vec2, radius: f32) {
        self.body.pos = center;
        self.body.velocity = Vec2::ZERO;
        self.body.set_size(radius, radius);
        self.remaining = EXPLOSION_SECS;
    }

    pub fn update(&mut self, dt: f32) {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.body.destroy();
        }
    }

    /// 0.0 just spawned → 1.0 about to vanish; drives the draw frame.
    pub fn progress(&self) -> f32 {
        (1.0 - self.remaining / EXPLOSION_SECS).clamp(0.0, 1.0)
    }
}

// ── Player craft ──────────────────────────────────────────────────────────────

const PLAYER_SPEED: f32 = 14.0;
const PLAYER_HP: i32 = 100;
const PLAYER_HALF_W: f32 = 1.5;
const PLAYER_HALF_H: f32 = 1.0;
const PLAYER_BULLET_SPEED: f32 = 24.0;
const PLAYER_BULLET_DAMAGE: i32 = 25;
const PLAYER_BULLET_HEIGHT: f32 = 0.6;

/// The player's plane.  Not pooled: exactly one per session, clamped to the
/// world instead of boundary-destroyed.
#[derive(Clone, Default)]
pub struct Warplane {
    pub body: Body,
    pub hp: i32,
    reload_timer: f32,
    reload_interval: f32,
    firing: bool,
    shoot_sound: Option<Rc<dyn SoundFx>>,
}

impl Warplane {
    pub fn new(
        world: &Rect,
        reload_interval: f32,
        shoot_sound: Option<Rc<dyn SoundFx>>,
    ) -> Result<Self, ConfigError> {
        if reload_interval <= 0.0 {
            return Err(ConfigError::NonPositiveReload(reload_interval));
        }
        let mut plane = Warplane {
            hp: PLAYER_HP,
            reload_interval,
            shoot_sound,
            ..Warplane::default()
        };
        plane.body.set_active(true);
        plane.body.set_size(PLAYER_HALF_W, PLAYER_HALF_H);
        plane.resize(world);
        Ok(plane)
    }

    /// Input mutator: unit-ish direction from held keys, scaled internally.
    pub fn steer(&mut self, dir: Vec2) {
        self.body.velocity = dir * PLAYER_SPEED;
    }

    pub fn trigger_fire(&mut self) {
        self.firing = true;
    }

    pub fn release_fire(&mut self) {
        self.firing = false;
    }

    pub fn is_destroyed(&self) -> bool {
        self.body.is_destroyed()
    }

    /// Reposition against fresh world bounds (viewport notifier hook).
    pub fn resize(&mut self, world: &Rect) {
        self.body.pos = Vec2::new(world.left() + world.width() * 0.12, world.pos.y);
        self.clamp_to(world);
    }

    pub fn update(&mut self, dt: f32, world: &Rect, bullets: &mut BulletPool) {
        self.reload_timer = (self.reload_timer - dt).max(0.0);
        if self.firing && self.reload_timer == 0.0 {
            self.fire(bullets);
            self.reload_timer = self.reload_interval;
        }

        self.body.integrate(dt);
        self.clamp_to(world);

        if self.hp <= 0 {
            self.body.destroy();
        }
    }

    fn fire(&mut self, bullets: &mut BulletPool) {
        let nose = Vec2::new(self.body.bounds().right(), self.body.pos.y);
        if bullets
            .obtain(
                nose,
                Vec2::new(PLAYER_BULLET_SPEED, 0.0),
                PLAYER_BULLET_DAMAGE,
                BulletOwner::Player,
                PLAYER_BULLET_HEIGHT,
            )
            .is_ok()
        {
            if let Some(sound) = &self.shoot_sound {
                sound.play();
            }
        }
    }

    fn clamp_to(&mut self, world: &Rect) {
        let b = self.body.bounds();
        // max-then-min keeps this total even if the world is narrower than
        // the plane itself (tiny terminal).
        self.body.pos.x = self
            .body
            .pos
            .x
            .max(world.left() + b.half_width())
            .min(world.right() - b.half_width());
        self.body.pos.y = self
            .body
            .pos
            .y
            .max(world.bottom() + b.half_height())
            .min(world.top() - b.half_height());
    }
}
