//! Pairwise axis-aligned collision resolution between active sets.
//!
//! The geometric test is strict separation: exactly touching edges do not
//! collide.  What a collision *does* is table-driven through
//! [`CollisionRule`] constants, never hardcoded at a call site.  Only
//! active-alive entities take part; liveness is re-checked per pair, so an
//! entity destroyed earlier in the same pass (or by another pairing this
//! frame) stops matching immediately even though the sweep runs later.

use crate::entities::{Bullet, EnemyPlane, Warplane};
use crate::math::{Rect, Vec2};
use crate::pool::{ExplosionPool, Pool, PoolItem};

/// Symmetric overlap test.  Strict separation on any single axis means no
/// collision, so rectangles that merely touch are non-overlapping.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && b.left() < a.right() && a.bottom() < b.top() && b.bottom() < a.top()
}

// ── Collider capability ───────────────────────────────────────────────────────

pub trait Collider {
    fn collision_bounds(&self) -> Rect;
    /// Active-alive only; destroyed-but-unswept entities are excluded.
    fn is_alive(&self) -> bool;
    fn contact_damage(&self) -> i32;
    /// Subtract hit-points and destroy at zero or below.
    fn take_hit(&mut self, damage: i32);
    fn mark_destroyed(&mut self);
    fn center(&self) -> Vec2;
    /// `Some(radius)` for entities that leave an explosion effect behind.
    fn blast_radius(&self) -> Option<f32>;
    fn score_value(&self) -> u32 {
        0
    }
}

impl Collider for Bullet {
    fn collision_bounds(&self) -> Rect {
        self.body.bounds()
    }
    fn is_alive(&self) -> bool {
        self.body.is_active() && !self.body.is_destroyed()
    }
    fn contact_damage(&self) -> i32 {
        self.damage
    }
    fn take_hit(&mut self, _damage: i32) {
        // Bullets carry no hit-points; any hit consumes them.
        self.body.destroy();
    }
    fn mark_destroyed(&mut self) {
        self.body.destroy();
    }
    fn center(&self) -> Vec2 {
        self.body.pos
    }
    fn blast_radius(&self) -> Option<f32> {
        None
    }
}

impl Collider for EnemyPlane {
    fn collision_bounds(&self) -> Rect {
        self.body.bounds()
    }
    fn is_alive(&self) -> bool {
        self.body.is_active() && !self.body.is_destroyed()
    }
    fn contact_damage(&self) -> i32 {
        self.damage
    }
    fn take_hit(&mut self, damage: i32) {
        self.hp -= damage;
        if self.hp <= 0 {
            self.body.destroy();
        }
    }
    fn mark_destroyed(&mut self) {
        self.body.destroy();
    }
    fn center(&self) -> Vec2 {
        self.body.pos
    }
    fn blast_radius(&self) -> Option<f32> {
        Some(self.body.bounds().half_height() * 1.2)
    }
    fn score_value(&self) -> u32 {
        self.score_value
    }
}

impl Collider for Warplane {
    fn collision_bounds(&self) -> Rect {
        self.body.bounds()
    }
    fn is_alive(&self) -> bool {
        self.body.is_active() && !self.body.is_destroyed()
    }
    fn contact_damage(&self) -> i32 {
        0
    }
    fn take_hit(&mut self, damage: i32) {
        self.hp -= damage;
        if self.hp <= 0 {
            self.body.destroy();
        }
    }
    fn mark_destroyed(&mut self) {
        self.body.destroy();
    }
    fn center(&self) -> Vec2 {
        self.body.pos
    }
    fn blast_radius(&self) -> Option<f32> {
        Some(self.body.bounds().half_height() * 1.5)
    }
}

// ── Pairing rules ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
pub struct CollisionRule {
    pub damage_defender: bool,
    pub destroy_attacker: bool,
    pub destroy_defender: bool,
}

/// A projectile hit: defender takes the bullet's damage, bullet is consumed.
pub const BULLET_HIT: CollisionRule = CollisionRule {
    damage_defender: true,
    destroy_attacker: true,
    destroy_defender: false,
};

/// A ram: the attacker is lost outright, defender takes its contact damage.
pub const RAM: CollisionRule = CollisionRule {
    damage_defender: true,
    destroy_attacker: true,
    destroy_defender: false,
};

/// Mutual destruction, for pairings where neither side survives contact.
pub const DESTROY_BOTH: CollisionRule = CollisionRule {
    damage_defender: false,
    destroy_attacker: true,
    destroy_defender: true,
};

fn apply<A, B>(atk: &mut A, def: &mut B, rule: &CollisionRule, explosions: &mut ExplosionPool) -> u32
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
{
    let mut score = 0;
    if rule.damage_defender {
        def.take_hit(atk.contact_damage());
    }
    if rule.destroy_defender {
        def.mark_destroyed();
    }
    if rule.destroy_attacker {
        atk.mark_destroyed();
    }
    if !def.is_alive() {
        score += boom(def, explosions);
    }
    if !atk.is_alive() {
        score += boom(atk, explosions);
    }
    score
}

fn boom<C: Collider + ?Sized>(c: &C, explosions: &mut ExplosionPool) -> u32 {
    if let Some(radius) = c.blast_radius() {
        // An exhausted effect pool just skips the visual.
        let _ = explosions.obtain(c.center(), radius);
    }
    c.score_value()
}

// ── Resolvers ─────────────────────────────────────────────────────────────────

/// Pairwise test of one pool's active-alive set against another's.  `select`
/// filters the attacker side (player and enemy bullets share one pool).
/// Returns the score accrued by everything destroyed in this resolution.
pub fn resolve_pools<A, B>(
    attackers: &mut Pool<A>,
    select: impl Fn(&A) -> bool,
    defenders: &mut Pool<B>,
    rule: &CollisionRule,
    explosions: &mut ExplosionPool,
) -> u32
where
    A: PoolItem + Collider,
    B: PoolItem + Collider,
{
    let mut score = 0;
    for ai in 0..attackers.len() {
        let Some(atk) = attackers.get_mut(ai) else {
            continue;
        };
        if !atk.is_alive() || !select(atk) {
            continue;
        }
        for di in 0..defenders.len() {
            let Some(def) = defenders.get_mut(di) else {
                continue;
            };
            if !def.is_alive() {
                continue;
            }
            if overlaps(&atk.collision_bounds(), &def.collision_bounds()) {
                score += apply(&mut *atk, &mut *def, rule, explosions);
                if !atk.is_alive() {
                    break;
                }
            }
        }
    }
    score
}

/// One pool's active-alive set against a single reference entity (the
/// player craft).
pub fn resolve_against<A>(
    attackers: &mut Pool<A>,
    select: impl Fn(&A) -> bool,
    defender: &mut dyn Collider,
    rule: &CollisionRule,
    explosions: &mut ExplosionPool,
) -> u32
where
    A: PoolItem + Collider,
{
    let mut score = 0;
    for ai in 0..attackers.len() {
        if !defender.is_alive() {
            break;
        }
        let Some(atk) = attackers.get_mut(ai) else {
            continue;
        };
        if !atk.is_alive() || !select(atk) {
            continue;
        }
        if overlaps(&atk.collision_bounds(), &defender.collision_bounds()) {
            score += apply(&mut *atk, &mut *defender, rule, explosions);
        }
    }
    score
}
