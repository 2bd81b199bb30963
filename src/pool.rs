//! Object pooling: reusable entity slots with deferred reclamation.
//!
//! A slot's `active` flag is the partition bit: every slot is either in the
//! free subset (`!active`) or the active subset (`active`), never both.
//! Destruction is two-phase on purpose: `destroy()` only sets a flag, and the
//! end-of-frame [`Pool::sweep_destroyed`] pass flips the slot back to free.
//! Collision detection runs between the two phases and therefore always sees
//! a frame-stable active set.

use std::io;
use std::io::Write;
use std::rc::Rc;

use crate::audio::SoundFx;
use crate::entities::{Bullet, BulletOwner, EnemyPlane, EnemySpawn, Explosion};
use crate::error::PoolError;
use crate::math::{Rect, Vec2};

/// Lifecycle flags every poolable kind exposes; the pool never touches
/// gameplay fields (configure-after-obtain).
pub trait PoolItem: Default {
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
    fn is_destroyed(&self) -> bool;
    fn clear_destroyed(&mut self);
}

macro_rules! pool_item_via_body {
    ($ty:ty) => {
        impl PoolItem for $ty {
            fn is_active(&self) -> bool {
                self.body.is_active()
            }
            fn set_active(&mut self, active: bool) {
                self.body.set_active(active);
            }
            fn is_destroyed(&self) -> bool {
                self.body.is_destroyed()
            }
            fn clear_destroyed(&mut self) {
                self.body.clear_destroyed();
            }
        }
    };
}

pool_item_via_body!(Bullet);
pool_item_via_body!(EnemyPlane);
pool_item_via_body!(Explosion);

// ── Generic pool ──────────────────────────────────────────────────────────────

pub struct Pool<T> {
    slots: Vec<T>,
    ceiling: Option<usize>,
}

impl<T: PoolItem> Default for Pool<T> {
    fn default() -> Self {
        Pool::new()
    }
}

impl<T: PoolItem> Pool<T> {
    pub fn new() -> Self {
        Pool {
            slots: Vec::new(),
            ceiling: None,
        }
    }

    /// A pool that refuses to grow past `max` slots; `obtain` then signals
    /// exhaustion instead of allocating.
    pub fn with_ceiling(max: usize) -> Self {
        Pool {
            slots: Vec::new(),
            ceiling: Some(max),
        }
    }

    /// Hand out a slot: the lowest-index free slot if any exists (kept
    /// deterministic so tests can pin slot identity), otherwise one freshly
    /// appended slot.  Only the `active` flag is set here; every gameplay
    /// field is the caller's to configure.
    pub fn obtain(&mut self) -> Result<&mut T, PoolError> {
        if let Some(i) = self.slots.iter().position(|s| !s.is_active()) {
            let slot = &mut self.slots[i];
            debug_assert!(!slot.is_destroyed(), "free slot left marked destroyed");
            slot.set_active(true);
            return Ok(slot);
        }
        if let Some(max) = self.ceiling {
            if self.slots.len() >= max {
                return Err(PoolError::Exhausted(max));
            }
        }
        let i = self.slots.len();
        self.slots.push(T::default());
        let slot = &mut self.slots[i];
        slot.set_active(true);
        Ok(slot)
    }

    /// One pass over the active set, in stable index order, against the slot
    /// count snapshotted at entry.  A slot destroyed mid-pass is still
    /// visited to completion this frame; a slot appended mid-pass is not
    /// visited until the next frame.
    pub fn for_each_active(&mut self, mut f: impl FnMut(&mut T)) {
        let snapshot = self.slots.len();
        for i in 0..snapshot {
            if self.slots[i].is_active() {
                f(&mut self.slots[i]);
            }
        }
    }

    /// Reclaim every destroyed slot back to the free subset.  Runs once per
    /// frame, after collision resolution, never interleaved with updates.
    pub fn sweep_destroyed(&mut self) {
        for slot in &mut self.slots {
            if slot.is_destroyed() {
                debug_assert!(slot.is_active(), "destroyed flag on a free slot");
                slot.set_active(false);
                slot.clear_destroyed();
            }
        }
    }

    /// The current active subset, in the same stable order as updates.
    pub fn active(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter(|s| s.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Total slot count, free subset included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        self.slots.get_mut(i)
    }

    /// Draw every active slot in update order.  No mutation.
    pub fn draw_active<W, F>(&self, out: &mut W, mut draw: F) -> io::Result<()>
    where
        W: Write,
        F: FnMut(&mut W, &T) -> io::Result<()>,
    {
        for slot in self.active() {
            draw(out, slot)?;
        }
        Ok(())
    }

    /// Session teardown: drop all slots and with them any shared resource
    /// handles (sounds) they hold.
    pub fn dispose(&mut self) {
        self.slots.clear();
    }
}

// ── Specialized pools ─────────────────────────────────────────────────────────
//
// Thin typed wrappers: each knows how to initialize a recycled slot for its
// new role.  They deref to the generic pool for everything else.

pub struct BulletPool {
    pool: Pool<Bullet>,
}

impl Default for BulletPool {
    fn default() -> Self {
        BulletPool::new()
    }
}

impl BulletPool {
    pub fn new() -> Self {
        BulletPool { pool: Pool::new() }
    }

    pub fn with_ceiling(max: usize) -> Self {
        BulletPool {
            pool: Pool::with_ceiling(max),
        }
    }

    pub fn obtain(
        &mut self,
        pos: Vec2,
        velocity: Vec2,
        damage: i32,
        owner: BulletOwner,
        height: f32,
    ) -> Result<(), PoolError> {
        let bullet = self.pool.obtain()?;
        bullet.set(pos, velocity, damage, owner, height);
        Ok(())
    }

    pub fn update_active(&mut self, dt: f32, world: &Rect) {
        self.pool.for_each_active(|b| b.update(dt, world));
    }
}

impl std::ops::Deref for BulletPool {
    type Target = Pool<Bullet>;
    fn deref(&self) -> &Pool<Bullet> {
        &self.pool
    }
}

impl std::ops::DerefMut for BulletPool {
    fn deref_mut(&mut self) -> &mut Pool<Bullet> {
        &mut self.pool
    }
}

/// Enemy pool.  Holds the shared shoot sound handed to every spawned plane;
/// the shared bullet pool and the world-bounds snapshot come in as explicit
/// per-call parameters instead of stored references.
pub struct EnemyPool {
    pool: Pool<EnemyPlane>,
    shoot_sound: Option<Rc<dyn SoundFx>>,
}

impl EnemyPool {
    pub fn new(shoot_sound: Option<Rc<dyn SoundFx>>) -> Self {
        EnemyPool {
            pool: Pool::new(),
            shoot_sound,
        }
    }

    pub fn with_ceiling(max: usize, shoot_sound: Option<Rc<dyn SoundFx>>) -> Self {
        EnemyPool {
            pool: Pool::with_ceiling(max),
            shoot_sound,
        }
    }

    pub fn obtain(&mut self, spawn: &EnemySpawn) -> Result<(), PoolError> {
        let sound = self.shoot_sound.clone();
        let plane = self.pool.obtain()?;
        plane.set(spawn, sound);
        Ok(())
    }

    pub fn update_active(&mut self, dt: f32, world: &Rect, bullets: &mut BulletPool) {
        self.pool.for_each_active(|e| e.update(dt, world, bullets));
    }

    pub fn dispose(&mut self) {
        self.pool.dispose();
        self.shoot_sound = None;
    }
}

impl std::ops::Deref for EnemyPool {
    type Target = Pool<EnemyPlane>;
    fn deref(&self) -> &Pool<EnemyPlane> {
        &self.pool
    }
}

impl std::ops::DerefMut for EnemyPool {
    fn deref_mut(&mut self) -> &mut Pool<EnemyPlane> {
        &mut self.pool
    }
}

pub struct ExplosionPool {
    pool: Pool<Explosion>,
}

impl Default for ExplosionPool {
    fn default() -> Self {
        ExplosionPool::new()
    }
}

impl ExplosionPool {
    pub fn new() -> Self {
        ExplosionPool { pool: Pool::new() }
    }

    pub fn obtain(&mut self, center: Vec2, radius: f32) -> Result<(), PoolError> {
        let explosion = self.pool.obtain()?;
        explosion.set(center, radius);
        Ok(())
    }

    pub fn update_active(&mut self, dt: f32) {
        self.pool.for_each_active(|e| e.update(dt));
    }
}

impl std::ops::Deref for ExplosionPool {
    type Target = Pool<Explosion>;
    fn deref(&self) -> &Pool<Explosion> {
        &self.pool
    }
}

impl std::ops::DerefMut for ExplosionPool {
    fn deref_mut(&mut self) -> &mut Pool<Explosion> {
        &mut self.pool
    }
}
