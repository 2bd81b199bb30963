use pretty_assertions::assert_eq;

use sky_assault::entities::BulletOwner;
use sky_assault::error::PoolError;
use sky_assault::math::{Rect, Vec2};
use sky_assault::pool::{BulletPool, Pool, PoolItem};

/// Minimal poolable probe so the generic contract can be tested without any
/// gameplay behavior in the way.
#[derive(Default)]
struct Probe {
    active: bool,
    destroyed: bool,
    updates: u32,
    marker: u32,
}

impl Probe {
    fn destroy(&mut self) {
        self.destroyed = true;
    }
}

impl PoolItem for Probe {
    fn is_active(&self) -> bool {
        self.active
    }
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
    fn is_destroyed(&self) -> bool {
        self.destroyed
    }
    fn clear_destroyed(&mut self) {
        self.destroyed = false;
    }
}

// ── obtain / grow / reuse ─────────────────────────────────────────────────────

#[test]
fn obtain_grows_while_no_slot_is_free() {
    let mut pool: Pool<Probe> = Pool::new();
    for _ in 0..3 {
        pool.obtain().unwrap();
    }
    assert_eq!(pool.len(), 3);
    assert_eq!(pool.active_count(), 3);
}

#[test]
fn destroyed_and_swept_slots_are_reused_not_grown() {
    let mut pool: Pool<Probe> = Pool::new();
    for _ in 0..4 {
        pool.obtain().unwrap();
    }
    pool.for_each_active(|p| p.destroy());
    pool.sweep_destroyed();
    assert_eq!(pool.active_count(), 0);

    // Steady churn: obtain/destroy/sweep cycles never grow past 4 slots.
    for _ in 0..10 {
        for _ in 0..4 {
            pool.obtain().unwrap();
        }
        pool.for_each_active(|p| p.destroy());
        pool.sweep_destroyed();
    }
    assert_eq!(pool.len(), 4);
}

#[test]
fn obtain_reuses_lowest_free_index_first() {
    let mut pool: Pool<Probe> = Pool::new();
    for m in 0..3 {
        pool.obtain().unwrap().marker = m;
    }
    // Free slots 0 and 2, keep 1.
    pool.for_each_active(|p| {
        if p.marker != 1 {
            p.destroy();
        }
    });
    pool.sweep_destroyed();

    pool.obtain().unwrap().marker = 9;
    // Active iteration is in slot order: slot 0 must be the recycled one.
    let markers: Vec<u32> = pool.active().map(|p| p.marker).collect();
    assert_eq!(markers, vec![9, 1]);
}

#[test]
fn obtain_leaves_stale_fields_for_the_caller() {
    // Configure-after-obtain: the pool must not reset gameplay fields.
    let mut pool: Pool<Probe> = Pool::new();
    pool.obtain().unwrap().marker = 7;
    pool.for_each_active(|p| p.destroy());
    pool.sweep_destroyed();
    assert_eq!(pool.obtain().unwrap().marker, 7);
}

// ── ceiling ───────────────────────────────────────────────────────────────────

#[test]
fn ceiling_turns_exhaustion_into_an_error() {
    let mut pool: Pool<Probe> = Pool::with_ceiling(2);
    pool.obtain().unwrap();
    pool.obtain().unwrap();
    assert_eq!(pool.obtain().err(), Some(PoolError::Exhausted(2)));

    // Freeing a slot makes obtain succeed again.
    pool.for_each_active(|p| p.destroy());
    pool.sweep_destroyed();
    assert!(pool.obtain().is_ok());
    assert_eq!(pool.len(), 2);
}

// ── update pass / sweep ───────────────────────────────────────────────────────

#[test]
fn every_active_slot_is_visited_exactly_once_even_if_destroyed_mid_pass() {
    let mut pool: Pool<Probe> = Pool::new();
    for _ in 0..5 {
        pool.obtain().unwrap();
    }
    // Each visit destroys the slot; the pass must still reach all five.
    pool.for_each_active(|p| {
        p.updates += 1;
        p.destroy();
    });
    let counts: Vec<u32> = pool.active().map(|p| p.updates).collect();
    assert_eq!(counts, vec![1, 1, 1, 1, 1]);

    // Destroyed slots stay in the active set until the sweep.
    assert_eq!(pool.active_count(), 5);
    pool.sweep_destroyed();
    assert_eq!(pool.active_count(), 0);
}

#[test]
fn sweep_clears_the_destroyed_flag_with_the_slot() {
    let mut pool: Pool<Probe> = Pool::new();
    pool.obtain().unwrap();
    pool.for_each_active(|p| p.destroy());
    pool.sweep_destroyed();
    // The recycled slot must come back clean.
    assert!(!pool.obtain().unwrap().is_destroyed());
}

#[test]
fn dispose_releases_all_slots() {
    let mut pool: Pool<Probe> = Pool::new();
    for _ in 0..3 {
        pool.obtain().unwrap();
    }
    pool.dispose();
    assert!(pool.is_empty());
    assert_eq!(pool.active_count(), 0);
}

// ── specialized pool smoke: bullets under churn ───────────────────────────────

#[test]
fn bullet_pool_recycles_offscreen_bullets() {
    let world = Rect::centered(10.0, 10.0);
    let mut bullets = BulletPool::new();

    for _ in 0..20 {
        bullets
            .obtain(
                Vec2::new(0.0, 0.0),
                Vec2::new(100.0, 0.0),
                5,
                BulletOwner::Player,
                0.6,
            )
            .unwrap();
        // One second at speed 100 leaves the 10-unit world far behind.
        bullets.update_active(1.0, &world);
        bullets.sweep_destroyed();
        assert_eq!(bullets.active_count(), 0);
    }
    assert_eq!(bullets.len(), 1);
}
