use rand::rngs::StdRng;
use rand::SeedableRng;

use sky_assault::emitter::{spawn_params, EnemyEmitter};
use sky_assault::error::ConfigError;
use sky_assault::math::Rect;
use sky_assault::pool::EnemyPool;

fn world() -> Rect {
    Rect::centered(20.0, 10.0)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[test]
fn emitter_rejects_non_positive_interval() {
    assert_eq!(
        EnemyEmitter::new(0.0).err(),
        Some(ConfigError::NonPositiveInterval(0.0))
    );
    assert_eq!(
        EnemyEmitter::new(-1.0).err(),
        Some(ConfigError::NonPositiveInterval(-1.0))
    );
    assert!(EnemyEmitter::new(f32::NAN).is_err());
}

// ── Cadence ───────────────────────────────────────────────────────────────────

#[test]
fn three_small_deltas_produce_one_spawn_with_overshoot_kept() {
    // Base interval 1.0 s, deltas 0.4 + 0.4 + 0.4 = 1.2 s: exactly one spawn,
    // and the countdown sits at 0.8 s, 0.2 s short of a full reset.
    let mut emitter = EnemyEmitter::new(1.0).unwrap();
    let mut enemies = EnemyPool::new(None);
    let mut rng = seeded_rng();
    let world = world();

    for _ in 0..3 {
        emitter.generate(0.4, &mut enemies, &world, &mut rng);
    }
    assert_eq!(enemies.active_count(), 1);
    assert!((emitter.remaining() - 0.8).abs() < 1e-4);
}

#[test]
fn spawn_count_is_invariant_to_delta_partitioning() {
    // 6.0 s of session time, base interval 1.0 s: six spawns whether the
    // time arrives as one stall-sized delta or 24 quarter-second frames.
    let world = world();
    let mut rng = seeded_rng();

    let mut one_shot = EnemyEmitter::new(1.0).unwrap();
    let mut pool_a = EnemyPool::new(None);
    one_shot.generate(6.0, &mut pool_a, &world, &mut rng);
    assert_eq!(pool_a.active_count(), 6);

    let mut steady = EnemyEmitter::new(1.0).unwrap();
    let mut pool_b = EnemyPool::new(None);
    for _ in 0..24 {
        steady.generate(0.25, &mut pool_b, &world, &mut rng);
    }
    assert_eq!(pool_b.active_count(), 6);
}

#[test]
fn a_stalled_frame_may_spawn_several_enemies() {
    let mut emitter = EnemyEmitter::new(1.0).unwrap();
    let mut enemies = EnemyPool::new(None);
    let mut rng = seeded_rng();
    emitter.generate(3.0, &mut enemies, &world(), &mut rng);
    assert_eq!(enemies.active_count(), 3);
}

#[test]
fn reset_rearms_timer_and_elapsed() {
    let mut emitter = EnemyEmitter::new(1.0).unwrap();
    let mut enemies = EnemyPool::new(None);
    let mut rng = seeded_rng();
    emitter.generate(2.5, &mut enemies, &world(), &mut rng);
    emitter.reset();
    assert!((emitter.remaining() - 1.0).abs() < 1e-6);
    assert_eq!(emitter.elapsed(), 0.0);
}

// ── Spawn placement ───────────────────────────────────────────────────────────

#[test]
fn spawns_enter_from_the_right_edge_within_vertical_bounds() {
    let mut emitter = EnemyEmitter::new(0.5).unwrap();
    let mut enemies = EnemyPool::new(None);
    let mut rng = seeded_rng();
    let world = world();

    emitter.generate(5.0, &mut enemies, &world, &mut rng);
    assert_eq!(enemies.active_count(), 10);
    for e in enemies.active() {
        let b = e.body.bounds();
        assert!((b.left() - world.right()).abs() < 1e-4);
        assert!(b.bottom() >= world.bottom() - 1e-4);
        assert!(b.top() <= world.top() + 1e-4);
    }
}

#[test]
fn pool_ceiling_drops_spawns_silently() {
    let mut emitter = EnemyEmitter::new(1.0).unwrap();
    let mut enemies = EnemyPool::with_ceiling(2, None);
    let mut rng = seeded_rng();
    emitter.generate(10.0, &mut enemies, &world(), &mut rng);
    assert_eq!(enemies.active_count(), 2);
    assert_eq!(enemies.len(), 2);
}

// ── Difficulty curve ──────────────────────────────────────────────────────────

#[test]
fn difficulty_is_monotonically_non_decreasing_over_time() {
    let checkpoints = [0.0, 10.0, 45.0, 60.0, 120.0, 600.0];
    for pair in checkpoints.windows(2) {
        let earlier = spawn_params(pair[0]);
        let later = spawn_params(pair[1]);
        assert!(later.hp >= earlier.hp);
        assert!(later.damage >= earlier.damage);
        assert!(later.cruise_velocity.x.abs() >= earlier.cruise_velocity.x.abs());
        // Shorter reload = higher fire rate.
        assert!(later.reload_interval <= earlier.reload_interval);
        assert!(later.score_value >= earlier.score_value);
    }
}
