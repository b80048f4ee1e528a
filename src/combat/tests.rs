//! Combat domain: tests for health bookkeeping and the projectile pool.

use bevy::prelude::World;

use super::components::Health;
use super::projectiles::ProjectilePool;

// -----------------------------------------------------------------------------
// Health
// -----------------------------------------------------------------------------

#[test]
fn test_health_damage_and_death() {
    let mut health = Health::new(50.0);
    assert!(!health.is_dead());

    let dealt = health.take_damage(20.0);
    assert_eq!(dealt, 20.0);
    assert_eq!(health.current, 30.0);
    assert!((health.percent() - 0.6).abs() < 1e-6);

    // Overkill is clamped to remaining health.
    let dealt = health.take_damage(100.0);
    assert_eq!(dealt, 30.0);
    assert!(health.is_dead());
}

#[test]
fn test_health_restore_creates_alive_edge() {
    let mut health = Health::new(50.0);
    health.take_damage(50.0);
    assert!(health.is_dead());

    health.restore_full();
    assert!(!health.is_dead());
    assert_eq!(health.current, health.max);
}

// -----------------------------------------------------------------------------
// Projectile pool
// -----------------------------------------------------------------------------

#[test]
fn test_pool_refuses_over_acquisition() {
    let mut world = World::new();
    let mut pool = ProjectilePool::default();
    pool.register_slot(world.spawn_empty().id());
    pool.register_slot(world.spawn_empty().id());
    assert_eq!(pool.capacity(), 2);

    let first = pool.acquire().expect("first slot");
    let _second = pool.acquire().expect("second slot");
    assert!(pool.acquire().is_none());
    assert_eq!(pool.available(), 0);

    // Releasing recycles the slot.
    pool.release(first);
    assert!(pool.acquire().is_some());
}

#[test]
fn test_pool_handles_map_to_registered_entities() {
    let mut world = World::new();
    let mut pool = ProjectilePool::default();
    let a = world.spawn_empty().id();
    let b = world.spawn_empty().id();
    pool.register_slot(a);
    pool.register_slot(b);

    // Free list is a stack: the last registered slot comes out first.
    let handle = pool.acquire().expect("slot");
    assert_eq!(pool.entity(handle), b);
    let handle = pool.acquire().expect("slot");
    assert_eq!(pool.entity(handle), a);
}
