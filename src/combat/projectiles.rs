//! Combat domain: pooled projectile slots.
//!
//! The pool owns a fixed arena of pre-spawned slot entities and hands out
//! indices, never live references. An empty pool means the attack is simply
//! skipped by the caller.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::ai::profile::ProjectileSpec;
use crate::combat::components::{GameLayer, Projectile, Team};
use crate::combat::events::DamageEvent;
use crate::content::AiDefaults;
use crate::player::Player;

/// Where parked slots sit, far outside the arena.
const PARK_POS: Vec2 = Vec2::new(100_000.0, 100_000.0);

/// Index into the pool's slot arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileHandle(usize);

/// Owned arena of reusable projectile slots.
#[derive(Resource, Debug, Default)]
pub struct ProjectilePool {
    slots: Vec<Entity>,
    free: Vec<usize>,
}

impl ProjectilePool {
    /// Add a slot entity to the arena, returning its index.
    pub fn register_slot(&mut self, entity: Entity) -> usize {
        let slot = self.slots.len();
        self.slots.push(entity);
        self.free.push(slot);
        slot
    }

    pub fn acquire(&mut self) -> Option<ProjectileHandle> {
        self.free.pop().map(ProjectileHandle)
    }

    pub fn release(&mut self, handle: ProjectileHandle) {
        self.free.push(handle.0);
    }

    pub fn entity(&self, handle: ProjectileHandle) -> Entity {
        self.slots[handle.0]
    }

    pub fn available(&self) -> usize {
        self.free.len()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

/// Mutable view over every slot entity's live components.
pub(crate) type ProjectileSlots<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut Transform,
        &'static mut LinearVelocity,
        &'static mut Visibility,
        &'static mut CollisionLayers,
        &'static mut Collider,
        &'static mut Projectile,
    ),
>;

/// Pre-spawn the slot arena at startup.
pub(crate) fn init_projectile_pool(
    mut commands: Commands,
    defaults: Res<AiDefaults>,
    mut pool: ResMut<ProjectilePool>,
) {
    let size = defaults.projectile_pool_size.max(1) as usize;
    for slot in 0..size {
        let entity = commands
            .spawn((
                Projectile {
                    owner: Entity::PLACEHOLDER,
                    damage: 0.0,
                    knockback: 0.0,
                    lifetime: 0.0,
                    slot,
                    in_flight: false,
                },
                Sprite {
                    color: Color::srgb(0.6, 0.9, 0.4),
                    custom_size: Some(Vec2::splat(8.0)),
                    ..default()
                },
                Transform::from_xyz(PARK_POS.x, PARK_POS.y, 1.0),
                Visibility::Hidden,
                RigidBody::Kinematic,
                Collider::circle(5.0),
                Sensor,
                CollisionEventsEnabled,
                CollisionLayers::NONE,
                LinearVelocity::default(),
            ))
            .id();
        pool.register_slot(entity);
    }
    info!("projectile pool ready with {} slots", size);
}

/// Launch up to `spec.count` projectiles fanned around `dir`. Returns how
/// many actually launched; pool exhaustion truncates instead of failing.
pub(crate) fn launch_volley(
    pool: &mut ProjectilePool,
    slots: &mut ProjectileSlots,
    owner: Entity,
    origin: Vec2,
    dir: Vec2,
    spec: &ProjectileSpec,
    damage: f32,
    knockback: f32,
) -> u32 {
    let count = spec.count.max(1);
    let mut launched = 0;
    for i in 0..count {
        let Some(handle) = pool.acquire() else {
            debug!("projectile pool empty; volley truncated at {}", launched);
            break;
        };
        let angle = if count == 1 {
            0.0
        } else {
            -spec.spread / 2.0 + spec.spread * i as f32 / (count - 1) as f32
        };
        let heading = Vec2::from_angle(angle).rotate(dir);
        let Ok((mut transform, mut velocity, mut visibility, mut layers, mut collider, mut projectile)) =
            slots.get_mut(pool.entity(handle))
        else {
            pool.release(handle);
            continue;
        };
        transform.translation = origin.extend(1.0);
        velocity.0 = heading * spec.speed;
        *visibility = Visibility::Visible;
        *layers = CollisionLayers::new(GameLayer::EnemyHitbox, [GameLayer::Player, GameLayer::Wall]);
        *collider = Collider::circle(spec.radius);
        projectile.owner = owner;
        projectile.damage = damage;
        projectile.knockback = knockback;
        projectile.lifetime = spec.lifetime;
        projectile.in_flight = true;
        launched += 1;
    }
    launched
}

fn park(
    transform: &mut Transform,
    velocity: &mut LinearVelocity,
    visibility: &mut Visibility,
    layers: &mut CollisionLayers,
    projectile: &mut Projectile,
    pool: &mut ProjectilePool,
) {
    transform.translation = PARK_POS.extend(1.0);
    velocity.0 = Vec2::ZERO;
    *visibility = Visibility::Hidden;
    *layers = CollisionLayers::NONE;
    projectile.in_flight = false;
    pool.release(ProjectileHandle(projectile.slot));
}

/// Return slots whose flight time ran out.
pub(crate) fn expire_projectiles(
    time: Res<Time>,
    mut pool: ResMut<ProjectilePool>,
    mut slots: ProjectileSlots,
) {
    let dt = time.delta_secs();
    for (mut transform, mut velocity, mut visibility, mut layers, _, mut projectile) in &mut slots {
        if !projectile.in_flight {
            continue;
        }
        projectile.lifetime -= dt;
        if projectile.lifetime <= 0.0 {
            park(
                &mut transform,
                &mut velocity,
                &mut visibility,
                &mut layers,
                &mut projectile,
                &mut pool,
            );
        }
    }
}

/// Resolve projectile contacts: damage the player, park on walls.
pub(crate) fn projectile_impacts(
    mut collisions: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut pool: ResMut<ProjectilePool>,
    mut slots: ProjectileSlots,
    victims: Query<&Team, With<Player>>,
) {
    for event in collisions.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];
        for (projectile_entity, other) in pairs {
            let Ok((mut transform, mut velocity, mut visibility, mut layers, _, mut projectile)) =
                slots.get_mut(projectile_entity)
            else {
                continue;
            };
            if !projectile.in_flight {
                continue;
            }
            if victims.get(other).is_ok() {
                let dir = velocity.0.try_normalize().unwrap_or(Vec2::X);
                damage_events.write(DamageEvent {
                    source: projectile.owner,
                    target: other,
                    amount: projectile.damage,
                    knockback: dir * projectile.knockback,
                });
            }
            park(
                &mut transform,
                &mut velocity,
                &mut visibility,
                &mut layers,
                &mut projectile,
                &mut pool,
            );
        }
    }
}
