//! Player domain: the pursuit target the hostiles track.
//!
//! Input-driven movement, a light attack to exercise the hostiles' hit
//! reactions, and a respawn cycle so the dead->alive liveness edge actually
//! occurs in play.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::components::{
    Combatant, GameLayer, Health, Hitbox, HitboxLifetime, Invulnerable, Team,
};
use crate::combat::events::DeathEvent;

#[derive(Component, Debug)]
pub struct Player;

/// Unit-length aim/facing direction, updated from movement input.
#[derive(Component, Debug)]
pub struct Facing(pub Vec2);

/// Cooldown between player attacks.
#[derive(Component, Debug, Default)]
pub struct AttackCooldown {
    pub timer: f32,
}

#[derive(Resource, Debug, Clone)]
pub struct PlayerTuning {
    pub move_speed: f32,
    pub max_health: f32,
    pub respawn_delay: f32,
    pub attack_damage: f32,
    pub attack_knockback: f32,
    pub attack_cooldown: f32,
    pub attack_offset: f32,
    pub attack_size: Vec2,
    pub hitbox_lifetime: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 220.0,
            max_health: 100.0,
            respawn_delay: 2.5,
            attack_damage: 8.0,
            attack_knockback: 250.0,
            attack_cooldown: 0.35,
            attack_offset: 30.0,
            attack_size: Vec2::new(42.0, 34.0),
            hitbox_lifetime: 0.1,
        }
    }
}

/// Pending respawn after the player died.
#[derive(Resource, Debug, Default)]
pub struct RespawnTimer {
    pub remaining: Option<f32>,
}

const SPAWN_POS: Vec2 = Vec2::new(0.0, 0.0);

fn spawn_player(mut commands: Commands, tuning: Res<PlayerTuning>) {
    commands.spawn((
        Player,
        Facing(Vec2::X),
        AttackCooldown::default(),
        Combatant,
        Team::Player,
        Health::new(tuning.max_health),
        Invulnerable::default(),
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(Vec2::new(24.0, 40.0)),
            ..default()
        },
        Transform::from_xyz(SPAWN_POS.x, SPAWN_POS.y, 0.0),
        RigidBody::Dynamic,
        Collider::rectangle(24.0, 40.0),
        CollisionEventsEnabled,
        CollisionLayers::new(
            GameLayer::Player,
            [GameLayer::Wall, GameLayer::Enemy, GameLayer::EnemyHitbox],
        ),
        LinearVelocity::default(),
        LinearDamping(6.0),
        LockedAxes::ROTATION_LOCKED,
    ));
}

fn move_player(
    keyboard: Res<ButtonInput<KeyCode>>,
    tuning: Res<PlayerTuning>,
    mut query: Query<(&Health, &mut LinearVelocity, &mut Facing), With<Player>>,
) {
    for (health, mut velocity, mut facing) in &mut query {
        if health.is_dead() {
            velocity.0 = Vec2::ZERO;
            continue;
        }
        let mut axis = Vec2::ZERO;
        if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
            axis.y += 1.0;
        }
        if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
            axis.y -= 1.0;
        }
        if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
            axis.x -= 1.0;
        }
        if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
            axis.x += 1.0;
        }
        if let Some(dir) = axis.try_normalize() {
            velocity.0 = dir * tuning.move_speed;
            facing.0 = dir;
        }
    }
}

fn player_attack(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    tuning: Res<PlayerTuning>,
    mut query: Query<(Entity, &Transform, &Facing, &Health, &mut AttackCooldown), With<Player>>,
) {
    let dt = time.delta_secs();
    for (entity, transform, facing, health, mut cooldown) in &mut query {
        if cooldown.timer > 0.0 {
            cooldown.timer -= dt;
        }
        if health.is_dead() || cooldown.timer > 0.0 {
            continue;
        }
        if !keyboard.just_pressed(KeyCode::KeyJ) && !keyboard.just_pressed(KeyCode::Space) {
            continue;
        }
        cooldown.timer = tuning.attack_cooldown;

        let origin = transform.translation.truncate();
        let hitbox_pos = origin + facing.0 * tuning.attack_offset;
        commands.spawn((
            Hitbox {
                damage: tuning.attack_damage,
                knockback: tuning.attack_knockback,
                owner: entity,
                hit_entities: Vec::new(),
            },
            Team::Player,
            HitboxLifetime(tuning.hitbox_lifetime),
            Sprite {
                color: Color::srgba(1.0, 1.0, 0.0, 0.5),
                custom_size: Some(tuning.attack_size),
                ..default()
            },
            Transform::from_xyz(hitbox_pos.x, hitbox_pos.y, 1.0),
            Collider::rectangle(tuning.attack_size.x, tuning.attack_size.y),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::PlayerHitbox, [GameLayer::Enemy]),
        ));
    }
}

/// Hide the body and queue the respawn when the player dies.
fn handle_player_death(
    mut death_events: MessageReader<DeathEvent>,
    tuning: Res<PlayerTuning>,
    mut respawn: ResMut<RespawnTimer>,
    mut commands: Commands,
    players: Query<Entity, With<Player>>,
) {
    for event in death_events.read() {
        let Ok(entity) = players.get(event.entity) else {
            continue;
        };
        info!("player down; respawning in {:.1}s", tuning.respawn_delay);
        respawn.remaining = Some(tuning.respawn_delay);
        commands
            .entity(entity)
            .insert((Visibility::Hidden, CollisionLayers::NONE));
    }
}

/// Restore the same entity: health refills, so trackers see a fresh
/// dead->alive edge without a new reference appearing.
fn respawn_player(
    time: Res<Time>,
    mut respawn: ResMut<RespawnTimer>,
    mut commands: Commands,
    mut players: Query<(Entity, &mut Health, &mut Transform), With<Player>>,
) {
    let Some(remaining) = respawn.remaining.as_mut() else {
        return;
    };
    *remaining -= time.delta_secs();
    if *remaining > 0.0 {
        return;
    }
    respawn.remaining = None;
    for (entity, mut health, mut transform) in &mut players {
        health.restore_full();
        transform.translation = SPAWN_POS.extend(0.0);
        commands.entity(entity).insert((
            Visibility::Visible,
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Wall, GameLayer::Enemy, GameLayer::EnemyHitbox],
            ),
        ));
        info!("player respawned as {:?}", entity);
    }
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerTuning>()
            .init_resource::<RespawnTimer>()
            .add_systems(Startup, spawn_player)
            .add_systems(
                Update,
                (move_player, player_attack, handle_player_death, respawn_player),
            );
    }
}
