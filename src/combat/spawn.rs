//! Combat domain: hostile spawning helpers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::ai::blackboard::Blackboard;
use crate::ai::machine::StateMachine;
use crate::ai::profile::{AiProfile, Role};
use crate::anim::ActionPlayer;
use crate::combat::components::{Combatant, GameLayer, Health, Hostile, Team};

/// Body size and tint per role.
fn role_presentation(role: Role) -> (Vec2, Color) {
    match role {
        Role::Brute => (Vec2::new(34.0, 34.0), Color::srgb(0.8, 0.3, 0.3)),
        Role::Hexer => (Vec2::new(26.0, 38.0), Color::srgb(0.7, 0.3, 0.8)),
        Role::Skirmisher => (Vec2::new(24.0, 28.0), Color::srgb(0.9, 0.6, 0.2)),
        Role::Creeper => (Vec2::new(44.0, 30.0), Color::srgb(0.4, 0.6, 0.3)),
        Role::Elite => (Vec2::new(56.0, 56.0), Color::srgb(0.9, 0.1, 0.1)),
    }
}

/// Bundle for spawning a hostile with its AI core wired up.
#[derive(Bundle)]
pub struct HostileBundle {
    pub hostile: Hostile,
    pub combatant: Combatant,
    pub team: Team,
    pub health: Health,
    pub blackboard: Blackboard,
    pub machine: StateMachine,
    pub action: ActionPlayer,
    pub profile: AiProfile,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_events: CollisionEventsEnabled,
    pub collision_layers: CollisionLayers,
    pub velocity: LinearVelocity,
    pub damping: LinearDamping,
    pub locked_axes: LockedAxes,
}

impl HostileBundle {
    pub fn new(profile: AiProfile, position: Vec2) -> Self {
        let (size, color) = role_presentation(profile.role);
        Self {
            hostile: Hostile,
            combatant: Combatant,
            team: Team::Enemy,
            health: Health::new(profile.max_health),
            blackboard: Blackboard::new(position, profile.aggression.base),
            machine: StateMachine::default(),
            action: ActionPlayer::default(),
            profile,
            sprite: Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_xyz(position.x, position.y, 0.0),
            rigid_body: RigidBody::Dynamic,
            collider: Collider::rectangle(size.x, size.y),
            collision_events: CollisionEventsEnabled,
            collision_layers: CollisionLayers::new(
                GameLayer::Enemy,
                [GameLayer::Wall, GameLayer::Player, GameLayer::PlayerHitbox],
            ),
            velocity: LinearVelocity::default(),
            // High damping so knockback decays quickly on the flat plane.
            damping: LinearDamping(5.0),
            locked_axes: LockedAxes::ROTATION_LOCKED,
        }
    }
}

/// Spawn a hostile from its profile. Returns the entity id.
pub fn spawn_hostile(commands: &mut Commands, profile: AiProfile, position: Vec2) -> Entity {
    debug!("spawning '{}' ({:?}) at {}", profile.id, profile.role, position);
    commands.spawn(HostileBundle::new(profile, position)).id()
}
