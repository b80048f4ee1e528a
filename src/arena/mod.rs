//! Arena domain: demo arena bounds and the hostile roster.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::components::GameLayer;
use crate::combat::events::{EliteDefeatedEvent, PhaseChangeEvent};
use crate::combat::spawn::spawn_hostile;
use crate::content::ArchetypeRegistry;

const ARENA_HALF: Vec2 = Vec2::new(600.0, 340.0);
const WALL_THICKNESS: f32 = 24.0;

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn spawn_arena(mut commands: Commands) {
    let walls = [
        // top, bottom, left, right
        (
            Vec2::new(0.0, ARENA_HALF.y),
            Vec2::new(ARENA_HALF.x * 2.0, WALL_THICKNESS),
        ),
        (
            Vec2::new(0.0, -ARENA_HALF.y),
            Vec2::new(ARENA_HALF.x * 2.0, WALL_THICKNESS),
        ),
        (
            Vec2::new(-ARENA_HALF.x, 0.0),
            Vec2::new(WALL_THICKNESS, ARENA_HALF.y * 2.0),
        ),
        (
            Vec2::new(ARENA_HALF.x, 0.0),
            Vec2::new(WALL_THICKNESS, ARENA_HALF.y * 2.0),
        ),
    ];
    for (pos, size) in walls {
        commands.spawn((
            Sprite {
                color: Color::srgb(0.25, 0.22, 0.2),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(pos.x, pos.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            CollisionLayers::new(GameLayer::Wall, LayerMask::ALL),
        ));
    }
}

/// Place one of each archetype around the arena.
fn spawn_roster(mut commands: Commands, registry: Res<ArchetypeRegistry>) {
    let placements = [
        ("bogskin_brute", Vec2::new(-380.0, 120.0)),
        ("marsh_hexer", Vec2::new(420.0, 180.0)),
        ("dartfang", Vec2::new(380.0, -160.0)),
        ("mireshade", Vec2::new(-420.0, -180.0)),
        ("marrow_king", Vec2::new(0.0, 240.0)),
    ];
    for (id, position) in placements {
        match registry.profile(id) {
            Some(profile) => {
                spawn_hostile(&mut commands, profile, position);
            }
            None => warn!("archetype '{}' missing from registry; not spawned", id),
        }
    }
}

/// Narrate the elite fight milestones.
fn announce_elite_progress(
    mut phases: MessageReader<PhaseChangeEvent>,
    mut defeats: MessageReader<EliteDefeatedEvent>,
) {
    for event in phases.read() {
        info!("the elite shifts into phase {}", event.phase);
    }
    for event in defeats.read() {
        info!("arena cleared: {:?} has fallen", event.elite);
    }
}

pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_camera, spawn_arena, spawn_roster))
            .add_systems(Update, announce_elite_progress);
    }
}
