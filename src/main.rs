mod ai;
mod anim;
mod arena;
mod combat;
mod content;
mod player;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Hollowmire".to_string(),
                resolution: (1280.0, 720.0).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        // Top-down plane: knockback decays through damping, not gravity.
        .insert_resource(Gravity(Vec2::ZERO))
        .add_plugins((
            content::ContentPlugin,
            anim::AnimPlugin,
            player::PlayerPlugin,
            combat::CombatPlugin,
            ai::AiPlugin,
            arena::ArenaPlugin,
        ))
        .run();
}
