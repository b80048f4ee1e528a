//! AI domain: the combat decision core shared by every hostile.
//!
//! Per-entity state machine with a uniform enter/update/exit contract,
//! plus the shared decision layer: tactical zone classification, combo and
//! aggression bookkeeping, time-windowed damage application, and target
//! validity tracking.

pub mod blackboard;
pub mod combo;
pub mod machine;
pub mod profile;
pub mod states;
mod systems;
pub mod target;
#[cfg(test)]
mod tests;
pub mod window;
pub mod zones;

pub use blackboard::Blackboard;
pub use machine::{StateId, StateMachine};
pub use profile::{AiProfile, AttackKind, Role};

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::content::AiDefaults;

/// Source of decision rolls, seeded from content for reproducible sessions.
#[derive(Resource)]
pub struct AiRng(pub ChaCha8Rng);

fn seed_rng(mut commands: Commands, defaults: Res<AiDefaults>) {
    commands.insert_resource(AiRng(ChaCha8Rng::seed_from_u64(defaults.rng_seed)));
}

pub struct AiPlugin;

impl Plugin for AiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<systems::TargetLiveness>()
            .add_systems(Startup, seed_rng)
            .add_systems(
                Update,
                (
                    systems::sweep_target_liveness,
                    systems::decay_combos,
                    systems::drive_state_machines,
                    systems::resolve_damage_windows,
                    systems::apply_ai_movement,
                    systems::react_to_damage,
                    systems::check_boss_phases,
                )
                    .chain()
                    // Actions advance first so damage windows and decision
                    // points see this tick's progress.
                    .after(crate::anim::tick_action_players),
            );
    }
}
