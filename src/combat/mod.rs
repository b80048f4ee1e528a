//! Combat domain: health, damage flow, knockback, projectiles, deaths.

pub mod components;
pub mod events;
pub mod projectiles;
pub mod spawn;
mod systems;
#[cfg(test)]
mod tests;

pub use components::{
    Combatant, DespawnTimer, GameLayer, Health, Hitbox, HitboxLifetime, Hostile, Invulnerable,
    Projectile, Team, Telegraph,
};
pub use events::{DamageEvent, DeathEvent, EliteDefeatedEvent, PhaseChangeEvent};
pub use projectiles::ProjectilePool;

use bevy::prelude::*;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProjectilePool>()
            .add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_message::<PhaseChangeEvent>()
            .add_message::<EliteDefeatedEvent>()
            .add_systems(Startup, projectiles::init_projectile_pool)
            .add_systems(
                Update,
                (
                    systems::update_combat_timers,
                    systems::detect_hitbox_collisions,
                    projectiles::projectile_impacts,
                    projectiles::expire_projectiles,
                    systems::apply_damage,
                    systems::apply_knockback,
                    systems::process_deaths,
                    systems::finalize_despawns,
                )
                    .chain(),
            );
    }
}
