//! Content domain: RON-driven archetype tuning with built-in fallbacks.

pub mod data;
pub mod loader;
pub mod registry;
#[cfg(test)]
mod tests;
pub mod validation;

pub use data::{AiDefaults, ArchetypeDef, DataFile};
pub use registry::ArchetypeRegistry;

use std::path::Path;

use bevy::prelude::*;

/// Load content before anything that spawns from it.
fn load_content(mut commands: Commands) {
    match loader::load_all_content(Path::new("assets/data")) {
        Ok((defs, defaults)) => {
            // Drop unusable defs, keep the rest running.
            let mut usable = Vec::new();
            for def in &defs {
                let errors = validation::validate_archetype(def);
                if errors.is_empty() {
                    usable.push(def.clone());
                } else {
                    for error in &errors {
                        warn!("{}", error);
                    }
                    warn!("archetype '{}' dropped from registry", def.id);
                }
            }
            let registry = if usable.is_empty() {
                warn!("no usable archetypes in content; using built-in roster");
                ArchetypeRegistry::builtin()
            } else {
                ArchetypeRegistry::from_defs(usable.iter())
            };
            info!("content loaded: {} archetypes", registry.len());
            commands.insert_resource(registry);
            commands.insert_resource(defaults);
        }
        Err(errors) => {
            for error in &errors {
                warn!("{}", error);
            }
            warn!("content load failed; using built-in roster and defaults");
            commands.insert_resource(ArchetypeRegistry::builtin());
            commands.insert_resource(AiDefaults::default());
        }
    }
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_content);
    }
}
