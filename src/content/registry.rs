//! Runtime archetype registry built from loaded defs or the built-in roster.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::ai::profile::AiProfile;
use crate::content::data::ArchetypeDef;

#[derive(Resource, Debug, Default)]
pub struct ArchetypeRegistry {
    profiles: HashMap<String, AiProfile>,
}

impl ArchetypeRegistry {
    pub fn from_defs<'a>(defs: impl IntoIterator<Item = &'a ArchetypeDef>) -> Self {
        let mut registry = Self::default();
        for def in defs {
            registry.profiles.insert(def.id.clone(), AiProfile::from(def));
        }
        registry
    }

    /// The compiled-in roster, used when content files are absent or broken.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        for profile in AiProfile::builtin_roster() {
            registry.profiles.insert(profile.id.clone(), profile);
        }
        registry
    }

    pub fn profile(&self, id: &str) -> Option<AiProfile> {
        self.profiles.get(id).cloned()
    }

    pub fn remove(&mut self, id: &str) {
        self.profiles.remove(id);
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}
