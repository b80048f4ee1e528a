//! Data definitions for the RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used for
//! deserialization; archetype defs convert into runtime `AiProfile`s when
//! the registry is built.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::combo::{AggressionTuning, ComboTuning};
use crate::ai::profile::{AiProfile, AttackKind, AttackSpec, PhaseSpec, ProjectileSpec, Role};
use crate::ai::zones::ZoneThresholds;

/// Common wrapper for RON files with schema_version and items
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Archetypes (archetypes.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchetypeDef {
    pub id: String,
    pub role: Role,
    pub max_health: f32,
    pub ranges: RangesDef,
    pub chase: ChaseDef,
    pub movement: MovementDef,
    pub recovery: RecoveryDef,
    pub closing_chance: f32,
    pub combo: ComboTuning,
    pub aggression: AggressionTuning,
    pub melee_chain: Vec<AttackKind>,
    pub closing_attack: Option<AttackKind>,
    pub suppress_attack: Option<AttackKind>,
    pub attacks: Vec<AttackSpec>,
    pub projectile: Option<ProjectileSpec>,
    pub phases: Vec<PhaseSpec>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RangesDef {
    pub detection: f32,
    pub leash_factor: f32,
    pub attack: f32,
    pub secondary: f32,
    pub zones: ZoneThresholds,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChaseDef {
    /// None disables the rush escalation entirely.
    pub dwell_before_rush: Option<f32>,
    /// None disables the melee chase timeout.
    pub melee_chase_limit: Option<f32>,
    pub reposition_time: f32,
    pub persistent_chase_time: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MovementDef {
    pub move_speed: f32,
    pub chase_speed: f32,
    pub patrol_range: f32,
    pub patrol_pause: f32,
    pub scan_interval: f32,
    pub idle_linger: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecoveryDef {
    pub hurt_recovery: f32,
    pub death_linger: f32,
}

impl From<&ArchetypeDef> for AiProfile {
    fn from(def: &ArchetypeDef) -> Self {
        Self {
            id: def.id.clone(),
            role: def.role,
            max_health: def.max_health,
            detection_range: def.ranges.detection,
            leash_factor: def.ranges.leash_factor,
            attack_range: def.ranges.attack,
            secondary_range: def.ranges.secondary,
            zones: def.ranges.zones,
            dwell_before_rush: def.chase.dwell_before_rush.unwrap_or(f32::INFINITY),
            melee_chase_limit: def.chase.melee_chase_limit.unwrap_or(f32::INFINITY),
            reposition_time: def.chase.reposition_time,
            persistent_chase_time: def.chase.persistent_chase_time,
            scan_interval: def.movement.scan_interval,
            idle_linger: def.movement.idle_linger,
            patrol_range: def.movement.patrol_range,
            patrol_pause: def.movement.patrol_pause,
            move_speed: def.movement.move_speed,
            chase_speed: def.movement.chase_speed,
            hurt_recovery: def.recovery.hurt_recovery,
            death_linger: def.recovery.death_linger,
            closing_chance: def.closing_chance,
            combo: def.combo,
            aggression: def.aggression,
            melee_chain: def.melee_chain.clone(),
            closing_attack: def.closing_attack,
            suppress_attack: def.suppress_attack,
            attacks: def.attacks.clone(),
            projectile: def.projectile,
            phases: def.phases.clone(),
        }
    }
}

// ============================================================================
// Gameplay defaults (ai_defaults.ron)
// ============================================================================

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct AiDefaults {
    /// Seed for the decision-roll generator; fixed seed, reproducible session.
    pub rng_seed: u64,
    pub projectile_pool_size: u32,
    pub knockback_max_speed: f32,
    pub iframes_duration: f32,
    pub hit_flash_duration: f32,
}

impl Default for AiDefaults {
    fn default() -> Self {
        Self {
            rng_seed: 0x4D49_5245,
            projectile_pool_size: 32,
            knockback_max_speed: 800.0,
            iframes_duration: 0.5,
            hit_flash_duration: 0.1,
        }
    }
}
