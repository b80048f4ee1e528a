//! AI domain: per-archetype tuning baked into a component at spawn.
//!
//! Profiles are converted from content definitions when the registry loaded,
//! or taken from the built-in defaults below when it did not. The built-ins
//! double as the fixtures for the decision-layer tests.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::combo::{AggressionTuning, ComboTuning};
use crate::ai::zones::ZoneThresholds;

/// Hostile archetype, selecting the engagement logic used while chasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Role {
    /// Melee chain attacker.
    Brute,
    /// Spellcaster holding distance.
    Hexer,
    /// Ranged harasser that repositions when crowded.
    Skirmisher,
    /// Slow area-denial creature.
    Creeper,
    /// Multi-phase boss with four-zone tactics.
    Elite,
}

/// Attack variants shared across archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum AttackKind {
    /// Baseline melee hit.
    Strike,
    /// Heavier melee follow-up.
    Slam,
    /// Closing dash with a damage window along the lunge.
    Rush,
    /// Single projectile.
    Bolt,
    /// Projectile fan used for ranged suppression.
    Volley,
    /// Multi-hit poison pulse around the emitter.
    Miasma,
}

impl AttackKind {
    pub const COUNT: usize = 6;

    pub const ALL: [AttackKind; Self::COUNT] = [
        AttackKind::Strike,
        AttackKind::Slam,
        AttackKind::Rush,
        AttackKind::Bolt,
        AttackKind::Volley,
        AttackKind::Miasma,
    ];

    pub fn index(self) -> usize {
        match self {
            AttackKind::Strike => 0,
            AttackKind::Slam => 1,
            AttackKind::Rush => 2,
            AttackKind::Bolt => 3,
            AttackKind::Volley => 4,
            AttackKind::Miasma => 5,
        }
    }

    /// Kinds resolved by an overlap test at a reach point in front of the attacker.
    pub fn is_melee(self) -> bool {
        matches!(self, AttackKind::Strike | AttackKind::Slam | AttackKind::Rush)
    }

    /// Kinds resolved by launching pooled projectiles.
    pub fn is_projectile(self) -> bool {
        matches!(self, AttackKind::Bolt | AttackKind::Volley)
    }

    /// Kinds resolved by a radial pulse around the attacker.
    pub fn is_pulse(self) -> bool {
        matches!(self, AttackKind::Miasma)
    }
}

/// Per-attack-type tuning tuple: action timing, damage window, delivery.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AttackSpec {
    pub kind: AttackKind,
    /// Action name handed to the action player.
    pub action: String,
    /// Nominal action duration in seconds.
    pub duration: f32,
    /// Damage window open, as a fraction of the action.
    pub window_open: f32,
    /// Damage window close, as a fraction of the action.
    pub window_close: f32,
    /// Damage applications allowed per instance (1 for everything but miasma).
    pub max_hits: u8,
    /// Progress spacing between multi-hit applications.
    pub hit_spacing: f32,
    pub base_damage: f32,
    /// Per-combo-step damage bonus, floored before application.
    pub combo_bonus: f32,
    pub knockback: f32,
    /// Overlap test center offset along facing (melee kinds).
    pub reach: f32,
    /// Overlap test radius (melee and pulse kinds).
    pub radius: f32,
    /// Forward speed applied while the action runs (rush kinds).
    pub drive_speed: f32,
    pub cooldown: f32,
    /// Organically-tuned scale applied to the combo chance when this kind is
    /// the candidate chain continuation.
    pub chain_scale: f32,
}

/// Projectile kinematics for archetypes that launch from the pool.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ProjectileSpec {
    pub speed: f32,
    pub radius: f32,
    pub lifetime: f32,
    /// Projectiles per volley; 1 for a plain bolt.
    pub count: u8,
    /// Total fan angle in radians across a volley.
    pub spread: f32,
}

/// Elite phase threshold: entered once health drops to the fraction.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PhaseSpec {
    pub health_frac: f32,
    pub aggression_bonus: f32,
    pub damage_scale: f32,
}

/// Complete per-archetype tuning, one component per hostile entity.
#[derive(Component, Debug, Clone)]
pub struct AiProfile {
    pub id: String,
    pub role: Role,
    pub max_health: f32,
    pub detection_range: f32,
    /// Chase gives up beyond `detection_range * leash_factor`.
    pub leash_factor: f32,
    pub attack_range: f32,
    pub secondary_range: f32,
    pub zones: ZoneThresholds,
    /// Continuous Outer/Mid dwell required before a rush is allowed.
    pub dwell_before_rush: f32,
    /// Continuous Inner dwell after which melee pursuit disengages.
    pub melee_chase_limit: f32,
    /// How long a disengage keeps the entity backing off.
    pub reposition_time: f32,
    /// Pursuit of the last known position after losing sight.
    pub persistent_chase_time: f32,
    pub scan_interval: f32,
    pub idle_linger: f32,
    pub patrol_range: f32,
    pub patrol_pause: f32,
    pub move_speed: f32,
    pub chase_speed: f32,
    pub hurt_recovery: f32,
    /// Delay between the death action and despawn.
    pub death_linger: f32,
    /// Probability gate for the closing attack in secondary range.
    pub closing_chance: f32,
    pub combo: ComboTuning,
    pub aggression: AggressionTuning,
    /// In-range chain order; empty for archetypes that back off when crowded.
    pub melee_chain: Vec<AttackKind>,
    /// Secondary-range closer (rush or bolt by archetype).
    pub closing_attack: Option<AttackKind>,
    /// Outer-zone suppression attack (elites).
    pub suppress_attack: Option<AttackKind>,
    pub attacks: Vec<AttackSpec>,
    pub projectile: Option<ProjectileSpec>,
    /// Descending health fractions; empty for non-elites.
    pub phases: Vec<PhaseSpec>,
}

impl AiProfile {
    pub fn attack(&self, kind: AttackKind) -> Option<&AttackSpec> {
        self.attacks.iter().find(|spec| spec.kind == kind)
    }

    /// Phase a health fraction maps to, 1-based. Thresholds are checked in
    /// their configured descending order; the deepest one satisfied wins.
    pub fn expected_phase(&self, health_frac: f32) -> u8 {
        let mut expected = 1u8;
        for (index, phase) in self.phases.iter().enumerate() {
            if health_frac <= phase.health_frac {
                expected = index as u8 + 2;
            }
        }
        expected
    }

    /// Damage scale for the current phase (1.0 outside configured phases).
    pub fn phase_damage_scale(&self, phase: u8) -> f32 {
        if phase <= 1 {
            return 1.0;
        }
        self.phases
            .get(phase as usize - 2)
            .map(|p| p.damage_scale)
            .unwrap_or(1.0)
    }

    /// Built-in brute: short patrol, two-link melee chain.
    pub fn brute() -> Self {
        Self {
            id: "bogskin_brute".to_string(),
            role: Role::Brute,
            max_health: 60.0,
            detection_range: 200.0,
            leash_factor: 1.5,
            attack_range: 40.0,
            secondary_range: 90.0,
            zones: ZoneThresholds {
                inner: 40.0,
                mid: 90.0,
                outer: 200.0,
            },
            dwell_before_rush: 2.0,
            melee_chase_limit: 6.0,
            reposition_time: 1.2,
            persistent_chase_time: 2.5,
            scan_interval: 0.5,
            idle_linger: 1.5,
            patrol_range: 100.0,
            patrol_pause: 1.0,
            move_speed: 80.0,
            chase_speed: 150.0,
            hurt_recovery: 0.45,
            death_linger: 1.2,
            closing_chance: 0.0,
            combo: ComboTuning {
                chance: 0.65,
                max_count: 3,
                chain_window: 1.4,
                reset_time: 2.0,
                hit_penalty: 2,
            },
            aggression: AggressionTuning {
                base: 1.0,
                step: 0.15,
                max: 1.6,
            },
            melee_chain: vec![AttackKind::Strike, AttackKind::Slam],
            closing_attack: None,
            suppress_attack: None,
            attacks: vec![
                AttackSpec {
                    kind: AttackKind::Strike,
                    action: "strike".to_string(),
                    duration: 0.5,
                    window_open: 0.35,
                    window_close: 0.6,
                    max_hits: 1,
                    hit_spacing: 0.0,
                    base_damage: 8.0,
                    combo_bonus: 1.5,
                    knockback: 220.0,
                    reach: 30.0,
                    radius: 24.0,
                    drive_speed: 0.0,
                    cooldown: 0.8,
                    chain_scale: 1.0,
                },
                AttackSpec {
                    kind: AttackKind::Slam,
                    action: "slam".to_string(),
                    duration: 0.8,
                    window_open: 0.5,
                    window_close: 0.7,
                    max_hits: 1,
                    hit_spacing: 0.0,
                    base_damage: 16.0,
                    combo_bonus: 2.0,
                    knockback: 420.0,
                    reach: 34.0,
                    radius: 30.0,
                    drive_speed: 0.0,
                    cooldown: 2.2,
                    chain_scale: 0.7,
                },
            ],
            projectile: None,
            phases: Vec::new(),
        }
    }

    /// Built-in hexer: bolt caster, backs off when crowded.
    pub fn hexer() -> Self {
        Self {
            id: "marsh_hexer".to_string(),
            role: Role::Hexer,
            max_health: 35.0,
            detection_range: 320.0,
            leash_factor: 1.4,
            attack_range: 70.0,
            secondary_range: 280.0,
            zones: ZoneThresholds {
                inner: 70.0,
                mid: 280.0,
                outer: 320.0,
            },
            dwell_before_rush: f32::INFINITY,
            melee_chase_limit: f32::INFINITY,
            reposition_time: 1.6,
            persistent_chase_time: 3.0,
            scan_interval: 0.4,
            idle_linger: 2.0,
            patrol_range: 60.0,
            patrol_pause: 1.5,
            move_speed: 60.0,
            chase_speed: 110.0,
            hurt_recovery: 0.6,
            death_linger: 1.0,
            closing_chance: 0.8,
            combo: ComboTuning {
                chance: 0.5,
                max_count: 2,
                chain_window: 1.8,
                reset_time: 2.5,
                hit_penalty: 2,
            },
            aggression: AggressionTuning {
                base: 1.0,
                step: 0.1,
                max: 1.4,
            },
            melee_chain: Vec::new(),
            closing_attack: Some(AttackKind::Bolt),
            suppress_attack: None,
            attacks: vec![AttackSpec {
                kind: AttackKind::Bolt,
                action: "cast_bolt".to_string(),
                duration: 0.9,
                window_open: 0.55,
                window_close: 0.7,
                max_hits: 1,
                hit_spacing: 0.0,
                base_damage: 10.0,
                combo_bonus: 1.0,
                knockback: 160.0,
                reach: 0.0,
                radius: 0.0,
                drive_speed: 0.0,
                cooldown: 1.8,
                chain_scale: 0.6,
            }],
            projectile: Some(ProjectileSpec {
                speed: 260.0,
                radius: 6.0,
                lifetime: 2.5,
                count: 1,
                spread: 0.0,
            }),
            phases: Vec::new(),
        }
    }

    /// Built-in skirmisher: darts from mid range, repositions on proximity.
    pub fn skirmisher() -> Self {
        Self {
            id: "dartfang".to_string(),
            role: Role::Skirmisher,
            max_health: 28.0,
            detection_range: 280.0,
            leash_factor: 1.6,
            attack_range: 60.0,
            secondary_range: 220.0,
            zones: ZoneThresholds {
                inner: 60.0,
                mid: 220.0,
                outer: 280.0,
            },
            dwell_before_rush: f32::INFINITY,
            melee_chase_limit: f32::INFINITY,
            reposition_time: 1.0,
            persistent_chase_time: 3.5,
            scan_interval: 0.35,
            idle_linger: 1.0,
            patrol_range: 140.0,
            patrol_pause: 0.8,
            move_speed: 100.0,
            chase_speed: 170.0,
            hurt_recovery: 0.35,
            death_linger: 0.8,
            closing_chance: 0.7,
            combo: ComboTuning {
                chance: 0.55,
                max_count: 3,
                chain_window: 1.2,
                reset_time: 1.8,
                hit_penalty: 1,
            },
            aggression: AggressionTuning {
                base: 1.0,
                step: 0.2,
                max: 1.8,
            },
            melee_chain: Vec::new(),
            closing_attack: Some(AttackKind::Bolt),
            suppress_attack: None,
            attacks: vec![AttackSpec {
                kind: AttackKind::Bolt,
                action: "throw_dart".to_string(),
                duration: 0.55,
                window_open: 0.4,
                window_close: 0.55,
                max_hits: 1,
                hit_spacing: 0.0,
                base_damage: 6.0,
                combo_bonus: 1.0,
                knockback: 120.0,
                reach: 0.0,
                radius: 0.0,
                drive_speed: 0.0,
                cooldown: 1.1,
                chain_scale: 0.8,
            }],
            projectile: Some(ProjectileSpec {
                speed: 340.0,
                radius: 4.0,
                lifetime: 1.8,
                count: 1,
                spread: 0.0,
            }),
            phases: Vec::new(),
        }
    }

    /// Built-in creeper: slow, pulses miasma at close range.
    pub fn creeper() -> Self {
        Self {
            id: "mireshade".to_string(),
            role: Role::Creeper,
            max_health: 90.0,
            detection_range: 180.0,
            leash_factor: 1.3,
            attack_range: 55.0,
            secondary_range: 55.0,
            zones: ZoneThresholds {
                inner: 55.0,
                mid: 120.0,
                outer: 180.0,
            },
            dwell_before_rush: f32::INFINITY,
            melee_chase_limit: f32::INFINITY,
            reposition_time: 1.8,
            persistent_chase_time: 4.0,
            scan_interval: 0.6,
            idle_linger: 2.5,
            patrol_range: 50.0,
            patrol_pause: 2.0,
            move_speed: 35.0,
            chase_speed: 55.0,
            hurt_recovery: 0.7,
            death_linger: 1.5,
            closing_chance: 0.0,
            combo: ComboTuning {
                chance: 1.0,
                max_count: 1,
                chain_window: 0.5,
                reset_time: 3.0,
                hit_penalty: 1,
            },
            aggression: AggressionTuning {
                base: 1.0,
                step: 0.05,
                max: 1.2,
            },
            melee_chain: vec![AttackKind::Miasma],
            closing_attack: None,
            suppress_attack: None,
            attacks: vec![AttackSpec {
                kind: AttackKind::Miasma,
                action: "exhale_miasma".to_string(),
                duration: 2.4,
                window_open: 0.25,
                window_close: 0.9,
                max_hits: 4,
                hit_spacing: 0.16,
                base_damage: 3.0,
                combo_bonus: 0.0,
                knockback: 60.0,
                reach: 0.0,
                radius: 70.0,
                drive_speed: 0.0,
                cooldown: 4.0,
                chain_scale: 1.0,
            }],
            projectile: None,
            phases: Vec::new(),
        }
    }

    /// Built-in elite: four-zone boss with three phases.
    pub fn elite() -> Self {
        Self {
            id: "marrow_king".to_string(),
            role: Role::Elite,
            max_health: 400.0,
            detection_range: 420.0,
            leash_factor: 2.0,
            attack_range: 50.0,
            secondary_range: 160.0,
            zones: ZoneThresholds {
                inner: 50.0,
                mid: 160.0,
                outer: 340.0,
            },
            dwell_before_rush: 3.0,
            melee_chase_limit: 4.0,
            reposition_time: 1.5,
            persistent_chase_time: 5.0,
            scan_interval: 0.3,
            idle_linger: 1.0,
            patrol_range: 80.0,
            patrol_pause: 1.2,
            move_speed: 70.0,
            chase_speed: 140.0,
            hurt_recovery: 0.3,
            death_linger: 2.5,
            closing_chance: 0.6,
            combo: ComboTuning {
                chance: 0.7,
                max_count: 4,
                chain_window: 1.6,
                reset_time: 2.0,
                hit_penalty: 2,
            },
            aggression: AggressionTuning {
                base: 1.0,
                step: 0.12,
                max: 1.9,
            },
            melee_chain: vec![AttackKind::Strike, AttackKind::Slam],
            closing_attack: Some(AttackKind::Rush),
            suppress_attack: Some(AttackKind::Volley),
            attacks: vec![
                AttackSpec {
                    kind: AttackKind::Strike,
                    action: "strike".to_string(),
                    duration: 0.45,
                    window_open: 0.3,
                    window_close: 0.55,
                    max_hits: 1,
                    hit_spacing: 0.0,
                    base_damage: 12.0,
                    combo_bonus: 2.0,
                    knockback: 260.0,
                    reach: 38.0,
                    radius: 28.0,
                    drive_speed: 0.0,
                    cooldown: 0.7,
                    chain_scale: 1.0,
                },
                AttackSpec {
                    kind: AttackKind::Slam,
                    action: "slam".to_string(),
                    duration: 0.9,
                    window_open: 0.55,
                    window_close: 0.75,
                    max_hits: 1,
                    hit_spacing: 0.0,
                    base_damage: 24.0,
                    combo_bonus: 3.0,
                    knockback: 520.0,
                    reach: 42.0,
                    radius: 40.0,
                    drive_speed: 0.0,
                    cooldown: 2.6,
                    chain_scale: 0.8,
                },
                AttackSpec {
                    kind: AttackKind::Rush,
                    action: "rush".to_string(),
                    duration: 0.7,
                    window_open: 0.15,
                    window_close: 0.85,
                    max_hits: 1,
                    hit_spacing: 0.0,
                    base_damage: 18.0,
                    combo_bonus: 0.0,
                    knockback: 480.0,
                    reach: 26.0,
                    radius: 32.0,
                    drive_speed: 420.0,
                    cooldown: 5.0,
                    chain_scale: 0.5,
                },
                AttackSpec {
                    kind: AttackKind::Volley,
                    action: "volley".to_string(),
                    duration: 1.2,
                    window_open: 0.5,
                    window_close: 0.65,
                    max_hits: 1,
                    hit_spacing: 0.0,
                    base_damage: 7.0,
                    combo_bonus: 0.0,
                    knockback: 140.0,
                    reach: 0.0,
                    radius: 0.0,
                    drive_speed: 0.0,
                    cooldown: 4.5,
                    chain_scale: 1.0,
                },
            ],
            projectile: Some(ProjectileSpec {
                speed: 300.0,
                radius: 7.0,
                lifetime: 2.2,
                count: 5,
                spread: 0.9,
            }),
            phases: vec![
                PhaseSpec {
                    health_frac: 0.6,
                    aggression_bonus: 0.2,
                    damage_scale: 1.15,
                },
                PhaseSpec {
                    health_frac: 0.25,
                    aggression_bonus: 0.35,
                    damage_scale: 1.35,
                },
            ],
        }
    }

    /// The built-in roster used when content files are missing.
    pub fn builtin_roster() -> Vec<AiProfile> {
        vec![
            Self::brute(),
            Self::hexer(),
            Self::skirmisher(),
            Self::creeper(),
            Self::elite(),
        ]
    }
}
