//! AI domain: the per-entity blackboard.
//!
//! One blackboard per hostile entity, written only by that entity's own
//! systems. Cross-entity information (target position, liveness) flows in
//! through read-only snapshots each tick.

use bevy::prelude::*;

use crate::ai::profile::AttackKind;
use crate::ai::zones::ZoneTracker;

/// Per-kind cooldown stamps, keyed by `AttackKind::index`.
#[derive(Debug, Clone, Copy)]
pub struct AttackCooldowns {
    ready_at: [f32; AttackKind::COUNT],
}

impl Default for AttackCooldowns {
    fn default() -> Self {
        Self {
            ready_at: [f32::NEG_INFINITY; AttackKind::COUNT],
        }
    }
}

impl AttackCooldowns {
    pub fn ready(&self, kind: AttackKind, now: f32) -> bool {
        now >= self.ready_at[kind.index()]
    }

    pub fn stamp(&mut self, kind: AttackKind, ready_at: f32) {
        self.ready_at[kind.index()] = ready_at;
    }
}

/// Mutable record of everything the decision layer tracks for one entity.
#[derive(Component, Debug, Clone)]
pub struct Blackboard {
    /// Cached pursuit target; never dereferenced without a validity check.
    pub target: Option<Entity>,
    /// Position the target was last confirmed at, for persistent pursuit.
    pub last_known_pos: Option<Vec2>,
    /// When visibility of the target was lost, if it currently is.
    pub lost_sight_at: Option<f32>,
    /// Set when a hit lands this tick; cleared when Hurt recovery completes.
    pub is_hit: bool,
    /// Attacks in the current chain. Invariant: `<= combo.max_count`.
    pub combo_count: u8,
    pub last_attack_time: f32,
    /// Most recent link in the chain, if any attack has happened yet.
    pub last_attack_kind: Option<AttackKind>,
    /// Entered on the first attack of a chain, cleared by the reset rule.
    pub in_combat_mode: bool,
    /// Rubber-band multiplier raised on hit recovery, bounded above.
    pub aggression: f32,
    /// Elite phase, 1-based. Stays 1 for everything else.
    pub phase: u8,
    pub cooldowns: AttackCooldowns,
    /// Unit-length facing. Fallback direction for degenerate geometry.
    pub facing: Vec2,
    /// Desired planar velocity written by the active state.
    pub steer: Vec2,
    pub zone: ZoneTracker,
    /// While `now` is below this, chase backs away instead of engaging.
    pub reposition_until: f32,
    pub patrol_origin: Vec2,
    pub patrol_dir: f32,
}

impl Blackboard {
    pub fn new(origin: Vec2, aggression_base: f32) -> Self {
        Self {
            target: None,
            last_known_pos: None,
            lost_sight_at: None,
            is_hit: false,
            combo_count: 0,
            last_attack_time: f32::NEG_INFINITY,
            last_attack_kind: None,
            in_combat_mode: false,
            aggression: aggression_base,
            phase: 1,
            cooldowns: AttackCooldowns::default(),
            facing: Vec2::X,
            steer: Vec2::ZERO,
            zone: ZoneTracker::default(),
            reposition_until: f32::NEG_INFINITY,
            patrol_origin: origin,
            patrol_dir: 1.0,
        }
    }

    /// Update facing from a direction, ignoring vectors too short to
    /// normalize so `facing` never degenerates to zero or NaN.
    pub fn set_facing(&mut self, dir: Vec2) {
        if let Some(unit) = dir.try_normalize() {
            self.facing = unit;
        }
    }

    /// Direction toward a point, or current facing when the geometry
    /// degenerates (self and target coincide).
    pub fn direction_to(&self, from: Vec2, to: Vec2) -> Vec2 {
        (to - from).try_normalize().unwrap_or(self.facing)
    }
}
