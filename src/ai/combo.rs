//! AI domain: combo/aggression bookkeeping and the next-attack policy.

use serde::{Deserialize, Serialize};

use crate::ai::blackboard::Blackboard;
use crate::ai::profile::{AiProfile, AttackKind};

/// Chain tuning shared by every archetype.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ComboTuning {
    /// Base probability of escalating mid-chain.
    pub chance: f32,
    pub max_count: u8,
    /// Seconds after an attack within which a follow-up keeps the chain.
    pub chain_window: f32,
    /// Idle seconds after which the chain fully resets.
    pub reset_time: f32,
    /// Combo steps lost when a hit is taken, clamped at zero.
    pub hit_penalty: u8,
}

/// Rubber-band aggression tuning.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct AggressionTuning {
    pub base: f32,
    /// Added on each hit recovery.
    pub step: f32,
    pub max: f32,
}

/// Whether another attack may extend the current chain.
pub fn can_chain(bb: &Blackboard, tuning: &ComboTuning, now: f32) -> bool {
    bb.combo_count < tuning.max_count && now - bb.last_attack_time < tuning.chain_window
}

/// Record an attack starting: bump the chain (clamped), stamp the time and
/// kind, enter combat mode.
pub fn register_attack(bb: &mut Blackboard, kind: AttackKind, tuning: &ComboTuning, now: f32) {
    bb.combo_count = (bb.combo_count + 1).min(tuning.max_count);
    bb.last_attack_time = now;
    bb.last_attack_kind = Some(kind);
    bb.in_combat_mode = true;
}

/// Background reset rule, checked once per tick independent of the active
/// state: a long enough pause loses the beat entirely.
pub fn decay(bb: &mut Blackboard, tuning: &ComboTuning, now: f32) {
    if bb.in_combat_mode && now - bb.last_attack_time > tuning.reset_time {
        bb.combo_count = 0;
        bb.in_combat_mode = false;
    }
}

/// Taking a hit knocks steps off the chain rather than zeroing it.
pub fn apply_hit_penalty(bb: &mut Blackboard, tuning: &ComboTuning) {
    bb.combo_count = bb.combo_count.saturating_sub(tuning.hit_penalty);
}

/// Raise the comeback multiplier on hit recovery, bounded above.
pub fn boost_aggression(bb: &mut Blackboard, tuning: &AggressionTuning) {
    bb.aggression = (bb.aggression + tuning.step).min(tuning.max);
}

/// Outcome of the next-attack policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextMove {
    Attack(AttackKind),
    /// Disengage and back off before re-engaging.
    Reposition,
    /// Keep closing on the target.
    Pursue,
}

/// Shared attack-selection policy, deterministic given `roll`.
///
/// Within melee range the first attack of a chain is the baseline link;
/// later links escalate with probability `chance * chain_scale` of the
/// candidate kind; an exhausted chain or a failed roll disengages. Within
/// secondary range a separate gate picks the closing attack over pursuit.
pub fn select_next_attack(
    bb: &Blackboard,
    profile: &AiProfile,
    distance: f32,
    roll: f32,
    now: f32,
) -> NextMove {
    if distance <= profile.attack_range {
        let Some(&baseline) = profile.melee_chain.first() else {
            // Ranged archetypes have no in-range answer: back off.
            return NextMove::Reposition;
        };
        if bb.combo_count == 0 {
            return NextMove::Attack(baseline);
        }
        if !can_chain(bb, &profile.combo, now) {
            return NextMove::Reposition;
        }
        let candidate = profile
            .melee_chain
            .get(bb.combo_count as usize)
            .or_else(|| profile.melee_chain.last())
            .copied()
            .unwrap_or(baseline);
        let scale = profile
            .attack(candidate)
            .map(|spec| spec.chain_scale)
            .unwrap_or(1.0);
        if roll < profile.combo.chance * scale {
            NextMove::Attack(candidate)
        } else {
            NextMove::Reposition
        }
    } else if distance <= profile.secondary_range {
        match profile.closing_attack {
            Some(kind) if roll < profile.closing_chance => NextMove::Attack(kind),
            _ => NextMove::Pursue,
        }
    } else {
        NextMove::Pursue
    }
}
