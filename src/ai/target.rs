//! AI domain: target validity tracking.
//!
//! Wraps the blackboard's cached target reference: states ask "is the
//! current target alive and eligible" before committing to anything
//! target-relative, and all drops go through `clear` so the reason is
//! visible in the logs.

use bevy::prelude::*;

use crate::ai::blackboard::Blackboard;

/// Read-only snapshot of the pursuit target, rebuilt once per tick.
#[derive(Debug, Clone, Copy)]
pub struct TargetObs {
    pub entity: Entity,
    pub pos: Vec2,
    pub alive: bool,
}

/// Why a target reference was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Died,
    Despawned,
    /// Left leash range and outlasted the persistent-chase timer.
    Evaded,
}

/// Whether the cached target may be acted on this tick.
///
/// `obs` is this tick's world snapshot; a cached reference pointing at a
/// different entity than the snapshot (stale after a despawn) is invalid.
pub fn is_valid(bb: &Blackboard, obs: Option<&TargetObs>) -> bool {
    let Some(target) = bb.target else {
        return false;
    };
    match obs {
        Some(obs) => obs.entity == target && obs.alive,
        None => false,
    }
}

/// The only sanctioned way to drop a target.
pub fn clear(bb: &mut Blackboard, reason: DropReason) {
    if bb.target.take().is_some() {
        debug!("target dropped: {:?}", reason);
    }
    bb.last_known_pos = None;
    bb.lost_sight_at = None;
}

/// Cache a freshly detected target.
pub fn acquire(bb: &mut Blackboard, obs: &TargetObs) {
    bb.target = Some(obs.entity);
    bb.last_known_pos = Some(obs.pos);
    bb.lost_sight_at = None;
}
