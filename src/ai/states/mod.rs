//! AI domain: state bodies behind the uniform enter/update/exit contract.
//!
//! The state machine dispatches into these by id; bodies read the blackboard
//! and the per-tick context, and request transitions by returning the next id.

mod attack;
mod chase;
mod dead;
mod hurt;
mod idle;
mod patrol;

use bevy::prelude::*;

use crate::ai::blackboard::Blackboard;
use crate::ai::machine::{StateId, StateMachine};
use crate::ai::profile::AiProfile;
use crate::ai::target::TargetObs;
use crate::anim::ActionPlayer;

/// Per-tick inputs shared by every state body.
#[derive(Debug, Clone, Copy)]
pub struct StateCtx {
    pub dt: f32,
    /// Seconds since app start, the shared clock for all stamps.
    pub now: f32,
    pub self_pos: Vec2,
    /// This tick's snapshot of the pursuit target, if one exists at all.
    pub target: Option<TargetObs>,
    /// Pre-drawn uniform [0, 1) roll for this entity this tick.
    pub roll: f32,
}

impl StateCtx {
    /// Snapshot of the blackboard's own target, filtered to live ones.
    pub fn tracked_target(&self, bb: &Blackboard) -> Option<TargetObs> {
        let target = bb.target?;
        self.target.filter(|obs| obs.entity == target && obs.alive)
    }
}

pub fn on_enter(
    id: StateId,
    m: &mut StateMachine,
    bb: &mut Blackboard,
    action: &mut ActionPlayer,
    profile: &AiProfile,
    now: f32,
) {
    match id {
        StateId::Idle => idle::enter(m, bb, action, profile, now),
        StateId::Patrol => patrol::enter(m, bb, action, profile, now),
        StateId::Chase => chase::enter(m, bb, action, profile, now),
        StateId::Attack(_) => attack::enter(m, bb, action, profile, now),
        StateId::Hurt => hurt::enter(m, bb, action, profile, now),
        StateId::Dead => dead::enter(m, bb, action, profile, now),
    }
}

pub fn on_update(
    id: StateId,
    m: &mut StateMachine,
    bb: &mut Blackboard,
    action: &mut ActionPlayer,
    profile: &AiProfile,
    ctx: &StateCtx,
) -> Option<StateId> {
    match id {
        StateId::Idle => idle::update(m, bb, action, profile, ctx),
        StateId::Patrol => patrol::update(m, bb, action, profile, ctx),
        StateId::Chase => chase::update(m, bb, action, profile, ctx),
        StateId::Attack(_) => attack::update(m, bb, action, profile, ctx),
        StateId::Hurt => hurt::update(m, bb, action, profile, ctx),
        StateId::Dead => dead::update(m, bb, action, profile, ctx),
    }
}

pub fn on_exit(
    id: StateId,
    m: &mut StateMachine,
    bb: &mut Blackboard,
    action: &mut ActionPlayer,
    profile: &AiProfile,
    now: f32,
) {
    match id {
        StateId::Idle => idle::exit(m, bb, action, profile, now),
        StateId::Patrol => patrol::exit(m, bb, action, profile, now),
        StateId::Chase => chase::exit(m, bb, action, profile, now),
        StateId::Attack(_) => attack::exit(m, bb, action, profile, now),
        StateId::Hurt => hurt::exit(m, bb, action, profile, now),
        StateId::Dead => dead::exit(m, bb, action, profile, now),
    }
}
