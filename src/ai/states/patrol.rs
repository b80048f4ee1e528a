//! Patrol: pace the span around the spawn origin, watching for the target.

use bevy::prelude::*;

use crate::ai::blackboard::Blackboard;
use crate::ai::machine::{StateId, StateMachine};
use crate::ai::profile::AiProfile;
use crate::ai::states::StateCtx;
use crate::ai::target;
use crate::anim::ActionPlayer;

pub(super) fn enter(
    m: &mut StateMachine,
    bb: &mut Blackboard,
    action: &mut ActionPlayer,
    profile: &AiProfile,
    _now: f32,
) {
    action.play_looping("walk", 0.8);
    bb.zone.reset();
    m.state_timer = profile.patrol_pause;
}

pub(super) fn update(
    m: &mut StateMachine,
    bb: &mut Blackboard,
    _action: &mut ActionPlayer,
    profile: &AiProfile,
    ctx: &StateCtx,
) -> Option<StateId> {
    // Detection interrupts the walk immediately.
    if let Some(obs) = ctx.target.filter(|obs| obs.alive) {
        if obs.pos.distance(ctx.self_pos) <= profile.detection_range {
            target::acquire(bb, &obs);
            bb.set_facing(obs.pos - ctx.self_pos);
            return Some(StateId::Chase);
        }
    }

    if m.state_timer > 0.0 {
        m.state_timer -= ctx.dt;
        bb.steer = Vec2::ZERO;
        return None;
    }

    let offset = ctx.self_pos.x - bb.patrol_origin.x;
    if offset.abs() > profile.patrol_range {
        bb.patrol_dir = -offset.signum();
        m.state_timer = profile.patrol_pause;
        bb.steer = Vec2::ZERO;
        return None;
    }

    bb.steer = Vec2::new(bb.patrol_dir * profile.move_speed, 0.0);
    bb.set_facing(bb.steer);
    None
}

pub(super) fn exit(
    _m: &mut StateMachine,
    _bb: &mut Blackboard,
    _action: &mut ActionPlayer,
    _profile: &AiProfile,
    _now: f32,
) {
}
