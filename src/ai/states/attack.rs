//! Attack: play the variant's action, own its damage window, and queue the
//! next move at the lookahead decision points.

use bevy::prelude::*;

use crate::ai::blackboard::Blackboard;
use crate::ai::combo::{self, NextMove};
use crate::ai::machine::{AttackInstance, StateId, StateMachine};
use crate::ai::profile::AiProfile;
use crate::ai::states::StateCtx;
use crate::ai::window::DecisionAt;
use crate::anim::ActionPlayer;

pub(super) fn enter(
    m: &mut StateMachine,
    bb: &mut Blackboard,
    action: &mut ActionPlayer,
    profile: &AiProfile,
    now: f32,
) {
    let Some(StateId::Attack(kind)) = m.current() else {
        return;
    };
    let Some(spec) = profile.attack(kind) else {
        // Missing configuration degrades to a short whiff instead of a crash.
        warn!("no attack spec for {:?} on '{}'", kind, profile.id);
        m.attack = None;
        action.play("whiff", 0.3);
        return;
    };
    // Aggression compresses the action, raising attack frequency.
    action.play(&spec.action, spec.duration / bb.aggression.max(0.1));
    m.attack = Some(AttackInstance::new(spec));
    combo::register_attack(bb, kind, &profile.combo, now);
}

pub(super) fn update(
    m: &mut StateMachine,
    bb: &mut Blackboard,
    action: &mut ActionPlayer,
    profile: &AiProfile,
    ctx: &StateCtx,
) -> Option<StateId> {
    let Some(inst) = m.attack.as_mut() else {
        // Degraded instance (missing spec): bail back to chase once the
        // whiff finishes.
        return action.finished().then_some(StateId::Chase);
    };
    let Some(spec) = profile.attack(inst.kind) else {
        return Some(StateId::Chase);
    };
    let progress = action.progress();

    // Track the target through the windup, then the swing is committed.
    if progress < inst.window.open {
        if let Some(obs) = ctx.tracked_target(bb) {
            bb.set_facing(obs.pos - ctx.self_pos);
        }
    }

    // Lunging kinds drive forward while the window can still connect.
    bb.steer = if spec.drive_speed > 0.0 && progress <= spec.window_close {
        bb.facing * spec.drive_speed
    } else {
        Vec2::ZERO
    };

    if let Some(point) = inst.decisions.due(progress) {
        if let Some(next) = next_move(bb, profile, ctx, point) {
            inst.queued = Some(next);
            inst.decisions.settle();
        }
    }

    if action.finished() {
        return Some(match inst.queued {
            Some(NextMove::Attack(kind)) => StateId::Attack(kind),
            Some(NextMove::Reposition) => {
                bb.reposition_until = ctx.now + profile.reposition_time;
                StateId::Chase
            }
            Some(NextMove::Pursue) | None => StateId::Chase,
        });
    }
    None
}

pub(super) fn exit(
    m: &mut StateMachine,
    bb: &mut Blackboard,
    _action: &mut ActionPlayer,
    profile: &AiProfile,
    now: f32,
) {
    if let Some(inst) = m.attack.take() {
        if let Some(spec) = profile.attack(inst.kind) {
            let cooldown = spec.cooldown / bb.aggression.max(0.1);
            bb.cooldowns.stamp(inst.kind, now + cooldown);
        }
    }
}

/// The early evaluation only decides with a live target in view; the late
/// one always produces a fallback so the instance never ends undecided.
fn next_move(
    bb: &Blackboard,
    profile: &AiProfile,
    ctx: &StateCtx,
    point: DecisionAt,
) -> Option<NextMove> {
    match ctx.tracked_target(bb) {
        Some(obs) => {
            let distance = obs.pos.distance(ctx.self_pos);
            Some(combo::select_next_attack(bb, profile, distance, ctx.roll, ctx.now))
        }
        None => match point {
            DecisionAt::Early => None,
            DecisionAt::Late => Some(NextMove::Reposition),
        },
    }
}
