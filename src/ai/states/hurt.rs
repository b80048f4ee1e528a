//! Hurt: decision lockout while recovering from a hit.

use crate::ai::blackboard::Blackboard;
use crate::ai::combo;
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
    // Higher aggression shakes the hit off faster.
    let recovery = profile.hurt_recovery / bb.aggression.max(0.1);
    m.state_timer = recovery;
    action.play("hurt", recovery);
}

pub(super) fn update(
    m: &mut StateMachine,
    bb: &mut Blackboard,
    _action: &mut ActionPlayer,
    _profile: &AiProfile,
    ctx: &StateCtx,
) -> Option<StateId> {
    m.state_timer -= ctx.dt;
    if m.state_timer > 0.0 {
        return None;
    }
    if target::is_valid(bb, ctx.target.as_ref()) {
        Some(StateId::Chase)
    } else {
        Some(StateId::Patrol)
    }
}

pub(super) fn exit(
    _m: &mut StateMachine,
    bb: &mut Blackboard,
    _action: &mut ActionPlayer,
    profile: &AiProfile,
    _now: f32,
) {
    bb.is_hit = false;
    combo::boost_aggression(bb, &profile.aggression);
}
