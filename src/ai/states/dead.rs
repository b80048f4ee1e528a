//! Dead: terminal. One-shot death action; despawn is handled by the
//! combat cleanup once the linger timer elapses.

use crate::ai::blackboard::Blackboard;
use crate::ai::machine::{StateId, StateMachine};
use crate::ai::profile::AiProfile;
use crate::ai::states::StateCtx;
use crate::anim::ActionPlayer;

pub(super) fn enter(
    _m: &mut StateMachine,
    _bb: &mut Blackboard,
    action: &mut ActionPlayer,
    profile: &AiProfile,
    _now: f32,
) {
    action.play("death", profile.death_linger);
}

pub(super) fn update(
    _m: &mut StateMachine,
    _bb: &mut Blackboard,
    _action: &mut ActionPlayer,
    _profile: &AiProfile,
    _ctx: &StateCtx,
) -> Option<StateId> {
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
