//! Idle: periodic low-frequency target scan, then drift into patrol.

use crate::ai::blackboard::Blackboard;
use crate::ai::combo::{self, NextMove};
use crate::ai::machine::{StateId, StateMachine};
use crate::ai::profile::AiProfile;
use crate::ai::states::StateCtx;
use crate::ai::target;
use crate::anim::ActionPlayer;

pub(super) fn enter(
    m: &mut StateMachine,
    bb: &mut Blackboard,
    action: &mut ActionPlayer,
    _profile: &AiProfile,
    _now: f32,
) {
    action.play_looping("idle", 1.2);
    bb.zone.reset();
    // First scan runs on the first update.
    m.state_timer = 0.0;
}

pub(super) fn update(
    m: &mut StateMachine,
    bb: &mut Blackboard,
    _action: &mut ActionPlayer,
    profile: &AiProfile,
    ctx: &StateCtx,
) -> Option<StateId> {
    m.state_timer -= ctx.dt;
    if m.state_timer <= 0.0 {
        m.state_timer = profile.scan_interval;
        if let Some(obs) = ctx.target.filter(|obs| obs.alive) {
            let distance = obs.pos.distance(ctx.self_pos);
            if distance <= profile.detection_range {
                target::acquire(bb, &obs);
                bb.set_facing(obs.pos - ctx.self_pos);
                // Already in reach: skip the chase and open straight away.
                if distance <= profile.attack_range {
                    if let NextMove::Attack(kind) =
                        combo::select_next_attack(bb, profile, distance, ctx.roll, ctx.now)
                    {
                        if bb.cooldowns.ready(kind, ctx.now) {
                            return Some(StateId::Attack(kind));
                        }
                    }
                }
                return Some(StateId::Chase);
            }
        }
    }
    if m.time_in_state >= profile.idle_linger {
        return Some(StateId::Patrol);
    }
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
