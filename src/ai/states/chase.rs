//! Chase: steer toward the target and pick the engagement tactic.
//!
//! Each tick classifies the distance into a tactical zone, maintains dwell
//! bookkeeping, and asks the archetype's engagement rules whether to commit
//! to an attack, hold position, or keep closing. Losing sight runs a bounded
//! persistent pursuit of the last known position before giving up.

use bevy::prelude::Vec2;

use crate::ai::blackboard::Blackboard;
use crate::ai::combo::{self, NextMove};
use crate::ai::machine::{StateId, StateMachine};
use crate::ai::profile::{AiProfile, Role};
use crate::ai::states::StateCtx;
use crate::ai::target::{self, DropReason};
use crate::ai::zones::{self, TacticalZone};
use crate::anim::ActionPlayer;

/// How close counts as having reached the last known position.
const ARRIVAL_EPSILON: f32 = 8.0;

/// Outcome of the engagement rules for one tick.
enum Engagement {
    /// Nothing to do; keep closing on the target.
    Close,
    /// Stay put (firing cadence, waiting on a cooldown).
    Hold,
    Transition(StateId),
}

pub(super) fn enter(
    _m: &mut StateMachine,
    bb: &mut Blackboard,
    action: &mut ActionPlayer,
    _profile: &AiProfile,
    _now: f32,
) {
    action.play_looping("run", 0.6);
    // Re-entering chase starts dwell bookkeeping fresh.
    bb.zone.reset();
    bb.lost_sight_at = None;
}

pub(super) fn update(
    m: &mut StateMachine,
    bb: &mut Blackboard,
    _action: &mut ActionPlayer,
    profile: &AiProfile,
    ctx: &StateCtx,
) -> Option<StateId> {
    if bb.target.is_none() {
        return Some(StateId::Patrol);
    }

    let leash = profile.detection_range * profile.leash_factor;
    let visible = ctx
        .tracked_target(bb)
        .filter(|obs| obs.pos.distance(ctx.self_pos) <= leash);

    let Some(obs) = visible else {
        return pursue_last_known(bb, profile, ctx);
    };

    bb.last_known_pos = Some(obs.pos);
    bb.lost_sight_at = None;
    bb.set_facing(obs.pos - ctx.self_pos);

    let distance = obs.pos.distance(ctx.self_pos);
    let zone = zones::classify(distance, &profile.zones);
    bb.zone.observe(zone, ctx.now);

    // Disengaged: back straight off until the timer runs out.
    if ctx.now < bb.reposition_until {
        let away = bb.direction_to(obs.pos, ctx.self_pos);
        bb.steer = away * profile.chase_speed;
        return None;
    }

    match engagement(m, bb, profile, ctx, distance, zone) {
        Engagement::Transition(next) => Some(next),
        Engagement::Hold => {
            bb.steer = Vec2::ZERO;
            None
        }
        Engagement::Close => {
            let dir = bb.direction_to(ctx.self_pos, obs.pos);
            bb.steer = dir * profile.chase_speed;
            None
        }
    }
}

pub(super) fn exit(
    _m: &mut StateMachine,
    _bb: &mut Blackboard,
    _action: &mut ActionPlayer,
    _profile: &AiProfile,
    _now: f32,
) {
}

/// Bounded pursuit of the last known position after visibility loss.
fn pursue_last_known(
    bb: &mut Blackboard,
    profile: &AiProfile,
    ctx: &StateCtx,
) -> Option<StateId> {
    let lost_at = *bb.lost_sight_at.get_or_insert(ctx.now);
    if ctx.now - lost_at <= profile.persistent_chase_time {
        if let Some(last_known) = bb.last_known_pos {
            if last_known.distance(ctx.self_pos) > ARRIVAL_EPSILON {
                let dir = bb.direction_to(ctx.self_pos, last_known);
                bb.set_facing(dir);
                bb.steer = dir * profile.chase_speed;
                return None;
            }
        }
    }
    target::clear(bb, DropReason::Evaded);
    Some(StateId::Patrol)
}

fn engagement(
    _m: &mut StateMachine,
    bb: &mut Blackboard,
    profile: &AiProfile,
    ctx: &StateCtx,
    distance: f32,
    zone: TacticalZone,
) -> Engagement {
    match profile.role {
        Role::Brute | Role::Creeper => melee_engagement(bb, profile, ctx, distance, zone),
        Role::Hexer | Role::Skirmisher => ranged_engagement(bb, profile, ctx, distance, zone),
        Role::Elite => elite_engagement(bb, profile, ctx, distance, zone),
    }
}

/// Commit to the chain when inside the inner band; otherwise keep closing.
fn melee_engagement(
    bb: &mut Blackboard,
    profile: &AiProfile,
    ctx: &StateCtx,
    distance: f32,
    zone: TacticalZone,
) -> Engagement {
    if zone != TacticalZone::Inner {
        return Engagement::Close;
    }
    match combo::select_next_attack(bb, profile, distance, ctx.roll, ctx.now) {
        NextMove::Attack(kind) => {
            if bb.cooldowns.ready(kind, ctx.now) {
                Engagement::Transition(StateId::Attack(kind))
            } else {
                Engagement::Hold
            }
        }
        NextMove::Reposition => {
            bb.reposition_until = ctx.now + profile.reposition_time;
            Engagement::Close
        }
        NextMove::Pursue => Engagement::Close,
    }
}

/// Fire from the mid band, back off when the target crowds in.
fn ranged_engagement(
    bb: &mut Blackboard,
    profile: &AiProfile,
    ctx: &StateCtx,
    distance: f32,
    zone: TacticalZone,
) -> Engagement {
    match zone {
        TacticalZone::Inner => {
            bb.reposition_until = ctx.now + profile.reposition_time;
            Engagement::Close
        }
        TacticalZone::Mid => {
            match combo::select_next_attack(bb, profile, distance, ctx.roll, ctx.now) {
                NextMove::Attack(kind) if bb.cooldowns.ready(kind, ctx.now) => {
                    Engagement::Transition(StateId::Attack(kind))
                }
                // Keep the range while waiting out cooldown or a failed gate.
                _ => Engagement::Hold,
            }
        }
        TacticalZone::Outer | TacticalZone::OutOfRange => Engagement::Close,
    }
}

/// Four-zone boss tactics: suppress from outer, rush after sustained
/// mid-band dwell, melee inside with a chase-timeout disengage.
fn elite_engagement(
    bb: &mut Blackboard,
    profile: &AiProfile,
    ctx: &StateCtx,
    distance: f32,
    zone: TacticalZone,
) -> Engagement {
    match zone {
        TacticalZone::OutOfRange => Engagement::Close,
        TacticalZone::Outer => {
            if let Some(kind) = profile.suppress_attack {
                if bb.cooldowns.ready(kind, ctx.now) {
                    return Engagement::Transition(StateId::Attack(kind));
                }
            }
            Engagement::Close
        }
        TacticalZone::Mid => {
            if bb.zone.band_dwell(ctx.now) >= profile.dwell_before_rush {
                if let NextMove::Attack(kind) =
                    combo::select_next_attack(bb, profile, distance, ctx.roll, ctx.now)
                {
                    if bb.cooldowns.ready(kind, ctx.now) {
                        return Engagement::Transition(StateId::Attack(kind));
                    }
                }
            }
            Engagement::Close
        }
        TacticalZone::Inner => {
            // Endless melee pursuit is not allowed: break off and resume
            // suppression from range.
            if bb.zone.dwell(ctx.now) >= profile.melee_chase_limit {
                bb.reposition_until = ctx.now + profile.reposition_time;
                return Engagement::Close;
            }
            melee_engagement(bb, profile, ctx, distance, zone)
        }
    }
}
