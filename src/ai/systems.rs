//! AI domain: the per-tick systems driving every hostile's state machine.
//!
//! Ordering within the plugin is an explicit chain: liveness sweep, combo
//! decay, state machine update, damage-window resolution, movement
//! application, hit reactions, phase checks.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use rand::Rng;

use crate::ai::blackboard::Blackboard;
use crate::ai::combo;
use crate::ai::machine::{StateId, StateMachine};
use crate::ai::profile::AiProfile;
use crate::ai::states::{self, StateCtx};
use crate::ai::target::{self, DropReason, TargetObs};
use crate::ai::window;
use crate::ai::AiRng;
use crate::anim::ActionPlayer;
use crate::combat::components::{GameLayer, Health, Hostile, Projectile, Telegraph};
use crate::combat::events::{DamageEvent, PhaseChangeEvent};
use crate::combat::projectiles::{self, ProjectilePool, ProjectileSlots};
use crate::player::Player;

/// Tracks the pursuit target's liveness across ticks so the sweep can see
/// alive->dead and dead->alive edges.
#[derive(Resource, Debug)]
pub struct TargetLiveness {
    pub was_alive: bool,
}

impl Default for TargetLiveness {
    fn default() -> Self {
        Self { was_alive: true }
    }
}

/// Edges detected by the liveness sweep this tick.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SweepEdges {
    pub death: bool,
    pub respawn: bool,
}

/// Apply one tick of the liveness sweep to a single entity.
///
/// On target death: drop the reference, reset the chain, and force
/// combat-committed states back to Patrol. On respawn: reset aggression to
/// its base. The old target reference is NOT restored; a fresh detection
/// is required.
pub(crate) fn sweep_blackboard(
    bb: &mut Blackboard,
    machine: &mut StateMachine,
    action: &mut ActionPlayer,
    profile: &AiProfile,
    now: f32,
    snapshot: Option<(Entity, bool)>,
    edges: SweepEdges,
) {
    let mut dropped = false;
    if let Some(tracked) = bb.target {
        match snapshot {
            Some((entity, _)) if entity == tracked => {
                if edges.death {
                    target::clear(bb, DropReason::Died);
                    dropped = true;
                }
            }
            _ => {
                target::clear(bb, DropReason::Despawned);
                dropped = true;
            }
        }
    }
    if dropped {
        bb.combo_count = 0;
        bb.in_combat_mode = false;
        if machine.is_committed() {
            machine.transition_to(StateId::Patrol, bb, action, profile, now);
        }
    }
    if edges.respawn {
        bb.aggression = profile.aggression.base;
    }
}

/// Once-per-tick liveness sweep over all hostiles, run before the FSM drive.
pub(crate) fn sweep_target_liveness(
    time: Res<Time>,
    mut liveness: ResMut<TargetLiveness>,
    players: Query<(Entity, &Health), With<Player>>,
    mut hostiles: Query<
        (
            &mut Blackboard,
            &mut StateMachine,
            &mut ActionPlayer,
            &AiProfile,
        ),
        With<Hostile>,
    >,
) {
    let now = time.elapsed_secs();
    let snapshot = players
        .iter()
        .next()
        .map(|(entity, health)| (entity, !health.is_dead()));
    let alive_now = snapshot.is_some_and(|(_, alive)| alive);
    let edges = SweepEdges {
        death: liveness.was_alive && !alive_now,
        respawn: !liveness.was_alive && alive_now,
    };
    liveness.was_alive = alive_now;

    if edges.death {
        info!("pursuit target died; hostiles stand down");
    }

    for (mut bb, mut machine, mut action, profile) in &mut hostiles {
        sweep_blackboard(
            &mut bb,
            &mut machine,
            &mut action,
            profile,
            now,
            snapshot,
            edges,
        );
    }
}

/// Background combo reset rule, independent of the active state.
pub(crate) fn decay_combos(
    time: Res<Time>,
    mut hostiles: Query<(&mut Blackboard, &AiProfile), With<Hostile>>,
) {
    let now = time.elapsed_secs();
    for (mut bb, profile) in &mut hostiles {
        combo::decay(&mut bb, &profile.combo, now);
    }
}

/// Tick every hostile's state machine: update the active state and execute
/// at most one requested transition, synchronously.
pub(crate) fn drive_state_machines(
    time: Res<Time>,
    mut rng: ResMut<AiRng>,
    players: Query<(Entity, &Transform, &Health), (With<Player>, Without<Hostile>)>,
    mut hostiles: Query<
        (
            Entity,
            &Transform,
            &AiProfile,
            &mut StateMachine,
            &mut Blackboard,
            &mut ActionPlayer,
        ),
        With<Hostile>,
    >,
) {
    let dt = time.delta_secs();
    let now = time.elapsed_secs();

    let obs = players
        .iter()
        .next()
        .map(|(entity, transform, health)| TargetObs {
            entity,
            pos: transform.translation.truncate(),
            alive: !health.is_dead(),
        });

    for (entity, transform, profile, mut machine, mut bb, mut action) in &mut hostiles {
        if machine.retired() {
            continue;
        }
        machine.tick(dt);
        if machine.current().is_none() {
            machine.transition_to(StateId::Idle, &mut bb, &mut action, profile, now);
        }
        let ctx = StateCtx {
            dt,
            now,
            self_pos: transform.translation.truncate(),
            target: obs,
            roll: rng.0.random::<f32>(),
        };
        let Some(current) = machine.current() else {
            continue;
        };
        if let Some(next) = states::on_update(current, &mut machine, &mut bb, &mut action, profile, &ctx)
        {
            debug!("{:?} '{}': {:?} -> {:?}", entity, profile.id, current, next);
            machine.transition_to(next, &mut bb, &mut action, profile, now);
        }
    }
}

/// Run damage-window hit tests for active attacks: melee/pulse overlap
/// queries, projectile launches, and telegraph markers.
pub(crate) fn resolve_damage_windows(
    mut commands: Commands,
    spatial: SpatialQuery,
    mut pool: ResMut<ProjectilePool>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut hostiles: Query<
        (
            Entity,
            &Transform,
            &AiProfile,
            &mut StateMachine,
            &Blackboard,
            &ActionPlayer,
        ),
        (With<Hostile>, Without<Projectile>),
    >,
    mut slots: ProjectileSlots,
    victims: Query<&Transform, (With<Player>, Without<Projectile>, Without<Hostile>)>,
) {
    for (entity, transform, profile, mut machine, bb, action) in &mut hostiles {
        if !matches!(machine.current(), Some(StateId::Attack(_))) {
            continue;
        }
        let progress = action.progress();
        let action_seconds = action.duration;
        let Some(inst) = machine.attack.as_mut() else {
            continue;
        };
        let Some(spec) = profile.attack(inst.kind) else {
            continue;
        };
        let self_pos = transform.translation.truncate();
        let strike_point = if spec.kind.is_pulse() {
            self_pos
        } else {
            self_pos + bb.facing * spec.reach
        };

        // Telegraph the strike zone while the window is still closed.
        if !inst.telegraphed && progress < inst.window.open && !spec.kind.is_projectile() {
            let remaining = (inst.window.open - progress) * action_seconds;
            commands.spawn((
                Telegraph { timer: remaining },
                Sprite {
                    color: Color::srgba(1.0, 0.2, 0.2, 0.25),
                    custom_size: Some(Vec2::splat(spec.radius * 2.0)),
                    ..default()
                },
                Transform::from_xyz(strike_point.x, strike_point.y, 0.5),
            ));
            inst.telegraphed = true;
        }

        if !inst.window.should_test(progress) {
            continue;
        }

        let amount = window::damage_amount(
            spec.base_damage,
            spec.combo_bonus,
            bb.combo_count,
            profile.phase_damage_scale(bb.phase),
        );

        if spec.kind.is_projectile() {
            let Some(projectile) = profile.projectile else {
                // Missing projectile config: the attack whiffs, once.
                warn!("'{}' has no projectile spec; {:?} skipped", profile.id, spec.kind);
                inst.window.record_hit(progress);
                continue;
            };
            projectiles::launch_volley(
                &mut pool,
                &mut slots,
                entity,
                self_pos,
                bb.facing,
                &projectile,
                amount,
                spec.knockback,
            );
            inst.window.record_hit(progress);
        } else {
            let hits = spatial.shape_intersections(
                &Collider::circle(spec.radius),
                strike_point,
                0.0,
                &SpatialQueryFilter::from_mask(GameLayer::Player),
            );
            // Empty result sets are normal: the window stays armed until it
            // closes.
            let Some(&victim) = hits.first() else {
                continue;
            };
            let victim_pos = victims
                .get(victim)
                .map(|t| t.translation.truncate())
                .unwrap_or(strike_point);
            // Knockback points away from the attacker; coincident positions
            // fall back to facing instead of producing a zero vector.
            let dir = (victim_pos - self_pos).try_normalize().unwrap_or(bb.facing);
            damage_events.write(DamageEvent {
                source: entity,
                target: victim,
                amount,
                knockback: dir * spec.knockback,
            });
            inst.window.record_hit(progress);
        }
    }
}

/// Copy steering intent into the physics velocity. Zero steer leaves the
/// velocity to damping so knockback can play out.
pub(crate) fn apply_ai_movement(
    mut hostiles: Query<(&Blackboard, &StateMachine, &mut LinearVelocity), With<Hostile>>,
) {
    for (bb, machine, mut velocity) in &mut hostiles {
        if machine.retired() {
            velocity.0 = Vec2::ZERO;
            continue;
        }
        if bb.steer != Vec2::ZERO {
            velocity.0 = bb.steer;
        }
    }
}

/// React to landed hits: flag the blackboard, dock the combo, enter Hurt.
pub(crate) fn react_to_damage(
    time: Res<Time>,
    mut damage_events: MessageReader<DamageEvent>,
    mut hostiles: Query<
        (
            &mut Blackboard,
            &mut StateMachine,
            &mut ActionPlayer,
            &AiProfile,
            &Health,
        ),
        With<Hostile>,
    >,
) {
    let now = time.elapsed_secs();
    for event in damage_events.read() {
        let Ok((mut bb, mut machine, mut action, profile, health)) =
            hostiles.get_mut(event.target)
        else {
            continue;
        };
        let already_reeling = bb.is_hit && machine.is(StateId::Hurt);
        bb.is_hit = true;
        combo::apply_hit_penalty(&mut bb, &profile.combo);
        if health.is_dead() || machine.retired() {
            continue;
        }
        // Stagger does not stack: a second hit in the same recovery window
        // still docks the combo but does not restart the lockout.
        if already_reeling {
            continue;
        }
        machine.transition_to(StateId::Hurt, &mut bb, &mut action, profile, now);
    }
}

/// Elite phase thresholds: crossing one bumps the phase and aggression.
pub(crate) fn check_boss_phases(
    mut phase_events: MessageWriter<PhaseChangeEvent>,
    mut hostiles: Query<(Entity, &Health, &AiProfile, &mut Blackboard), With<Hostile>>,
) {
    for (entity, health, profile, mut bb) in &mut hostiles {
        if profile.phases.is_empty() || health.is_dead() {
            continue;
        }
        let expected = profile.expected_phase(health.percent());
        if expected > bb.phase {
            bb.phase = expected;
            let spec = &profile.phases[expected as usize - 2];
            bb.aggression = (bb.aggression + spec.aggression_bonus).min(profile.aggression.max);
            info!("'{}' enters phase {}", profile.id, expected);
            phase_events.write(PhaseChangeEvent {
                elite: entity,
                phase: expected,
            });
        }
    }
}
