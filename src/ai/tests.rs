//! AI domain: unit tests for the decision layer and state machine contract.

use bevy::prelude::{Entity, Vec2, World};

use super::blackboard::Blackboard;
use super::combo::{self, NextMove};
use super::machine::{StateId, StateMachine};
use super::profile::{AiProfile, AttackKind};
use super::states::{self, StateCtx};
use super::systems::{sweep_blackboard, SweepEdges};
use super::target::{self, DropReason, TargetObs};
use super::window::{damage_amount, DamageWindow, DecisionAt, DecisionPoints};
use super::zones::{self, TacticalZone, ZoneThresholds, ZoneTracker};
use crate::anim::ActionPlayer;

fn fresh(profile: &AiProfile) -> (Blackboard, StateMachine, ActionPlayer) {
    (
        Blackboard::new(Vec2::ZERO, profile.aggression.base),
        StateMachine::default(),
        ActionPlayer::default(),
    )
}

fn ctx_at(now: f32, target: Option<TargetObs>) -> StateCtx {
    StateCtx {
        dt: 0.1,
        now,
        self_pos: Vec2::ZERO,
        target,
        roll: 0.0,
    }
}

fn mint_entity() -> Entity {
    let mut world = World::new();
    world.spawn_empty().id()
}

// -----------------------------------------------------------------------------
// Zone classifier
// -----------------------------------------------------------------------------

const ZONES: ZoneThresholds = ZoneThresholds {
    inner: 50.0,
    mid: 160.0,
    outer: 340.0,
};

#[test]
fn test_classify_selects_innermost_band() {
    assert_eq!(zones::classify(10.0, &ZONES), TacticalZone::Inner);
    assert_eq!(zones::classify(100.0, &ZONES), TacticalZone::Mid);
    assert_eq!(zones::classify(300.0, &ZONES), TacticalZone::Outer);
    assert_eq!(zones::classify(500.0, &ZONES), TacticalZone::OutOfRange);
}

#[test]
fn test_classify_boundaries_prefer_aggressive_zone() {
    assert_eq!(zones::classify(50.0, &ZONES), TacticalZone::Inner);
    assert_eq!(zones::classify(160.0, &ZONES), TacticalZone::Mid);
    assert_eq!(zones::classify(340.0, &ZONES), TacticalZone::Outer);
}

#[test]
fn test_classify_is_pure_and_monotonic() {
    let mut previous = TacticalZone::Inner;
    for step in 0..400 {
        let distance = step as f32;
        let zone = zones::classify(distance, &ZONES);
        // Pure: same input, same output.
        assert_eq!(zone, zones::classify(distance, &ZONES));
        // Monotonic: increasing distance never moves the zone inward.
        assert!(zone >= previous);
        previous = zone;
    }
}

#[test]
fn test_zone_tracker_stamps_entry_on_change_only() {
    let mut tracker = ZoneTracker::default();
    tracker.observe(TacticalZone::Outer, 1.0);
    tracker.observe(TacticalZone::Outer, 3.0);
    assert_eq!(tracker.dwell(4.0), 3.0);

    tracker.observe(TacticalZone::Mid, 5.0);
    assert_eq!(tracker.dwell(6.0), 1.0);
    // Outer -> Mid keeps the combined band timestamp.
    assert_eq!(tracker.band_dwell(6.0), 5.0);

    tracker.observe(TacticalZone::Inner, 7.0);
    assert_eq!(tracker.band_dwell(7.0), 0.0);
}

// -----------------------------------------------------------------------------
// Combo tracker
// -----------------------------------------------------------------------------

#[test]
fn test_combo_count_clamped_at_max() {
    let profile = AiProfile::brute();
    let (mut bb, _, _) = fresh(&profile);

    for i in 0..profile.combo.max_count + 3 {
        combo::register_attack(&mut bb, AttackKind::Strike, &profile.combo, i as f32 * 0.2);
    }
    assert_eq!(bb.combo_count, profile.combo.max_count);
    assert!(!combo::can_chain(&bb, &profile.combo, 1.1));
}

#[test]
fn test_can_chain_requires_open_window() {
    let profile = AiProfile::brute();
    let (mut bb, _, _) = fresh(&profile);

    combo::register_attack(&mut bb, AttackKind::Strike, &profile.combo, 10.0);
    assert!(combo::can_chain(&bb, &profile.combo, 10.0 + profile.combo.chain_window - 0.1));
    assert!(!combo::can_chain(&bb, &profile.combo, 10.0 + profile.combo.chain_window));
}

#[test]
fn test_combo_resets_after_pause() {
    let profile = AiProfile::brute();
    let (mut bb, _, _) = fresh(&profile);
    assert_eq!(profile.combo.reset_time, 2.0);

    combo::register_attack(&mut bb, AttackKind::Strike, &profile.combo, 5.0);
    combo::decay(&mut bb, &profile.combo, 6.9);
    assert_eq!(bb.combo_count, 1);
    assert!(bb.in_combat_mode);

    // 2.1 seconds of silence loses the beat.
    combo::decay(&mut bb, &profile.combo, 7.1);
    assert_eq!(bb.combo_count, 0);
    assert!(!bb.in_combat_mode);
}

#[test]
fn test_hit_penalty_clamps_at_zero() {
    let profile = AiProfile::brute();
    let (mut bb, _, _) = fresh(&profile);
    assert_eq!(profile.combo.hit_penalty, 2);

    bb.combo_count = 3;
    combo::apply_hit_penalty(&mut bb, &profile.combo);
    assert_eq!(bb.combo_count, 1);
    combo::apply_hit_penalty(&mut bb, &profile.combo);
    assert_eq!(bb.combo_count, 0);
}

#[test]
fn test_aggression_boost_is_bounded() {
    let profile = AiProfile::brute();
    let (mut bb, _, _) = fresh(&profile);

    for _ in 0..100 {
        combo::boost_aggression(&mut bb, &profile.aggression);
    }
    assert_eq!(bb.aggression, profile.aggression.max);
}

#[test]
fn test_first_attack_is_baseline() {
    let profile = AiProfile::brute();
    let (bb, _, _) = fresh(&profile);

    let next = combo::select_next_attack(&bb, &profile, 20.0, 0.99, 0.0);
    assert_eq!(next, NextMove::Attack(AttackKind::Strike));
}

#[test]
fn test_chain_escalates_or_disengages_by_roll() {
    let profile = AiProfile::brute();
    let (mut bb, _, _) = fresh(&profile);
    combo::register_attack(&mut bb, AttackKind::Strike, &profile.combo, 10.0);

    // chance 0.65 * slam chain_scale 0.7 = 0.455
    let escalate = combo::select_next_attack(&bb, &profile, 20.0, 0.4, 10.2);
    assert_eq!(escalate, NextMove::Attack(AttackKind::Slam));

    let disengage = combo::select_next_attack(&bb, &profile, 20.0, 0.5, 10.2);
    assert_eq!(disengage, NextMove::Reposition);
}

#[test]
fn test_exhausted_chain_disengages() {
    let profile = AiProfile::brute();
    let (mut bb, _, _) = fresh(&profile);
    bb.combo_count = profile.combo.max_count;
    bb.last_attack_time = 10.0;

    let next = combo::select_next_attack(&bb, &profile, 20.0, 0.0, 10.1);
    assert_eq!(next, NextMove::Reposition);
}

#[test]
fn test_secondary_range_selects_rush_over_melee() {
    // The spec scenario: distance 3 with attack range 2.5 and dash range 6
    // must pick the closing dash, never melee.
    let mut profile = AiProfile::elite();
    profile.attack_range = 2.5;
    profile.secondary_range = 6.0;
    profile.closing_chance = 1.0;
    let (bb, _, _) = fresh(&profile);

    let next = combo::select_next_attack(&bb, &profile, 3.0, 0.5, 0.0);
    assert_eq!(next, NextMove::Attack(AttackKind::Rush));
}

#[test]
fn test_crowded_ranged_archetype_backs_off() {
    let profile = AiProfile::hexer();
    let (bb, _, _) = fresh(&profile);

    let next = combo::select_next_attack(&bb, &profile, 10.0, 0.0, 0.0);
    assert_eq!(next, NextMove::Reposition);
}

#[test]
fn test_beyond_secondary_range_pursues() {
    let profile = AiProfile::brute();
    let (bb, _, _) = fresh(&profile);

    let next = combo::select_next_attack(&bb, &profile, 500.0, 0.0, 0.0);
    assert_eq!(next, NextMove::Pursue);
}

// -----------------------------------------------------------------------------
// Damage window and decision points
// -----------------------------------------------------------------------------

#[test]
fn test_window_applies_at_most_once() {
    let mut window = DamageWindow::single(0.3, 0.6);
    assert!(!window.should_test(0.2));
    assert!(window.should_test(0.35));

    window.record_hit(0.35);
    // The target stays inside the window every tick; the latch holds anyway.
    for step in 0..30 {
        let progress = 0.35 + step as f32 * 0.01;
        assert!(!window.should_test(progress));
    }
    assert!(window.spent());
}

#[test]
fn test_window_closes_after_interval() {
    let window = DamageWindow::single(0.3, 0.6);
    assert!(!window.should_test(0.7));
    assert!(!window.should_test(1.0));
}

#[test]
fn test_multi_hit_window_spaces_pulses() {
    let mut window = DamageWindow::multi(0.2, 0.9, 3, 0.2);

    assert!(window.should_test(0.2));
    window.record_hit(0.2);
    assert!(!window.should_test(0.3));
    assert!(window.should_test(0.4));
    window.record_hit(0.4);
    window.record_hit(0.6);
    assert_eq!(window.hits_dealt(), 3);
    assert!(window.spent());
    assert!(!window.should_test(0.85));
}

#[test]
fn test_decision_points_first_decision_wins() {
    let mut points = DecisionPoints::new(0.6, 0.9);
    assert_eq!(points.due(0.5), None);
    assert_eq!(points.due(0.65), Some(DecisionAt::Early));

    points.settle();
    assert_eq!(points.due(0.95), None);
}

#[test]
fn test_decision_points_late_fires_when_early_produced_nothing() {
    let mut points = DecisionPoints::new(0.6, 0.9);
    // Early evaluation came up empty: no settle.
    assert_eq!(points.due(0.7), Some(DecisionAt::Early));
    assert_eq!(points.due(0.95), Some(DecisionAt::Late));
    points.settle();
    assert_eq!(points.due(0.99), None);
}

#[test]
fn test_damage_formula_floors_bonus_and_clamps_min() {
    assert_eq!(damage_amount(8.0, 1.5, 3, 1.0), 12.0); // 8 + floor(4.5)
    assert_eq!(damage_amount(0.0, 0.0, 0, 1.0), 1.0);
    assert_eq!(damage_amount(8.0, 2.0, 2, 1.35), (8.0 + 4.0) * 1.35);
}

// -----------------------------------------------------------------------------
// Elite phases
// -----------------------------------------------------------------------------

#[test]
fn test_phase_thresholds_apply_in_descending_order() {
    let profile = AiProfile::elite();
    assert_eq!(profile.expected_phase(1.0), 1);
    assert_eq!(profile.expected_phase(0.61), 1);
    assert_eq!(profile.expected_phase(0.6), 2);
    assert_eq!(profile.expected_phase(0.3), 2);
    assert_eq!(profile.expected_phase(0.25), 3);
    assert_eq!(profile.expected_phase(0.01), 3);
}

#[test]
fn test_phase_damage_scale_tracks_configuration() {
    let profile = AiProfile::elite();
    assert_eq!(profile.phase_damage_scale(1), 1.0);
    assert_eq!(profile.phase_damage_scale(2), 1.15);
    assert_eq!(profile.phase_damage_scale(3), 1.35);
    // Phases beyond the configuration fall back to neutral.
    assert_eq!(profile.phase_damage_scale(7), 1.0);

    let brute = AiProfile::brute();
    assert_eq!(brute.expected_phase(0.1), 1);
    assert_eq!(brute.phase_damage_scale(2), 1.0);
}

// -----------------------------------------------------------------------------
// State machine contract
// -----------------------------------------------------------------------------

#[test]
fn test_initial_state_is_idle() {
    let profile = AiProfile::brute();
    let (mut bb, mut machine, mut action) = fresh(&profile);
    assert_eq!(machine.current(), None);

    machine.transition_to(StateId::Idle, &mut bb, &mut action, &profile, 0.0);
    assert_eq!(machine.current(), Some(StateId::Idle));
}

#[test]
fn test_same_state_reentry_runs_full_cycle() {
    let profile = AiProfile::brute();
    let (mut bb, mut machine, mut action) = fresh(&profile);
    machine.transition_to(StateId::Idle, &mut bb, &mut action, &profile, 0.0);

    machine.tick(5.0);
    machine.state_timer = 3.0;
    bb.steer = Vec2::new(10.0, 0.0);
    let instance_before = machine.instance;

    machine.transition_to(StateId::Idle, &mut bb, &mut action, &profile, 5.0);
    // Exactly one exit/enter pair ran and observable state reset.
    assert_eq!(machine.instance, instance_before + 1);
    assert_eq!(machine.time_in_state, 0.0);
    assert_eq!(machine.state_timer, 0.0);
    assert_eq!(bb.steer, Vec2::ZERO);
}

#[test]
fn test_dead_is_terminal() {
    let profile = AiProfile::brute();
    let (mut bb, mut machine, mut action) = fresh(&profile);
    machine.transition_to(StateId::Idle, &mut bb, &mut action, &profile, 0.0);
    machine.transition_to(StateId::Dead, &mut bb, &mut action, &profile, 1.0);
    assert!(machine.retired());

    machine.transition_to(StateId::Chase, &mut bb, &mut action, &profile, 2.0);
    assert_eq!(machine.current(), Some(StateId::Dead));
}

#[test]
fn test_attack_enter_registers_combo_and_arms_window() {
    let profile = AiProfile::brute();
    let (mut bb, mut machine, mut action) = fresh(&profile);

    machine.transition_to(StateId::Attack(AttackKind::Strike), &mut bb, &mut action, &profile, 3.0);
    assert_eq!(bb.combo_count, 1);
    assert_eq!(bb.last_attack_time, 3.0);
    assert_eq!(bb.last_attack_kind, Some(AttackKind::Strike));
    assert!(bb.in_combat_mode);

    let inst = machine.attack.as_ref().expect("attack instance armed");
    assert_eq!(inst.kind, AttackKind::Strike);
    assert_eq!(inst.window.hits_dealt(), 0);
    assert_eq!(action.action, "strike");
}

#[test]
fn test_attack_exit_stamps_cooldown() {
    let profile = AiProfile::brute();
    let (mut bb, mut machine, mut action) = fresh(&profile);

    machine.transition_to(StateId::Attack(AttackKind::Strike), &mut bb, &mut action, &profile, 3.0);
    machine.transition_to(StateId::Chase, &mut bb, &mut action, &profile, 3.5);

    assert!(machine.attack.is_none());
    assert!(!bb.cooldowns.ready(AttackKind::Strike, 3.6));
    assert!(bb.cooldowns.ready(AttackKind::Strike, 3.5 + 0.9));
}

#[test]
fn test_attack_reentry_rearms_damage_window() {
    let profile = AiProfile::brute();
    let (mut bb, mut machine, mut action) = fresh(&profile);

    machine.transition_to(StateId::Attack(AttackKind::Strike), &mut bb, &mut action, &profile, 0.0);
    if let Some(inst) = machine.attack.as_mut() {
        inst.window.record_hit(0.4);
        assert!(inst.window.spent());
    }

    // Chaining into the same attack is a fresh instance with a fresh window.
    machine.transition_to(StateId::Attack(AttackKind::Strike), &mut bb, &mut action, &profile, 0.5);
    let inst = machine.attack.as_ref().expect("rearmed instance");
    assert_eq!(inst.window.hits_dealt(), 0);
    assert!(!inst.window.spent());
}

#[test]
fn test_hurt_exit_boosts_aggression() {
    let profile = AiProfile::brute();
    let (mut bb, mut machine, mut action) = fresh(&profile);
    bb.is_hit = true;

    machine.transition_to(StateId::Hurt, &mut bb, &mut action, &profile, 0.0);
    machine.transition_to(StateId::Patrol, &mut bb, &mut action, &profile, 1.0);

    assert!(!bb.is_hit);
    assert_eq!(bb.aggression, profile.aggression.base + profile.aggression.step);
}

// -----------------------------------------------------------------------------
// Target validity
// -----------------------------------------------------------------------------

#[test]
fn test_is_valid_cases() {
    let profile = AiProfile::brute();
    let (mut bb, _, _) = fresh(&profile);
    let entity = mint_entity();
    let obs = TargetObs {
        entity,
        pos: Vec2::new(10.0, 0.0),
        alive: true,
    };

    assert!(!target::is_valid(&bb, Some(&obs)));

    bb.target = Some(entity);
    assert!(target::is_valid(&bb, Some(&obs)));
    assert!(!target::is_valid(&bb, None));

    let dead = TargetObs { alive: false, ..obs };
    assert!(!target::is_valid(&bb, Some(&dead)));
}

#[test]
fn test_clear_drops_cached_position() {
    let profile = AiProfile::brute();
    let (mut bb, _, _) = fresh(&profile);
    bb.target = Some(mint_entity());
    bb.last_known_pos = Some(Vec2::new(5.0, 5.0));

    target::clear(&mut bb, DropReason::Evaded);
    assert!(bb.target.is_none());
    assert!(bb.last_known_pos.is_none());
}

#[test]
fn test_target_death_round_trip() {
    let profile = AiProfile::brute();
    let (mut bb, mut machine, mut action) = fresh(&profile);
    let entity = mint_entity();

    machine.transition_to(StateId::Chase, &mut bb, &mut action, &profile, 0.0);
    bb.target = Some(entity);
    bb.combo_count = 2;
    bb.in_combat_mode = true;

    // Death edge: target dropped, combo reset, combat stands down.
    sweep_blackboard(
        &mut bb,
        &mut machine,
        &mut action,
        &profile,
        1.0,
        Some((entity, false)),
        SweepEdges {
            death: true,
            respawn: false,
        },
    );
    assert!(bb.target.is_none());
    assert_eq!(bb.combo_count, 0);
    assert!(!bb.in_combat_mode);
    assert_eq!(machine.current(), Some(StateId::Patrol));

    // Respawn edge: aggression resets, the old reference is NOT restored.
    bb.aggression = 1.5;
    sweep_blackboard(
        &mut bb,
        &mut machine,
        &mut action,
        &profile,
        2.0,
        Some((entity, true)),
        SweepEdges {
            death: false,
            respawn: true,
        },
    );
    assert!(bb.target.is_none());
    assert_eq!(bb.aggression, profile.aggression.base);
}

#[test]
fn test_despawned_target_is_dropped() {
    let profile = AiProfile::brute();
    let (mut bb, mut machine, mut action) = fresh(&profile);
    machine.transition_to(StateId::Chase, &mut bb, &mut action, &profile, 0.0);
    bb.target = Some(mint_entity());

    sweep_blackboard(
        &mut bb,
        &mut machine,
        &mut action,
        &profile,
        1.0,
        None,
        SweepEdges::default(),
    );
    assert!(bb.target.is_none());
    assert_eq!(machine.current(), Some(StateId::Patrol));
}

// -----------------------------------------------------------------------------
// Degenerate geometry
// -----------------------------------------------------------------------------

#[test]
fn test_zero_distance_direction_falls_back_to_facing() {
    let profile = AiProfile::brute();
    let (mut bb, _, _) = fresh(&profile);
    bb.facing = Vec2::new(0.0, -1.0);

    let dir = bb.direction_to(Vec2::new(3.0, 3.0), Vec2::new(3.0, 3.0));
    assert_eq!(dir, Vec2::new(0.0, -1.0));
    assert!(dir.is_finite());

    // Facing itself refuses degenerate input.
    bb.set_facing(Vec2::ZERO);
    assert_eq!(bb.facing, Vec2::new(0.0, -1.0));
}

// -----------------------------------------------------------------------------
// State bodies
// -----------------------------------------------------------------------------

#[test]
fn test_idle_detection_enters_chase() {
    let profile = AiProfile::brute();
    let (mut bb, mut machine, mut action) = fresh(&profile);
    machine.transition_to(StateId::Idle, &mut bb, &mut action, &profile, 0.0);

    let obs = TargetObs {
        entity: mint_entity(),
        pos: Vec2::new(100.0, 0.0),
        alive: true,
    };
    let next = states::on_update(
        StateId::Idle,
        &mut machine,
        &mut bb,
        &mut action,
        &profile,
        &ctx_at(0.1, Some(obs)),
    );
    assert_eq!(next, Some(StateId::Chase));
    assert_eq!(bb.target, Some(obs.entity));
    assert_eq!(bb.last_known_pos, Some(obs.pos));
}

#[test]
fn test_idle_ignores_out_of_range_target() {
    let profile = AiProfile::brute();
    let (mut bb, mut machine, mut action) = fresh(&profile);
    machine.transition_to(StateId::Idle, &mut bb, &mut action, &profile, 0.0);

    let obs = TargetObs {
        entity: mint_entity(),
        pos: Vec2::new(1000.0, 0.0),
        alive: true,
    };
    let next = states::on_update(
        StateId::Idle,
        &mut machine,
        &mut bb,
        &mut action,
        &profile,
        &ctx_at(0.1, Some(obs)),
    );
    assert_eq!(next, None);
    assert!(bb.target.is_none());
}

#[test]
fn test_chase_gives_up_after_persistent_window() {
    let profile = AiProfile::brute();
    let (mut bb, mut machine, mut action) = fresh(&profile);
    let entity = mint_entity();
    machine.transition_to(StateId::Chase, &mut bb, &mut action, &profile, 0.0);
    bb.target = Some(entity);
    bb.last_known_pos = Some(Vec2::new(50.0, 0.0));

    // Target far outside the leash: pursuit of the last known spot begins.
    let far = TargetObs {
        entity,
        pos: Vec2::new(5000.0, 0.0),
        alive: true,
    };
    let next = states::on_update(
        StateId::Chase,
        &mut machine,
        &mut bb,
        &mut action,
        &profile,
        &ctx_at(1.0, Some(far)),
    );
    assert_eq!(next, None);
    assert!(bb.steer.x > 0.0);

    // Past the persistent-chase window the target is dropped.
    let next = states::on_update(
        StateId::Chase,
        &mut machine,
        &mut bb,
        &mut action,
        &profile,
        &ctx_at(1.0 + profile.persistent_chase_time + 0.1, Some(far)),
    );
    assert_eq!(next, Some(StateId::Patrol));
    assert!(bb.target.is_none());
}

#[test]
fn test_elite_rushes_after_band_dwell() {
    let profile = AiProfile::elite();
    let (mut bb, mut machine, mut action) = fresh(&profile);
    let entity = mint_entity();
    machine.transition_to(StateId::Chase, &mut bb, &mut action, &profile, 0.0);
    bb.target = Some(entity);

    // Mid zone (inner 50 < 100 <= mid 160), roll passes the closing gate.
    let obs = TargetObs {
        entity,
        pos: Vec2::new(100.0, 0.0),
        alive: true,
    };

    // Dwell not yet reached: keep closing.
    let next = states::on_update(
        StateId::Chase,
        &mut machine,
        &mut bb,
        &mut action,
        &profile,
        &ctx_at(0.0, Some(obs)),
    );
    assert_eq!(next, None);

    // After 3+ continuous seconds in the band the rush fires.
    let next = states::on_update(
        StateId::Chase,
        &mut machine,
        &mut bb,
        &mut action,
        &profile,
        &ctx_at(profile.dwell_before_rush + 0.2, Some(obs)),
    );
    assert_eq!(next, Some(StateId::Attack(AttackKind::Rush)));
}

#[test]
fn test_elite_melee_timeout_forces_disengage() {
    let profile = AiProfile::elite();
    let (mut bb, mut machine, mut action) = fresh(&profile);
    let entity = mint_entity();
    machine.transition_to(StateId::Chase, &mut bb, &mut action, &profile, 0.0);
    bb.target = Some(entity);
    // Melee on cooldown so pursuit continues instead of attacking.
    bb.cooldowns.stamp(AttackKind::Strike, f32::INFINITY);
    bb.cooldowns.stamp(AttackKind::Slam, f32::INFINITY);

    let obs = TargetObs {
        entity,
        pos: Vec2::new(30.0, 0.0),
        alive: true,
    };
    let next = states::on_update(
        StateId::Chase,
        &mut machine,
        &mut bb,
        &mut action,
        &profile,
        &ctx_at(0.0, Some(obs)),
    );
    assert_eq!(next, None);

    let after_limit = profile.melee_chase_limit + 0.1;
    let next = states::on_update(
        StateId::Chase,
        &mut machine,
        &mut bb,
        &mut action,
        &profile,
        &ctx_at(after_limit, Some(obs)),
    );
    assert_eq!(next, None);
    assert!(bb.reposition_until > after_limit);

    // While repositioning the elite backs away from the target.
    let next = states::on_update(
        StateId::Chase,
        &mut machine,
        &mut bb,
        &mut action,
        &profile,
        &ctx_at(after_limit + 0.1, Some(obs)),
    );
    assert_eq!(next, None);
    assert!(bb.steer.x < 0.0);
}

#[test]
fn test_hurt_recovers_to_patrol_without_target() {
    let profile = AiProfile::brute();
    let (mut bb, mut machine, mut action) = fresh(&profile);
    machine.transition_to(StateId::Hurt, &mut bb, &mut action, &profile, 0.0);

    let mut ctx = ctx_at(0.0, None);
    ctx.dt = profile.hurt_recovery + 0.1;
    let next = states::on_update(StateId::Hurt, &mut machine, &mut bb, &mut action, &profile, &ctx);
    assert_eq!(next, Some(StateId::Patrol));
}

#[test]
fn test_hurt_reengages_valid_target() {
    let profile = AiProfile::brute();
    let (mut bb, mut machine, mut action) = fresh(&profile);
    let entity = mint_entity();
    bb.target = Some(entity);
    machine.transition_to(StateId::Hurt, &mut bb, &mut action, &profile, 0.0);

    let obs = TargetObs {
        entity,
        pos: Vec2::new(60.0, 0.0),
        alive: true,
    };
    let mut ctx = ctx_at(0.0, Some(obs));
    ctx.dt = profile.hurt_recovery + 0.1;
    let next = states::on_update(StateId::Hurt, &mut machine, &mut bb, &mut action, &profile, &ctx);
    assert_eq!(next, Some(StateId::Chase));
}

#[test]
fn test_attack_chains_via_early_decision() {
    let profile = AiProfile::brute();
    let (mut bb, mut machine, mut action) = fresh(&profile);
    let entity = mint_entity();
    bb.target = Some(entity);

    machine.transition_to(StateId::Attack(AttackKind::Strike), &mut bb, &mut action, &profile, 0.0);
    let obs = TargetObs {
        entity,
        pos: Vec2::new(20.0, 0.0),
        alive: true,
    };

    // Run the action to the early decision point; roll passes escalation.
    action.elapsed = action.duration * 0.65;
    let mut ctx = ctx_at(0.3, Some(obs));
    ctx.roll = 0.1;
    let next = states::on_update(
        StateId::Attack(AttackKind::Strike),
        &mut machine,
        &mut bb,
        &mut action,
        &profile,
        &ctx,
    );
    assert_eq!(next, None);
    assert!(machine.attack.as_ref().is_some_and(|i| i.decisions.settled()));

    // Completion executes the queued chain link.
    action.elapsed = action.duration;
    action.finished = true;
    let next = states::on_update(
        StateId::Attack(AttackKind::Strike),
        &mut machine,
        &mut bb,
        &mut action,
        &profile,
        &ctx,
    );
    assert_eq!(next, Some(StateId::Attack(AttackKind::Slam)));
}

#[test]
fn test_attack_without_target_repositions_at_late_point() {
    let profile = AiProfile::brute();
    let (mut bb, mut machine, mut action) = fresh(&profile);
    machine.transition_to(StateId::Attack(AttackKind::Strike), &mut bb, &mut action, &profile, 0.0);

    // Early point with no target: no decision, pair stays armed.
    action.elapsed = action.duration * 0.65;
    let ctx = ctx_at(0.3, None);
    states::on_update(
        StateId::Attack(AttackKind::Strike),
        &mut machine,
        &mut bb,
        &mut action,
        &profile,
        &ctx,
    );
    assert!(machine.attack.as_ref().is_some_and(|i| !i.decisions.settled()));

    // Late point produces the fallback; completion goes back to chase.
    action.elapsed = action.duration * 0.95;
    states::on_update(
        StateId::Attack(AttackKind::Strike),
        &mut machine,
        &mut bb,
        &mut action,
        &profile,
        &ctx,
    );
    action.finished = true;
    let next = states::on_update(
        StateId::Attack(AttackKind::Strike),
        &mut machine,
        &mut bb,
        &mut action,
        &profile,
        &ctx,
    );
    assert_eq!(next, Some(StateId::Chase));
    assert!(bb.reposition_until > ctx.now);
}
