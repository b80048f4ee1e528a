//! AI domain: the per-entity state machine contract and dispatch.

use bevy::prelude::*;

use crate::ai::blackboard::Blackboard;
use crate::ai::combo::NextMove;
use crate::ai::profile::{AiProfile, AttackKind, AttackSpec};
use crate::ai::states;
use crate::ai::window::{DamageWindow, DecisionPoints};
use crate::anim::ActionPlayer;

/// State identifiers. Attack carries its variant so chained attacks are
/// ordinary transitions (including same-variant re-entry).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateId {
    Idle,
    Patrol,
    Chase,
    Attack(AttackKind),
    Hurt,
    Dead,
}

/// Per-instance scratch owned by an active Attack state.
#[derive(Debug, Clone)]
pub struct AttackInstance {
    pub kind: AttackKind,
    pub window: DamageWindow,
    pub decisions: DecisionPoints,
    /// Next move chosen by a decision point, executed at completion.
    pub queued: Option<NextMove>,
    /// A telegraph marker has been shown for this instance.
    pub telegraphed: bool,
}

impl AttackInstance {
    pub fn new(spec: &AttackSpec) -> Self {
        Self {
            kind: spec.kind,
            window: DamageWindow::multi(
                spec.window_open,
                spec.window_close,
                spec.max_hits,
                spec.hit_spacing,
            ),
            // Lookahead just after the window closes, fallback near the end.
            decisions: DecisionPoints::new(spec.window_close, 0.9),
            queued: None,
            telegraphed: false,
        }
    }
}

/// Fixed-contract state machine: every transition runs the full exit/enter
/// cycle synchronously, including same-id re-entry. Dead is terminal.
#[derive(Component, Debug, Clone)]
pub struct StateMachine {
    current: Option<StateId>,
    /// Seconds since the current state was entered.
    pub time_in_state: f32,
    /// Generic countdown scratch for the current state (scan, pause, recovery).
    pub state_timer: f32,
    /// Bumped on every enter; distinguishes attack instances.
    pub instance: u32,
    pub attack: Option<AttackInstance>,
    retired: bool,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self {
            current: None,
            time_in_state: 0.0,
            state_timer: 0.0,
            instance: 0,
            attack: None,
            retired: false,
        }
    }
}

impl StateMachine {
    /// Active state, or None before the first enter.
    pub fn current(&self) -> Option<StateId> {
        self.current
    }

    pub fn is(&self, id: StateId) -> bool {
        self.current == Some(id)
    }

    /// In a combat-committed state (Chase or any Attack)?
    pub fn is_committed(&self) -> bool {
        matches!(self.current, Some(StateId::Chase) | Some(StateId::Attack(_)))
    }

    pub fn retired(&self) -> bool {
        self.retired
    }

    pub fn tick(&mut self, dt: f32) {
        self.time_in_state += dt;
    }

    /// Execute a transition: exit the current state (no-op when none is
    /// active), swap, enter the new one. Ignored once retired.
    pub fn transition_to(
        &mut self,
        next: StateId,
        bb: &mut Blackboard,
        action: &mut ActionPlayer,
        profile: &AiProfile,
        now: f32,
    ) {
        if self.retired {
            return;
        }
        if let Some(prev) = self.current {
            states::on_exit(prev, self, bb, action, profile, now);
        }
        // Residual motion never survives a transition.
        bb.steer = Vec2::ZERO;
        self.current = Some(next);
        self.time_in_state = 0.0;
        self.state_timer = 0.0;
        self.instance = self.instance.wrapping_add(1);
        states::on_enter(next, self, bb, action, profile, now);
        if next == StateId::Dead {
            self.retired = true;
        }
    }
}
