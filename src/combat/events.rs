//! Combat domain: messages crossing the domain boundaries.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// One resolved hit. The sender computed amount and knockback; health
/// bookkeeping and the physical response happen downstream.
#[derive(Debug)]
pub struct DamageEvent {
    pub source: Entity,
    pub target: Entity,
    pub amount: f32,
    pub knockback: Vec2,
}

impl Message for DamageEvent {}

/// Health reached zero this tick.
#[derive(Debug)]
pub struct DeathEvent {
    pub entity: Entity,
}

impl Message for DeathEvent {}

/// An elite crossed a health threshold into a later phase.
#[derive(Debug)]
pub struct PhaseChangeEvent {
    pub elite: Entity,
    pub phase: u8,
}

impl Message for PhaseChangeEvent {}

/// An elite died.
#[derive(Debug)]
pub struct EliteDefeatedEvent {
    pub elite: Entity,
}

impl Message for EliteDefeatedEvent {}
