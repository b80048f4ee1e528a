//! Combat domain: components shared by the player and the hostiles.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Anything that can deal or receive damage.
#[derive(Component, Debug)]
pub struct Combatant;

/// Marks an AI-driven hostile entity.
#[derive(Component, Debug)]
pub struct Hostile;

/// Hit points. Death is `current <= 0`; the percent feeds the elite's
/// phase thresholds.
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Subtract up to `amount`, returning what was actually lost.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let lost = amount.min(self.current);
        self.current -= lost;
        lost
    }

    /// Refill to max. Produces the dead->alive edge the liveness sweep
    /// watches for on respawn.
    pub fn restore_full(&mut self) {
        self.current = self.max;
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percent(&self) -> f32 {
        self.current / self.max
    }
}

/// Post-hit grace period during which further damage is ignored.
#[derive(Component, Debug, Default)]
pub struct Invulnerable {
    pub timer: f32,
}

impl Invulnerable {
    pub fn is_invulnerable(&self) -> bool {
        self.timer > 0.0
    }
}

/// Side of the fight, so sensors never damage their own kind.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Player,
    Enemy,
}

/// Short-lived damage sensor. Remembers who it already touched so one
/// swing never double-counts a victim.
#[derive(Component, Debug)]
pub struct Hitbox {
    pub damage: f32,
    pub knockback: f32,
    pub owner: Entity,
    pub hit_entities: Vec<Entity>,
}

/// Seconds until a hitbox despawns.
#[derive(Component)]
pub struct HitboxLifetime(pub f32);

/// Strike-zone marker shown while an attack winds up, removed when its
/// timer runs out.
#[derive(Component, Debug)]
pub struct Telegraph {
    pub timer: f32,
}

/// Brief tint applied when damage lands; the original color comes back
/// when the timer expires.
#[derive(Component, Debug)]
pub struct HitFlash {
    pub timer: f32,
    pub restore: Color,
}

/// Countdown to destruction after the death sequence. Inserted exactly once
/// by the death path.
#[derive(Component, Debug)]
pub struct DespawnTimer {
    pub remaining: f32,
}

/// A pooled projectile slot. Present on every slot entity; `in_flight`
/// distinguishes parked slots from live ones.
#[derive(Component, Debug)]
pub struct Projectile {
    pub owner: Entity,
    pub damage: f32,
    pub knockback: f32,
    pub lifetime: f32,
    /// Pool slot index for release.
    pub slot: usize,
    pub in_flight: bool,
}

/// Collision layers for filtering overlap tests and contact events.
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Arena bounds
    Wall,
    /// Player character
    Player,
    /// Hostile characters
    Enemy,
    /// Player-owned attack sensors
    PlayerHitbox,
    /// Hostile projectiles
    EnemyHitbox,
}
