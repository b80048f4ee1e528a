//! Combat domain: damage application, knockback, deaths, and cleanup.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::ai::blackboard::Blackboard;
use crate::ai::machine::{StateId, StateMachine};
use crate::ai::profile::{AiProfile, Role};
use crate::anim::ActionPlayer;
use crate::combat::components::{
    Combatant, DespawnTimer, Health, HitFlash, Hitbox, HitboxLifetime, Hostile, Invulnerable,
    Team, Telegraph,
};
use crate::combat::events::{DamageEvent, DeathEvent, EliteDefeatedEvent};
use crate::content::AiDefaults;

pub(crate) fn update_combat_timers(
    mut commands: Commands,
    time: Res<Time>,
    mut invulnerable: Query<&mut Invulnerable>,
    mut hitboxes: Query<(Entity, &mut HitboxLifetime)>,
    mut telegraphs: Query<(Entity, &mut Telegraph)>,
    mut flashes: Query<(Entity, &mut HitFlash, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for mut invuln in &mut invulnerable {
        if invuln.timer > 0.0 {
            invuln.timer -= dt;
        }
    }
    for (entity, mut lifetime) in &mut hitboxes {
        lifetime.0 -= dt;
        if lifetime.0 <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
    for (entity, mut telegraph) in &mut telegraphs {
        telegraph.timer -= dt;
        if telegraph.timer <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
    for (entity, mut flash, mut sprite) in &mut flashes {
        flash.timer -= dt;
        if flash.timer <= 0.0 {
            sprite.color = flash.restore;
            commands.entity(entity).remove::<HitFlash>();
        }
    }
}

/// Turn player hitbox contacts into damage events.
pub(crate) fn detect_hitbox_collisions(
    mut collision_events: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut hitbox_query: Query<(&mut Hitbox, &Team, &Transform)>,
    target_query: Query<(Entity, &Team, &Transform), With<Combatant>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (hitbox_entity, target_entity) in pairs {
            let Ok((mut hitbox, hitbox_team, hitbox_transform)) =
                hitbox_query.get_mut(hitbox_entity)
            else {
                continue;
            };
            let Ok((target, target_team, target_transform)) = target_query.get(target_entity)
            else {
                continue;
            };
            if hitbox_team == target_team || hitbox.owner == target {
                continue;
            }
            if hitbox.hit_entities.contains(&target) {
                continue;
            }
            hitbox.hit_entities.push(target);

            let hitbox_pos = hitbox_transform.translation.truncate();
            let target_pos = target_transform.translation.truncate();
            let knockback_dir = (target_pos - hitbox_pos)
                .try_normalize()
                .unwrap_or(Vec2::X);

            damage_events.write(DamageEvent {
                source: hitbox.owner,
                target,
                amount: hitbox.damage,
                knockback: knockback_dir * hitbox.knockback,
            });
        }
    }
}

pub(crate) fn apply_damage(
    mut commands: Commands,
    mut damage_events: MessageReader<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    defaults: Res<AiDefaults>,
    mut query: Query<(
        &mut Health,
        Option<&mut Invulnerable>,
        &mut Sprite,
        Option<&HitFlash>,
    )>,
) {
    for event in damage_events.read() {
        let Ok((mut health, invulnerable, mut sprite, flash)) = query.get_mut(event.target) else {
            continue;
        };
        if health.is_dead() {
            continue;
        }
        if let Some(mut invuln) = invulnerable {
            if invuln.is_invulnerable() {
                continue;
            }
            invuln.timer = defaults.iframes_duration;
        }

        health.take_damage(event.amount);

        // A second hit mid-flash extends the tint without forgetting the
        // true base color.
        let restore = flash.map(|f| f.restore).unwrap_or(sprite.color);
        sprite.color = Color::srgb(1.0, 0.5, 0.5);
        commands.entity(event.target).insert(HitFlash {
            timer: defaults.hit_flash_duration,
            restore,
        });

        if health.is_dead() {
            death_events.write(DeathEvent {
                entity: event.target,
            });
        }
    }
}

pub(crate) fn apply_knockback(
    mut damage_events: MessageReader<DamageEvent>,
    defaults: Res<AiDefaults>,
    mut query: Query<&mut LinearVelocity, With<Combatant>>,
) {
    let max_speed = defaults.knockback_max_speed;
    for event in damage_events.read() {
        let Ok(mut velocity) = query.get_mut(event.target) else {
            continue;
        };
        velocity.0 += event.knockback;
        let speed = velocity.0.length();
        if speed > max_speed {
            velocity.0 *= max_speed / speed;
        }
    }
}

/// Retire dead hostiles: terminal state, collision off, destruction queued.
pub(crate) fn process_deaths(
    mut commands: Commands,
    time: Res<Time>,
    mut death_events: MessageReader<DeathEvent>,
    mut defeated_events: MessageWriter<EliteDefeatedEvent>,
    mut hostiles: Query<
        (
            &AiProfile,
            &mut StateMachine,
            &mut Blackboard,
            &mut ActionPlayer,
        ),
        With<Hostile>,
    >,
) {
    let now = time.elapsed_secs();
    for event in death_events.read() {
        let Ok((profile, mut machine, mut blackboard, mut action)) =
            hostiles.get_mut(event.entity)
        else {
            continue;
        };
        if machine.retired() {
            continue;
        }
        machine.transition_to(StateId::Dead, &mut blackboard, &mut action, profile, now);
        commands.entity(event.entity).insert((
            DespawnTimer {
                remaining: profile.death_linger,
            },
            CollisionLayers::NONE,
        ));
        if profile.role == Role::Elite {
            info!("elite '{}' defeated", profile.id);
            defeated_events.write(EliteDefeatedEvent {
                elite: event.entity,
            });
        }
    }
}

/// The destruction signal: despawn once the death linger elapses.
pub(crate) fn finalize_despawns(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DespawnTimer)>,
) {
    let dt = time.delta_secs();
    for (entity, mut timer) in &mut query {
        timer.remaining -= dt;
        if timer.remaining <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}
