//! Damage domain: hitbox lifecycle and hit detection.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use super::{DamageEvent, DeathEvent, Health, StrikeEvent, Team};
use crate::character::combo::StrikeKind;
use crate::character::context::StateContext;
use crate::character::probe::collider_half_extents;
use crate::character::{CharacterConfig, GameLayer, Player, PogoBounceEvent};
use crate::world::PogoDrum;

/// How long the downward pogo volume stays live.
const POGO_HITBOX_LIFETIME: f32 = 0.12;

/// Sideways shove applied to struck enemies.
const ENEMY_KNOCKBACK_SPEED: f32 = 120.0;

/// An active strike volume. Damages each target at most once.
#[derive(Component, Debug)]
pub struct Hitbox {
    pub damage: f32,
    pub owner: Entity,
    /// Bounce force granted back to the owner on contact (pogo strikes).
    pub bounce: Option<f32>,
    pub hit_entities: Vec<Entity>,
}

#[derive(Component, Debug)]
pub struct HitboxLifetime(pub f32);

pub(crate) fn spawn_strike_hitboxes(
    mut commands: Commands,
    mut strikes: MessageReader<StrikeEvent>,
    config: Res<CharacterConfig>,
    query: Query<(&Position, &Collider, &StateContext)>,
) {
    for strike in strikes.read() {
        let Ok((position, collider, shared)) = query.get(strike.attacker) else {
            continue;
        };
        let half = collider_half_extents(collider);

        let (size, offset, damage, bounce, lifetime) = match strike.kind {
            StrikeKind::Combo(index) => {
                let hit = config.combo.hit(index);
                let size = Vec2::new(hit.range, half.y * 1.6);
                let offset = Vec2::new(shared.facing.sign() * (half.x + hit.range * 0.5), 0.0);
                (size, offset, hit.damage, None, hit.duration)
            }
            StrikeKind::Pogo => {
                let size = Vec2::new(half.x * 1.6, config.combo.pogo_range);
                let offset = Vec2::new(0.0, -(half.y + config.combo.pogo_range * 0.5));
                let bounce = Some(config.jump.force);
                (size, offset, config.combo.pogo_damage, bounce, POGO_HITBOX_LIFETIME)
            }
        };
        let pos = position.0 + offset;

        debug!("Strike {:?}: damage={}, size={}", strike.kind, damage, size);
        commands.spawn((
            Hitbox {
                damage,
                owner: strike.attacker,
                bounce,
                hit_entities: Vec::new(),
            },
            Team::Player,
            HitboxLifetime(lifetime),
            Sprite {
                color: Color::srgba(1.0, 1.0, 0.0, 0.25),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(pos.x, pos.y, 1.0),
            Collider::rectangle(size.x, size.y),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::PlayerHitbox, [GameLayer::Enemy]),
        ));
    }
}

pub(crate) fn cleanup_expired_hitboxes(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut HitboxLifetime)>,
) {
    let dt = time.delta_secs();
    for (entity, mut lifetime) in &mut query {
        lifetime.0 -= dt;
        if lifetime.0 <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn detect_strike_hits(
    mut collision_events: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut bounce_events: MessageWriter<PogoBounceEvent>,
    mut hitbox_query: Query<(&mut Hitbox, &Team, &Position)>,
    target_query: Query<(Entity, &Team, &Health), Without<Hitbox>>,
    drum_query: Query<&PogoDrum>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (hitbox_entity, target_entity) in pairs {
            let Ok((mut hitbox, hitbox_team, hitbox_pos)) = hitbox_query.get_mut(hitbox_entity)
            else {
                continue;
            };
            if hitbox.owner == target_entity || hitbox.hit_entities.contains(&target_entity) {
                continue;
            }

            let mut connected = false;
            if let Ok((target, target_team, _)) = target_query.get(target_entity) {
                if target_team != hitbox_team {
                    damage_events.write(DamageEvent {
                        target,
                        amount: hitbox.damage,
                        source_position: hitbox_pos.0,
                        knockback_override: None,
                    });
                    connected = true;
                }
            }
            if drum_query.contains(target_entity) {
                connected = true;
            }

            if connected {
                hitbox.hit_entities.push(target_entity);
                if let Some(force) = hitbox.bounce {
                    bounce_events.write(PogoBounceEvent { force });
                }
            }
        }
    }
}

/// Health and reaction for struck non-player targets. Player damage is
/// handled by the character controller so the knockback gate can fire on
/// the same frame.
pub(crate) fn apply_enemy_damage(
    mut damage_events: MessageReader<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut query: Query<
        (&Team, &Position, &mut Health, &mut Sprite, &mut LinearVelocity),
        Without<Player>,
    >,
) {
    for event in damage_events.read() {
        let Ok((team, position, mut health, mut sprite, mut velocity)) =
            query.get_mut(event.target)
        else {
            continue;
        };
        if *team != Team::Enemy {
            continue;
        }

        health.take_damage(event.amount);
        sprite.color = Color::srgb(1.0, 0.5, 0.5);
        let dir = (position.0 - event.source_position).normalize_or(Vec2::X);
        velocity.x += dir.x * ENEMY_KNOCKBACK_SPEED;

        debug!("Enemy {:?} took {} damage", event.target, event.amount);
        if health.is_dead() {
            death_events.write(DeathEvent {
                entity: event.target,
            });
        }
    }
}
