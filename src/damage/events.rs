//! Damage domain: messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::character::combo::StrikeKind;

/// A strike the state machine committed to this frame. The damage module
/// answers by spawning the matching hitbox.
#[derive(Debug)]
pub struct StrikeEvent {
    pub attacker: Entity,
    pub kind: StrikeKind,
}

impl Message for StrikeEvent {}

/// Apply damage to a target. Knockback pushes away from the source
/// position unless an explicit direction overrides it.
#[derive(Debug)]
pub struct DamageEvent {
    pub target: Entity,
    pub amount: f32,
    pub source_position: Vec2,
    pub knockback_override: Option<Vec2>,
}

impl Message for DamageEvent {}

#[derive(Debug)]
pub struct DeathEvent {
    pub entity: Entity,
}

impl Message for DeathEvent {}
