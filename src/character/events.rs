//! Character domain: messages exposed to the rest of the game.

use bevy::ecs::message::Message;

use super::abilities::Ability;

/// Emitted by pickups (and the debug overlay) to grant an ability.
#[derive(Debug)]
pub struct AbilityUnlockedEvent {
    pub ability: Ability,
}

impl Message for AbilityUnlockedEvent {}

/// Emitted by bounceable objects (pogo drums) when struck from above.
/// The controller answers with an upward bounce and an air-action refund.
#[derive(Debug)]
pub struct PogoBounceEvent {
    pub force: f32,
}

impl Message for PogoBounceEvent {}
