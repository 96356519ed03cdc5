//! World domain: the training arena and its interactive props.
//!
//! Static geometry, the water pool, hazards, ability pickups, the
//! checkpoint plate, and respawning practice dummies. Everything the
//! character module probes or strikes lives here.

pub mod arena;
pub mod systems;

use bevy::prelude::*;

use crate::core::GameState;

/// Where the player first appears, above the checkpoint plate.
pub const PLAYER_SPAWN: Vec2 = Vec2::new(-900.0, -150.0);

/// Static floor/platform marker.
#[derive(Component, Debug)]
pub struct Ground;

/// Static wall marker.
#[derive(Component, Debug)]
pub struct Wall;

/// A swimmable region. The top of the collider is the surface.
#[derive(Component, Debug)]
pub struct WaterVolume {
    pub surface_y: f32,
}

/// Contact hazard.
#[derive(Component, Debug)]
pub struct Spikes {
    pub damage: f32,
}

/// Bounceable prop: answers a pogo strike with a bounce.
#[derive(Component, Debug)]
pub struct PogoDrum;

/// Grants an ability on touch, then despawns.
#[derive(Component, Debug)]
pub struct AbilityPickup {
    pub ability: crate::character::Ability,
}

/// Touch plate that moves the respawn point here and heals.
#[derive(Component, Debug)]
pub struct CheckpointPlate;

/// Strikeable practice target. Respawns a moment after dying.
#[derive(Component, Debug)]
pub struct TrainingDummy {
    pub home: Vec2,
}

/// Dummies waiting to come back.
#[derive(Resource, Debug, Default)]
pub struct DummyRespawns {
    pub pending: Vec<(Vec2, Timer)>,
}

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DummyRespawns>()
            .add_systems(OnEnter(GameState::Run), arena::spawn_arena)
            .add_systems(
                Update,
                (
                    systems::spike_touch,
                    systems::pickup_touch,
                    systems::checkpoint_touch,
                    systems::fade_dummy_flash,
                    systems::handle_dummy_deaths,
                    systems::respawn_dummies,
                )
                    .run_if(in_state(GameState::Run)),
            );
    }
}
