//! Core domain: app states, camera, checkpoint tracking, and respawn.

pub mod resources;
pub mod state;
pub mod systems;

use bevy::prelude::*;

pub use resources::Checkpoint;
pub use state::GameState;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<Checkpoint>()
            .add_systems(Startup, systems::setup_camera)
            .add_systems(Update, systems::toggle_pause)
            .add_systems(
                Update,
                (systems::camera_follow, systems::respawn_player)
                    .run_if(in_state(GameState::Run)),
            );
    }
}
