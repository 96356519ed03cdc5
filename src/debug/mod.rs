//! Debug domain: dev-tools overlay and hotkeys.
//!
//! Compiled behind the `dev-tools` feature. F1 toggles a controller state
//! overlay, F2 unlocks every ability, F3 toggles invincibility, F4 heals.

pub mod state;
pub mod systems;
pub mod ui;

use bevy::prelude::*;

use crate::core::GameState;
use state::DebugState;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                systems::toggle_overlay,
                systems::handle_debug_hotkeys,
                systems::update_status_message,
                systems::apply_invincibility,
                systems::update_overlay,
            )
                .chain()
                .run_if(in_state(GameState::Run)),
        );
    }
}
