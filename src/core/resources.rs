//! Core domain: run-wide resources.

use bevy::prelude::*;

use crate::world::PLAYER_SPAWN;

/// Where a dead player comes back. Checkpoint plates move it.
#[derive(Resource, Debug)]
pub struct Checkpoint {
    pub position: Vec2,
}

impl Default for Checkpoint {
    fn default() -> Self {
        Self {
            position: PLAYER_SPAWN,
        }
    }
}
