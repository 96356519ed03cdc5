//! Debug domain: dev-tools state.

use bevy::prelude::*;

/// Resource tracking dev overlay state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the state overlay is visible
    pub overlay_visible: bool,
    /// Whether player is invincible
    pub invincible: bool,
    /// Message to display temporarily in the overlay
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }
}
