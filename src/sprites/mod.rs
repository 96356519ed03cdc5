//! Sprites module for character animation playback.
//!
//! Rendering is a flat placeholder sprite per character; this module
//! picks the tint and facing for it from the animation state until real
//! sprite sheets land.

pub mod animation;

use bevy::prelude::*;

pub use animation::{AnimationController, AnimationState};

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (animation::update_animation_frames, animation::apply_character_visuals).chain(),
        );
    }
}
