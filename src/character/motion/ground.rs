//! Ground locomotion: critically damped approach with an instant stop.

use avian2d::prelude::*;

use super::smooth_damp;
use crate::character::config::MovementConfig;
use crate::character::context::StateContext;

/// Horizontal ground movement. Vertical velocity is left alone. With no
/// input the character stops dead instead of gliding.
pub fn ground_move(
    velocity: &mut LinearVelocity,
    shared: &mut StateContext,
    input_x: f32,
    target_speed: f32,
    cfg: &MovementConfig,
    dt: f32,
) {
    if input_x.abs() <= 0.1 {
        velocity.x = 0.0;
        shared.ground_smooth_vel = 0.0;
        return;
    }
    let target = input_x.signum() * target_speed;
    velocity.x = smooth_damp(
        velocity.x,
        target,
        &mut shared.ground_smooth_vel,
        cfg.ground_smooth_time,
        dt,
    );
}
