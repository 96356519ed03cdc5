//! Surface buoyancy: spring-damper toward the float line plus idle bob.

use avian2d::prelude::{LinearVelocity, Position};

use crate::character::config::SwimConfig;
use crate::character::context::StateContext;
use crate::character::motion::smooth_damp;

const BOB_STILL_SPEED: f32 = 10.0;

/// One fixed tick of vertical water motion. Horizontal speed is the
/// caller's business; this only settles the body onto the float line.
pub fn buoyancy_tick(
    velocity: &mut LinearVelocity,
    position: &mut Position,
    shared: &mut StateContext,
    cfg: &SwimConfig,
    water_surface: f32,
    dt: f32,
) {
    // Idle bob eases out as soon as the player strokes sideways.
    shared.bob_phase = (shared.bob_phase + dt * cfg.bob_frequency * std::f32::consts::TAU)
        % std::f32::consts::TAU;
    let bob_target = if velocity.x.abs() < BOB_STILL_SPEED {
        shared.bob_phase.sin() * cfg.bob_amplitude
    } else {
        0.0
    };
    shared.float_offset = smooth_damp(
        shared.float_offset,
        bob_target,
        &mut shared.bob_velocity,
        cfg.bob_smooth_time,
        dt,
    );

    let target_y = water_surface - cfg.surface_offset + shared.float_offset;
    let error = target_y - position.y;
    let force = (error * cfg.buoyancy_strength - velocity.y * cfg.buoyancy_damping)
        .clamp(-cfg.max_buoyancy_force, cfg.max_buoyancy_force);
    velocity.y += force * dt;

    // Escalating correction when the body pops above the float line.
    let overshoot = position.y - target_y;
    if overshoot > cfg.overshoot_soft {
        velocity.y -= cfg.overshoot_force * dt;
    }
    if overshoot > cfg.overshoot_hard {
        position.y += (target_y - position.y) * (cfg.overshoot_lerp * dt).clamp(0.0, 1.0);
        velocity.y = velocity.y.min(0.0);
    }
}
