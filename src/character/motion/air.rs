//! Air control: bounded steering with momentum preservation.

use avian2d::prelude::*;

use super::move_toward;
use crate::character::config::MovementConfig;
use crate::character::timers::TimerBank;

/// Horizontal air control. While the jump-momentum grace timer runs the
/// horizontal velocity is left untouched so a running jump keeps its
/// speed. With input, speed is nudged toward the target by a bounded
/// acceleration; without input it decays toward zero at a fixed rate.
pub fn air_control(
    velocity: &mut LinearVelocity,
    input_x: f32,
    cfg: &MovementConfig,
    timers: &TimerBank,
    dt: f32,
) {
    if timers.jump_momentum.active() {
        return;
    }

    if input_x.abs() > 0.1 {
        let target = (input_x * cfg.move_speed * cfg.air_control_mult)
            .clamp(-cfg.max_air_speed, cfg.max_air_speed);
        velocity.x = move_toward(velocity.x, target, cfg.air_accel * dt);
        velocity.x = velocity.x.clamp(-cfg.max_air_speed, cfg.max_air_speed);
    } else {
        velocity.x = move_toward(velocity.x, 0.0, cfg.air_drift_decay * dt);
    }
}
