//! Hit-stun drift: launch velocity that decays over the stun window.

use avian2d::prelude::LinearVelocity;
use bevy::math::Vec2;

use crate::character::config::KnockbackConfig;

/// One fixed tick of knockback motion. The launch speed decays linearly
/// to zero across the stun duration; standing on ground kills the
/// vertical component so the body skids instead of bouncing.
pub fn knockback_tick(
    velocity: &mut LinearVelocity,
    dir: Vec2,
    cfg: &KnockbackConfig,
    progress: f32,
    grounded: bool,
) {
    let strength = cfg.force * (1.0 - progress.clamp(0.0, 1.0));
    let mut v = dir * strength;
    if grounded {
        v.y = 0.0;
    }
    velocity.x = v.x;
    velocity.y = v.y;
}
