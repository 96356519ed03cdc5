//! Dash: hard-set velocity along a fixed direction.

use bevy::prelude::*;

use crate::character::config::DashConfig;
use crate::character::context::Facing;

/// Pick the dash direction: held movement input wins, facing is the
/// fallback. Diagonals are normalized when configured, otherwise a
/// diagonal dash really is faster.
pub fn dash_direction(axis: Vec2, facing: Facing, cfg: &DashConfig) -> Vec2 {
    let has_input = axis.x.abs() > 0.1 || axis.y.abs() > 0.1;
    if !has_input {
        return Vec2::new(facing.sign(), 0.0);
    }
    let dir = Vec2::new(
        if axis.x.abs() > 0.1 { axis.x.signum() } else { 0.0 },
        if axis.y.abs() > 0.1 { axis.y.signum() } else { 0.0 },
    );
    if cfg.normalize_diagonal {
        dir.normalize_or(Vec2::new(facing.sign(), 0.0))
    } else {
        dir
    }
}
