//! Character domain: ledge grab geometry.
//!
//! Pure anchor math for the ledge subsystem. The probe systems cast the
//! actual rays; everything here is position arithmetic so the formulas can
//! be tested directly.

use bevy::prelude::*;

use super::config::LedgeConfig;
use super::context::Facing;

/// A grabbable ledge found by the probe, with every anchor precomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgeTarget {
    /// Side of the player the ledge is on.
    pub side: Facing,
    /// Top corner of the ledge: wall face x, platform top y.
    pub corner: Vec2,
    /// Body-center anchor while hanging.
    pub grab_point: Vec2,
    /// Body-center anchor after climbing up.
    pub surface_point: Vec2,
}

/// Start of the downward corner cast: ahead of the collider edge and above
/// the collider top, so the cast enters the platform from open air.
pub fn corner_probe_origin(pos: Vec2, half: Vec2, side: Facing, cfg: &LedgeConfig) -> Vec2 {
    Vec2::new(
        pos.x + side.sign() * (half.x + cfg.probe_forward),
        pos.y + half.y + cfg.probe_rise,
    )
}

/// Height of the horizontal wall verification ray, just below the corner.
pub fn wall_probe_height(corner_y: f32, cfg: &LedgeConfig) -> f32 {
    corner_y - cfg.wall_check_inset
}

/// Assemble a target from a verified corner.
///
/// The hang anchor is offset back from the wall face by `grab_offset_x`
/// and down from the ledge top by `grab_offset_y` of the player height,
/// which puts the hands at the corner. The surface anchor stands the
/// collider fully on top of the platform.
pub fn build_target(corner: Vec2, side: Facing, half: Vec2, cfg: &LedgeConfig) -> LedgeTarget {
    let height = half.y * 2.0;
    let grab_point = Vec2::new(
        corner.x - side.sign() * cfg.grab_offset_x,
        corner.y - height * cfg.grab_offset_y,
    );
    let surface_point = Vec2::new(
        corner.x + side.sign() * (half.x + 2.0),
        corner.y + half.y + 0.5,
    );
    LedgeTarget {
        side,
        corner,
        grab_point,
        surface_point,
    }
}

/// Auto-grab accepts only when the player's lower bound has fallen into a
/// narrow band below the ledge top.
pub fn within_grab_window(target: &LedgeTarget, pos: Vec2, half: Vec2, cfg: &LedgeConfig) -> bool {
    let lower_bound = pos.y - half.y;
    lower_bound <= target.corner.y && lower_bound >= target.corner.y - cfg.grab_window
}
