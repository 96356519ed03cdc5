//! Character domain: environment query systems.
//!
//! Raycast and overlap probes that answer, once per frame tick: grounded,
//! touching wall (and side), touching ceiling, in water (and surface
//! height), grabbable ledge (and anchors). Results land in `EnvProbe`;
//! the controller folds them into `StateContext` before the states run.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::config::CharacterConfig;
use super::context::{Facing, StateContext, WallContact};
use super::input::ActionInput;
use super::ledge::{self, LedgeTarget};
use super::machine::StateMachine;
use super::states::StateId;
use super::timers::TimerBank;
use super::{GameLayer, Player};
use crate::world::WaterVolume;

/// Raw environment query results for one character.
#[derive(Component, Debug, Clone, Default)]
pub struct EnvProbe {
    pub grounded: bool,
    pub wall: WallContact,
    pub ceiling: bool,
    pub in_water: bool,
    pub water_surface: f32,
    pub ledge: Option<LedgeTarget>,
}

/// Contact probe reach beyond the collider surface.
const CONTACT_DISTANCE: f32 = 4.0;

/// Fallback half extents when the collider is not a cuboid.
const FALLBACK_HALF: Vec2 = Vec2::new(12.0, 24.0);

pub(crate) fn collider_half_extents(collider: &Collider) -> Vec2 {
    match collider.shape_scaled().as_cuboid() {
        Some(c) => Vec2::new(c.half_extents.x, c.half_extents.y),
        None => FALLBACK_HALF,
    }
}

pub(crate) fn probe_ground(
    spatial_query: SpatialQuery,
    mut query: Query<(&Position, &Collider, &mut EnvProbe), With<Player>>,
) {
    let filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);

    for (position, collider, mut probe) in &mut query {
        let half = collider_half_extents(collider);
        let origin = position.0 - Vec2::new(0.0, half.y);

        let hit = spatial_query.cast_ray(origin, Dir2::NEG_Y, CONTACT_DISTANCE, true, &filter);
        probe.grounded = hit.is_some();
    }
}

pub(crate) fn probe_walls(
    spatial_query: SpatialQuery,
    mut query: Query<(&Position, &Collider, &mut EnvProbe), With<Player>>,
) {
    let filter = SpatialQueryFilter::from_mask(GameLayer::Wall);

    for (position, collider, mut probe) in &mut query {
        let half = collider_half_extents(collider);
        let reach = half.x + CONTACT_DISTANCE;

        let left = spatial_query.cast_ray(position.0, Dir2::NEG_X, reach, true, &filter);
        let right = spatial_query.cast_ray(position.0, Dir2::X, reach, true, &filter);

        probe.wall = match (left.is_some(), right.is_some()) {
            (true, false) => WallContact::Left,
            (false, true) => WallContact::Right,
            _ => WallContact::None,
        };
    }
}

pub(crate) fn probe_ceiling(
    spatial_query: SpatialQuery,
    mut query: Query<(&Position, &Collider, &mut EnvProbe), With<Player>>,
) {
    let filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);

    for (position, collider, mut probe) in &mut query {
        let half = collider_half_extents(collider);
        let origin = position.0 + Vec2::new(0.0, half.y);

        let hit = spatial_query.cast_ray(origin, Dir2::Y, CONTACT_DISTANCE, true, &filter);
        probe.ceiling = hit.is_some();
    }
}

pub(crate) fn probe_water(
    spatial_query: SpatialQuery,
    volumes: Query<&WaterVolume>,
    mut query: Query<(&Position, &mut EnvProbe), With<Player>>,
) {
    let filter = SpatialQueryFilter::from_mask(GameLayer::Water);

    for (position, mut probe) in &mut query {
        probe.in_water = false;
        probe.water_surface = 0.0;

        for entity in spatial_query.point_intersections(position.0, &filter) {
            if let Ok(volume) = volumes.get(entity) {
                probe.in_water = true;
                probe.water_surface = volume.surface_y;
                break;
            }
        }
    }
}

/// Ledge detection. Gated off entirely while grounded, moving upward, on
/// the post-release cooldown, or in a state that owns its own motion
/// (dash, combat, swim, the ledge states themselves).
pub(crate) fn probe_ledge(
    spatial_query: SpatialQuery,
    input: Res<ActionInput>,
    config: Res<CharacterConfig>,
    mut query: Query<
        (
            &Position,
            &Collider,
            &LinearVelocity,
            &TimerBank,
            &StateMachine,
            &StateContext,
            &mut EnvProbe,
        ),
        With<Player>,
    >,
) {
    let filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);

    for (position, collider, velocity, timers, machine, shared, mut probe) in &mut query {
        probe.ledge = None;

        if probe.grounded || velocity.y >= 0.0 || timers.ledge_cooldown.active() {
            continue;
        }
        if matches!(
            machine.current(),
            StateId::Dash | StateId::Combat | StateId::Swim | StateId::LedgeGrab | StateId::LedgeClimb
        ) {
            continue;
        }

        let half = collider_half_extents(collider);
        let side = if input.has_move() {
            Facing::from_sign(input.axis.x)
        } else {
            shared.facing
        };

        // Downward cast ahead of the collider finds the platform top.
        let origin = ledge::corner_probe_origin(position.0, half, side, &config.ledge);
        let Some(top_hit) =
            spatial_query.cast_ray(origin, Dir2::NEG_Y, config.ledge.probe_depth, true, &filter)
        else {
            continue;
        };
        if top_hit.normal.y < 0.7 {
            continue;
        }
        let corner_y = origin.y - top_hit.distance;

        // Horizontal cast just below the corner verifies the wall face and
        // pins the corner x.
        let wall_origin = Vec2::new(position.0.x, ledge::wall_probe_height(corner_y, &config.ledge));
        let wall_dir = match side {
            Facing::Right => Dir2::X,
            Facing::Left => Dir2::NEG_X,
        };
        let wall_reach = half.x + config.ledge.probe_forward + CONTACT_DISTANCE;
        let Some(wall_hit) = spatial_query.cast_ray(wall_origin, wall_dir, wall_reach, true, &filter)
        else {
            continue;
        };
        let corner_x = wall_origin.x + side.sign() * wall_hit.distance;

        let corner = Vec2::new(corner_x, corner_y);
        probe.ledge = Some(ledge::build_target(corner, side, half, &config.ledge));
    }
}
