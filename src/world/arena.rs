//! World domain: training arena layout.
//!
//! One hand-built room exercising every movement system: flat runs, a
//! water pool, grabbable ledges, a wall-jump chimney, spikes, a pogo
//! drum, ability pickups, and practice dummies.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::{
    AbilityPickup, CheckpointPlate, Ground, PogoDrum, Spikes, TrainingDummy, Wall, WaterVolume,
};
use crate::character::{Ability, GameLayer};
use crate::damage::{Health, Team};

const GROUND_COLOR: Color = Color::srgb(0.4, 0.5, 0.4);
const WALL_COLOR: Color = Color::srgb(0.3, 0.3, 0.4);
const BLOCK_COLOR: Color = Color::srgb(0.5, 0.4, 0.3);
const WATER_COLOR: Color = Color::srgba(0.2, 0.4, 0.8, 0.5);
const SPIKE_COLOR: Color = Color::srgb(0.8, 0.3, 0.3);
const DRUM_COLOR: Color = Color::srgb(0.85, 0.7, 0.3);
pub(crate) const DUMMY_COLOR: Color = Color::srgb(0.7, 0.55, 0.5);

const SPIKE_DAMAGE: f32 = 10.0;
const DUMMY_HEALTH: f32 = 30.0;

pub(crate) fn spawn_arena(mut commands: Commands, existing: Query<(), With<Ground>>) {
    // Run re-entry (unpausing) must not rebuild the room.
    if !existing.is_empty() {
        return;
    }

    // Floors, flat geometry only the ground probe cares about.
    spawn_floor(&mut commands, Vec2::new(-425.0, -220.0), Vec2::new(1150.0, 40.0));
    spawn_floor(&mut commands, Vec2::new(775.0, -220.0), Vec2::new(450.0, 40.0));
    // Pool basin below the gap between the floors.
    spawn_floor(&mut commands, Vec2::new(360.0, -420.0), Vec2::new(480.0, 40.0));
    spawn_wall(&mut commands, Vec2::new(130.0, -300.0), Vec2::new(40.0, 200.0));
    spawn_wall(&mut commands, Vec2::new(590.0, -300.0), Vec2::new(40.0, 200.0));

    // Arena boundaries.
    spawn_wall(&mut commands, Vec2::new(-1020.0, 0.0), Vec2::new(40.0, 480.0));
    spawn_wall(&mut commands, Vec2::new(1020.0, 0.0), Vec2::new(40.0, 480.0));

    // Water pool between the floors; collider top is the surface.
    commands.spawn((
        WaterVolume { surface_y: -200.0 },
        Sprite {
            color: WATER_COLOR,
            custom_size: Some(Vec2::new(420.0, 200.0)),
            ..default()
        },
        Transform::from_xyz(360.0, -300.0, -0.5),
        RigidBody::Static,
        Collider::rectangle(420.0, 200.0),
        Sensor,
        CollisionLayers::new(GameLayer::Water, [GameLayer::Player]),
    ));

    // Grab-practice blocks, thick enough that the ledge probe finds a
    // wall face under each corner.
    spawn_block(&mut commands, Vec2::new(-300.0, -60.0), Vec2::new(120.0, 40.0));
    spawn_block(&mut commands, Vec2::new(-600.0, 80.0), Vec2::new(120.0, 40.0));

    // Wall-jump chimney on the right floor.
    spawn_wall(&mut commands, Vec2::new(880.0, 0.0), Vec2::new(40.0, 400.0));
    spawn_wall(&mut commands, Vec2::new(990.0, 0.0), Vec2::new(40.0, 400.0));

    // Spike strip on the left floor.
    commands.spawn((
        Spikes {
            damage: SPIKE_DAMAGE,
        },
        Sprite {
            color: SPIKE_COLOR,
            custom_size: Some(Vec2::new(150.0, 20.0)),
            ..default()
        },
        Transform::from_xyz(-75.0, -190.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(150.0, 20.0),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::EnemyHitbox, [GameLayer::Player]),
    ));

    // Pogo drum: solid, strikeable from above.
    commands.spawn((
        PogoDrum,
        Sprite {
            color: DRUM_COLOR,
            custom_size: Some(Vec2::new(60.0, 40.0)),
            ..default()
        },
        Transform::from_xyz(650.0, -180.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(60.0, 40.0),
        CollisionEventsEnabled,
        CollisionLayers::new(
            [GameLayer::Enemy, GameLayer::Ground],
            [GameLayer::Player, GameLayer::PlayerHitbox],
        ),
    ));

    // Checkpoint plate near the spawn.
    commands.spawn((
        CheckpointPlate,
        Sprite {
            color: Color::srgb(0.4, 0.8, 0.5),
            custom_size: Some(Vec2::new(60.0, 10.0)),
            ..default()
        },
        Transform::from_xyz(-900.0, -195.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(60.0, 10.0),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
    ));

    // Ability pickups placed where their movement is first needed.
    spawn_pickup(&mut commands, Ability::DoubleJump, Vec2::new(-600.0, 140.0));
    spawn_pickup(&mut commands, Ability::WallLock, Vec2::new(935.0, 230.0));
    spawn_pickup(&mut commands, Ability::Pogo, Vec2::new(700.0, -170.0));

    // Practice dummies.
    spawn_dummy(&mut commands, Vec2::new(60.0, -176.0));
    spawn_dummy(&mut commands, Vec2::new(820.0, -176.0));

    info!("Training arena spawned");
}

fn spawn_floor(commands: &mut Commands, center: Vec2, size: Vec2) {
    commands.spawn((
        Ground,
        Sprite {
            color: GROUND_COLOR,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(center.x, center.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player, GameLayer::Enemy]),
    ));
}

fn spawn_wall(commands: &mut Commands, center: Vec2, size: Vec2) {
    commands.spawn((
        Wall,
        Sprite {
            color: WALL_COLOR,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(center.x, center.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(
            [GameLayer::Wall, GameLayer::Ground],
            [GameLayer::Player, GameLayer::Enemy],
        ),
    ));
}

/// A thick block that is walkable ground on top and grabbable wall at the
/// sides.
fn spawn_block(commands: &mut Commands, center: Vec2, size: Vec2) {
    commands.spawn((
        Ground,
        Wall,
        Sprite {
            color: BLOCK_COLOR,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(center.x, center.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(
            [GameLayer::Ground, GameLayer::Wall],
            [GameLayer::Player, GameLayer::Enemy],
        ),
    ));
}

fn spawn_pickup(commands: &mut Commands, ability: Ability, at: Vec2) {
    commands.spawn((
        AbilityPickup { ability },
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.4),
            custom_size: Some(Vec2::new(16.0, 16.0)),
            ..default()
        },
        Transform::from_xyz(at.x, at.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(16.0, 16.0),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
    ));
}

pub(crate) fn spawn_dummy(commands: &mut Commands, at: Vec2) {
    commands.spawn((
        TrainingDummy { home: at },
        Team::Enemy,
        Health::new(DUMMY_HEALTH),
        Sprite {
            color: DUMMY_COLOR,
            custom_size: Some(Vec2::new(24.0, 48.0)),
            ..default()
        },
        Transform::from_xyz(at.x, at.y, 0.0),
        RigidBody::Dynamic,
        Collider::rectangle(24.0, 48.0),
        LockedAxes::ROTATION_LOCKED,
        LinearVelocity::default(),
        Friction::new(0.4),
        CollisionLayers::new(
            GameLayer::Enemy,
            [GameLayer::Ground, GameLayer::Wall, GameLayer::PlayerHitbox],
        ),
    ));
}
