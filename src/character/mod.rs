//! Character domain: the state-machine player controller.
//!
//! One state is active at a time; only that state's fixed tick writes the
//! body's velocity. The controller in `driver` owns the frame tick, the
//! environment probes feed it, and the content module supplies tuning.

pub mod abilities;
pub mod combo;
pub mod config;
pub mod context;
pub mod driver;
pub mod events;
pub mod input;
pub mod ledge;
pub mod machine;
pub mod motion;
pub mod probe;
pub mod states;
pub mod timers;

#[cfg(test)]
mod tests;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::CharacterContent;
use crate::core::GameState;
use crate::damage::{Health, Team};
use crate::sprites::AnimationController;

pub use abilities::{Ability, AbilityRegistry};
pub use config::CharacterConfig;
pub use events::{AbilityUnlockedEvent, PogoBounceEvent};
pub use input::ActionInput;
pub use machine::StateMachine;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Water volumes (probed, never solid)
    Water,
    /// Player character
    Player,
    /// Enemy characters and strikeable props
    Enemy,
    /// Sensors (pickups, triggers) - should not block movement
    Sensor,
    /// Player hitboxes (damage enemies)
    PlayerHitbox,
    /// Enemy hitboxes (damage player)
    EnemyHitbox,
}

#[derive(Component, Debug)]
pub struct Player;

pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionInput>()
            .add_message::<AbilityUnlockedEvent>()
            .add_message::<PogoBounceEvent>()
            .add_systems(
                Startup,
                init_character_resources.after(crate::content::load_content),
            )
            .add_systems(OnEnter(GameState::Run), spawn_player)
            .add_systems(
                Update,
                (
                    input::read_input,
                    probe::probe_ground,
                    probe::probe_walls,
                    probe::probe_ceiling,
                    probe::probe_water,
                    probe::probe_ledge,
                    driver::apply_player_damage,
                    driver::handle_ability_unlocks,
                    driver::handle_pogo_bounce,
                    driver::frame_driver,
                )
                    .chain()
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                FixedUpdate,
                driver::fixed_driver.run_if(in_state(GameState::Run)),
            );
    }
}

/// Build the runtime tuning from loaded content (or defaults) and point
/// world gravity at the configured strength.
fn init_character_resources(
    mut commands: Commands,
    content: Res<CharacterContent>,
    mut gravity: ResMut<Gravity>,
) {
    let (config, registry) = match &content.character {
        Some(def) => (
            CharacterConfig::from_def(def),
            AbilityRegistry::from_def(&def.abilities),
        ),
        None => (
            CharacterConfig::default(),
            AbilityRegistry::from_def(&Default::default()),
        ),
    };
    gravity.0 = Vec2::NEG_Y * config.movement.gravity;
    info!("Character tuning ready; {}", registry.summary());
    commands.insert_resource(config);
    commands.insert_resource(registry);
}

pub(crate) fn spawn_player(
    mut commands: Commands,
    config: Res<CharacterConfig>,
    existing: Query<Entity, With<Player>>,
) {
    if !existing.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let spawn = crate::world::PLAYER_SPAWN;
    info!("Spawning player at {spawn}");

    commands.spawn((
        (
            Player,
            Team::Player,
            StateMachine::default(),
            context::StateContext::default(),
            timers::TimerBank::default(),
            combo::ComboTracker::default(),
            probe::EnvProbe::default(),
        ),
        (
            Health::new(config.max_health),
            AnimationController::default(),
        ),
        Sprite {
            color: Color::srgb(0.55, 0.78, 0.95),
            custom_size: Some(Vec2::new(24.0, 48.0)),
            ..default()
        },
        Transform::from_xyz(spawn.x, spawn.y, 0.0),
        (
            RigidBody::Dynamic,
            Collider::rectangle(24.0, 48.0),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(1.0),
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [
                    GameLayer::Ground,
                    GameLayer::Wall,
                    GameLayer::EnemyHitbox,
                    GameLayer::Sensor,
                ],
            ),
        ),
    ));
}
