mod character;
mod content;
mod core;
mod damage;
#[cfg(feature = "dev-tools")]
mod debug;
mod sprites;
mod world;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Thalassa".to_string(),
            resolution: (1280.0, 720.0).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .insert_resource(Time::<Fixed>::from_hz(60.0))
    .add_plugins((
        core::CorePlugin,
        content::ContentPlugin,
        character::CharacterPlugin,
        damage::DamagePlugin,
        world::WorldPlugin,
        sprites::SpritesPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
