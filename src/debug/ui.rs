//! Debug domain: overlay layout.

use bevy::prelude::*;

/// Marker for the dev overlay text block
#[derive(Component, Debug)]
pub struct DebugOverlay;

pub(crate) fn spawn_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugOverlay,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            top: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}
