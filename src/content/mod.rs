//! Content domain: RON-backed character tuning data.
//!
//! Loads `assets/data/character.ron` once at startup. A missing or
//! malformed file is logged and the built-in defaults are used instead,
//! so the game always boots.

pub mod data;
pub mod loader;


use bevy::prelude::*;
use std::path::Path;

pub use data::{
    CharacterDef, CharacterFile, ComboDef, ComboHitDef, CurveDef, DashDef, HealthDef, JumpDef,
    KnockbackDef, LedgeDef, MovementDef, StartingAbilitiesDef, SwimDef, WallDef,
};
pub use loader::{ContentLoadError, load_character_file, parse_character_file};

use crate::core::GameState;

/// Expected schema version for character.ron.
pub const SCHEMA_VERSION: u32 = 1;

/// Holds the loaded character definition, if any. Consumers fall back to
/// built-in defaults when `character` is `None`.
#[derive(Resource, Default)]
pub struct CharacterContent {
    pub character: Option<CharacterDef>,
}

impl CharacterContent {
    /// Returns a summary of the loaded character for logging.
    pub fn summary(&self) -> String {
        match &self.character {
            Some(def) => format!(
                "Character '{}' loaded: {} combo hits, abilities [run={}, dash={}, wall_jump={}, double_jump={}, wall_lock={}, pogo={}]",
                def.name,
                def.combo.hits.len(),
                def.abilities.run,
                def.abilities.dash,
                def.abilities.wall_jump,
                def.abilities.double_jump,
                def.abilities.wall_lock,
                def.abilities.pogo,
            ),
            None => "No character data loaded, using built-in defaults".to_string(),
        }
    }
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<data::CharacterDef>()
            .register_type::<data::HealthDef>()
            .register_type::<data::MovementDef>()
            .register_type::<data::JumpDef>()
            .register_type::<data::DashDef>()
            .register_type::<data::WallDef>()
            .register_type::<data::SwimDef>()
            .register_type::<data::LedgeDef>()
            .register_type::<data::ComboDef>()
            .register_type::<data::ComboHitDef>()
            .register_type::<data::KnockbackDef>()
            .register_type::<data::StartingAbilitiesDef>()
            .register_type::<data::CurveDef>()
            .init_resource::<CharacterContent>()
            .add_systems(Startup, (load_content, finish_boot).chain());
    }
}

/// Load the character file at startup. Failures are logged and leave the
/// default (empty) content in place.
pub(crate) fn load_content(mut content: ResMut<CharacterContent>) {
    let path = Path::new("assets/data/character.ron");
    match load_character_file(path) {
        Ok(file) => {
            if file.schema_version != SCHEMA_VERSION {
                warn!(
                    "character.ron schema_version {} (expected {}), loading anyway",
                    file.schema_version, SCHEMA_VERSION
                );
            }
            content.character = Some(file.character);
        }
        Err(e) => {
            warn!("{}, using built-in defaults", e);
        }
    }
    info!("{}", content.summary());
}

/// Content is loaded synchronously, so boot completes on the first frame.
pub(crate) fn finish_boot(mut game_state: ResMut<NextState<GameState>>) {
    game_state.set(GameState::Run);
}
