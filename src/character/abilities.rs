//! Character domain: ability unlock registry.
//!
//! A small set of boolean gates consulted by transition guards. Starts
//! from the character file's flags; pickups in the world unlock the rest.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::content::StartingAbilitiesDef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ability {
    Run,
    Dash,
    WallJump,
    DoubleJump,
    WallLock,
    Pogo,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Run,
        Ability::Dash,
        Ability::WallJump,
        Ability::DoubleJump,
        Ability::WallLock,
        Ability::Pogo,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Run => "run",
            Ability::Dash => "dash",
            Ability::WallJump => "wall_jump",
            Ability::DoubleJump => "double_jump",
            Ability::WallLock => "wall_lock",
            Ability::Pogo => "pogo",
        }
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct AbilityRegistry {
    unlocked: HashSet<Ability>,
}

impl AbilityRegistry {
    pub fn from_def(def: &StartingAbilitiesDef) -> Self {
        let mut registry = Self::default();
        let flags = [
            (Ability::Run, def.run),
            (Ability::Dash, def.dash),
            (Ability::WallJump, def.wall_jump),
            (Ability::DoubleJump, def.double_jump),
            (Ability::WallLock, def.wall_lock),
            (Ability::Pogo, def.pogo),
        ];
        for (ability, unlocked) in flags {
            if unlocked {
                registry.unlocked.insert(ability);
            }
        }
        registry
    }

    /// Unlocks everything. Used by the debug overlay.
    #[cfg(feature = "dev-tools")]
    pub fn all_unlocked() -> Self {
        Self {
            unlocked: Ability::ALL.into_iter().collect(),
        }
    }

    pub fn has(&self, ability: Ability) -> bool {
        self.unlocked.contains(&ability)
    }

    /// Returns true if the ability was newly unlocked.
    pub fn unlock(&mut self, ability: Ability) -> bool {
        self.unlocked.insert(ability)
    }

    pub fn summary(&self) -> String {
        let names: Vec<&str> = Ability::ALL
            .iter()
            .filter(|a| self.has(**a))
            .map(|a| a.name())
            .collect();
        format!("Abilities unlocked: [{}]", names.join(", "))
    }
}
