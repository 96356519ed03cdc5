//! Damage domain: health, teams, and strike resolution.
//!
//! The character module decides strikes and consumes damage; this module
//! owns the hitbox entities in between and the health bookkeeping on both
//! ends.

pub mod events;
pub mod systems;

use bevy::prelude::*;

pub use events::{DamageEvent, DeathEvent, StrikeEvent};
pub use systems::{Hitbox, HitboxLifetime};

use crate::core::GameState;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Player,
    Enemy,
}

#[derive(Component, Debug)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Remove up to `amount`, never below zero. Returns the amount
    /// actually removed.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.clamp(0.0, self.current);
        self.current -= actual;
        actual
    }

    /// Restore up to `amount`, never above max. Returns the amount
    /// actually restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        let actual = amount.clamp(0.0, self.max - self.current);
        self.current += actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

pub struct DamagePlugin;

impl Plugin for DamagePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<StrikeEvent>()
            .add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_systems(
                Update,
                (
                    systems::spawn_strike_hitboxes,
                    systems::cleanup_expired_hitboxes,
                    systems::detect_strike_hits,
                    systems::apply_enemy_damage,
                )
                    .chain()
                    .after(crate::character::driver::frame_driver)
                    .run_if(in_state(GameState::Run)),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut health = Health::new(30.0);
        assert_eq!(health.take_damage(50.0), 30.0);
        assert_eq!(health.current, 0.0);
        assert!(health.is_dead());
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut health = Health::new(100.0);
        health.take_damage(40.0);
        assert_eq!(health.heal(1000.0), 40.0);
        assert_eq!(health.current, health.max);
    }

    #[test]
    fn test_negative_amounts_are_ignored() {
        let mut health = Health::new(100.0);
        assert_eq!(health.take_damage(-5.0), 0.0);
        assert_eq!(health.heal(-5.0), 0.0);
        assert_eq!(health.current, 100.0);
    }
}
