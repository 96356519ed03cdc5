//! Character domain: shared bookkeeping visible to every state.

use bevy::prelude::*;

use super::combo::StrikeRequest;
use super::ledge::LedgeTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn from_sign(x: f32) -> Self {
        if x < 0.0 { Facing::Left } else { Facing::Right }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallContact {
    #[default]
    None,
    Left,
    Right,
}

impl WallContact {
    /// Direction from the player toward the wall, zero when not touching.
    pub fn sign(&self) -> f32 {
        match self {
            WallContact::None => 0.0,
            WallContact::Left => -1.0,
            WallContact::Right => 1.0,
        }
    }
}

/// Which impulse the jump state applies on entry. Set by the requesting
/// state just before transitioning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JumpKind {
    Ground,
    Double,
    Wall { away_sign: f32 },
    Water,
}

/// Mutable bookkeeping shared across states. Environment flags are cached
/// from the probe once per frame tick; the rest is written by whichever
/// state or gate owns the concern.
#[derive(Component, Debug, Clone)]
pub struct StateContext {
    pub facing: Facing,

    // Cached environment flags, refreshed each frame tick
    pub grounded: bool,
    pub was_grounded: bool,
    pub wall: WallContact,
    pub ceiling: bool,
    pub in_water: bool,
    pub water_surface: f32,
    pub ledge: Option<LedgeTarget>,
    /// The ledge currently being hung on or climbed.
    pub active_ledge: Option<LedgeTarget>,

    // Air action bookkeeping
    pub air_dash_count: u8,
    pub double_jump_used: bool,
    /// Impulse kind for the next jump state entry.
    pub pending_jump: Option<JumpKind>,
    /// Upward bounce force waiting to be applied by the air state.
    pub pending_bounce: Option<f32>,
    /// Strikes decided this frame, drained into messages by the controller.
    pub pending_strikes: Vec<StrikeRequest>,

    // Knockback, set by the damage gate and consumed by the air state
    pub knockback_dir: Vec2,

    // Smoothing memories
    pub ground_smooth_vel: f32,
    pub float_offset: f32,
    pub bob_velocity: f32,
    pub bob_phase: f32,
}

impl Default for StateContext {
    fn default() -> Self {
        Self {
            facing: Facing::Right,
            grounded: false,
            was_grounded: false,
            wall: WallContact::None,
            ceiling: false,
            in_water: false,
            water_surface: 0.0,
            ledge: None,
            active_ledge: None,
            air_dash_count: 0,
            double_jump_used: false,
            pending_jump: None,
            pending_bounce: None,
            pending_strikes: Vec::new(),
            knockback_dir: Vec2::ZERO,
            ground_smooth_vel: 0.0,
            float_offset: 0.0,
            bob_velocity: 0.0,
            bob_phase: 0.0,
        }
    }
}

impl StateContext {
    /// Clears the per-flight counters when the character lands.
    pub fn reset_air_actions(&mut self, reset_dashes: bool) {
        if reset_dashes {
            self.air_dash_count = 0;
        }
        self.double_jump_used = false;
    }
}
