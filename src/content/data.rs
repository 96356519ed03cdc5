//! Data definitions for the character content file.
//!
//! These structs mirror the structure in assets/data/character.ron and are
//! used for deserialization only; the runtime reads the immutable
//! `CharacterConfig` resource built from them at startup.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// File wrapper (character.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CharacterFile {
    pub schema_version: u32,
    pub character: CharacterDef,
}

// ============================================================================
// Character
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct CharacterDef {
    pub id: String,
    pub name: String,
    pub health: HealthDef,
    pub movement: MovementDef,
    pub jump: JumpDef,
    pub dash: DashDef,
    pub wall: WallDef,
    pub swim: SwimDef,
    pub ledge: LedgeDef,
    pub combo: ComboDef,
    pub knockback: KnockbackDef,
    pub abilities: StartingAbilitiesDef,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct HealthDef {
    pub max: f32,
    /// Invulnerability window after taking a hit, in seconds.
    pub hurt_invuln_seconds: f32,
}

// ============================================================================
// Locomotion
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct MovementDef {
    pub move_speed: f32,
    pub run_speed: f32,
    /// Smoothing time for the critically damped ground filter.
    pub ground_smooth_time: f32,
    pub air_control_mult: f32,
    pub air_accel: f32,
    pub max_air_speed: f32,
    /// Horizontal decay rate (units/s per second) with no air input.
    pub air_drift_decay: f32,
    pub gravity: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct JumpDef {
    pub force: f32,
    /// Upward velocity multiplier applied when jump is released early.
    pub cut_multiplier: f32,
    pub coyote_time: f32,
    pub buffer_time: f32,
    /// Grace window after a running jump during which air control leaves
    /// horizontal velocity untouched.
    pub momentum_grace_time: f32,
    pub double_jump_force: f32,
    pub wall_jump_horizontal: f32,
    pub wall_jump_vertical: f32,
    pub water_jump_force: f32,
    pub water_jump_cooldown: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct DashDef {
    pub speed: f32,
    pub duration: f32,
    pub cooldown: f32,
    /// Velocity scale applied when the dash ends.
    pub end_slowdown: f32,
    /// Normalize diagonal dash input instead of dashing faster on diagonals.
    pub normalize_diagonal: bool,
    pub max_air_dashes: u8,
    pub reset_air_dashes_on_ground: bool,
    /// Underwater dash variant.
    pub swim_speed: f32,
    pub swim_duration: f32,
    pub swim_cooldown: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct WallDef {
    pub slide_speed: f32,
    /// Window over which the fall cap ramps from zero up to slide_speed.
    pub accel_time: f32,
    /// Window over which the cap ramps back down when pressing away.
    pub decel_time: f32,
    pub accel_curve: CurveDef,
    pub decel_curve: CurveDef,
    /// Near-zero slide speed while wall-locked.
    pub lock_speed: f32,
    pub lock_engage_time: f32,
    pub lock_disengage_time: f32,
    pub lock_curve: CurveDef,
    /// Minimum axis magnitude toward the wall that counts as pressing hard
    /// enough to engage wall-lock.
    pub lock_hold_threshold: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct SwimDef {
    pub speed: f32,
    /// Speed while the run modifier is held.
    pub fast_speed: f32,
    pub accel: f32,
    /// Rest depth of the body center below the water surface.
    pub surface_offset: f32,
    pub buoyancy_strength: f32,
    pub buoyancy_damping: f32,
    pub max_buoyancy_force: f32,
    /// Depth error beyond which extra downward force is applied.
    pub overshoot_soft: f32,
    pub overshoot_force: f32,
    /// Depth error beyond which position is corrected directly.
    pub overshoot_hard: f32,
    /// Per-second lerp rate for the hard correction tier.
    pub overshoot_lerp: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub bob_smooth_time: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct LedgeDef {
    /// Horizontal reach of the corner probe beyond the collider edge.
    pub probe_forward: f32,
    /// Height above the collider top where the corner probe starts.
    pub probe_rise: f32,
    /// Length of the downward corner cast.
    pub probe_depth: f32,
    /// How far below the found corner the wall verification ray runs.
    pub wall_check_inset: f32,
    /// Horizontal grab anchor offset back from the corner, absolute units.
    pub grab_offset_x: f32,
    /// Vertical grab anchor offset as a fraction of player height below the
    /// ledge top.
    pub grab_offset_y: f32,
    /// Vertical window below the ledge top inside which a falling player
    /// auto-grabs.
    pub grab_window: f32,
    /// Hold time before climb input is accepted.
    pub min_hold_time: f32,
    pub climb_duration: f32,
    /// Small upward velocity applied when the climb completes.
    pub climb_hop: f32,
    pub release_impulse: f32,
    pub regrab_cooldown: f32,
}

// ============================================================================
// Combat
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct ComboDef {
    /// Window after a hit during which the next hit may chain.
    pub window: f32,
    /// Delay after the window closes before the chain resets to zero.
    pub reset_time: f32,
    pub hits: Vec<ComboHitDef>,
    /// Downward air strike (pogo) reach and re-strike delay.
    pub pogo_range: f32,
    pub pogo_cooldown: f32,
    pub pogo_damage: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct ComboHitDef {
    pub damage: f32,
    pub knockback: f32,
    pub range: f32,
    pub duration: f32,
    pub cooldown: f32,
    pub forward_force: f32,
    pub upward_force: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct KnockbackDef {
    pub force: f32,
    pub duration: f32,
}

// ============================================================================
// Abilities
// ============================================================================

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Reflect)]
pub struct StartingAbilitiesDef {
    pub run: bool,
    pub dash: bool,
    pub wall_jump: bool,
    pub double_jump: bool,
    pub wall_lock: bool,
    pub pogo: bool,
}

impl Default for StartingAbilitiesDef {
    fn default() -> Self {
        Self {
            run: true,
            dash: true,
            wall_jump: true,
            double_jump: false,
            wall_lock: false,
            pogo: false,
        }
    }
}

// ============================================================================
// Curves
// ============================================================================

/// Shape of a 0..1 -> 0..1 interpolation curve used by wall slide ramps and
/// wall-lock blending.
#[derive(Debug, Clone, Deserialize, Serialize, Reflect, Default, PartialEq)]
pub enum CurveDef {
    Linear,
    /// Smoothstep ease on both ends.
    #[default]
    Smooth,
    EaseIn,
    EaseOut,
    /// Piecewise-linear keyframes as (t, value) pairs; t ascending in 0..1.
    Points(Vec<(f32, f32)>),
}
