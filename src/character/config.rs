//! Character domain: immutable tuning configuration.
//!
//! Built once at startup from the loaded `CharacterDef` (or from the
//! built-in defaults when loading failed) and never mutated by gameplay.
//! Ability unlocks live in `AbilityRegistry`, not here.

use bevy::prelude::*;

use crate::content::{CharacterDef, ComboHitDef, CurveDef};

// ============================================================================
// Curves
// ============================================================================

/// Runtime interpolation curve, sampled over a normalized 0..1 input.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MotionCurve {
    Linear,
    #[default]
    Smooth,
    EaseIn,
    EaseOut,
    Points(Vec<(f32, f32)>),
}

impl MotionCurve {
    pub fn from_def(def: &CurveDef) -> Self {
        match def {
            CurveDef::Linear => Self::Linear,
            CurveDef::Smooth => Self::Smooth,
            CurveDef::EaseIn => Self::EaseIn,
            CurveDef::EaseOut => Self::EaseOut,
            CurveDef::Points(points) => Self::Points(points.clone()),
        }
    }

    /// Sample the curve. Input is clamped to 0..1.
    pub fn sample(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => t * t * (3.0 - 2.0 * t),
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::Points(points) => sample_points(points, t),
        }
    }
}

fn sample_points(points: &[(f32, f32)], t: f32) -> f32 {
    let Some(&(first_t, first_v)) = points.first() else {
        return t;
    };
    if t <= first_t {
        return first_v;
    }
    for pair in points.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if t <= t1 {
            let span = (t1 - t0).max(f32::EPSILON);
            return v0 + (v1 - v0) * ((t - t0) / span);
        }
    }
    points[points.len() - 1].1
}

// ============================================================================
// Config groups
// ============================================================================

#[derive(Debug, Clone)]
pub struct MovementConfig {
    pub move_speed: f32,
    pub run_speed: f32,
    pub ground_smooth_time: f32,
    pub air_control_mult: f32,
    pub air_accel: f32,
    pub max_air_speed: f32,
    pub air_drift_decay: f32,
    pub gravity: f32,
}

#[derive(Debug, Clone)]
pub struct JumpConfig {
    pub force: f32,
    pub cut_multiplier: f32,
    pub coyote_time: f32,
    pub buffer_time: f32,
    pub momentum_grace_time: f32,
    pub double_jump_force: f32,
    pub wall_jump_horizontal: f32,
    pub wall_jump_vertical: f32,
    pub water_jump_force: f32,
    pub water_jump_cooldown: f32,
}

#[derive(Debug, Clone)]
pub struct DashConfig {
    pub speed: f32,
    pub duration: f32,
    pub cooldown: f32,
    pub end_slowdown: f32,
    pub normalize_diagonal: bool,
    pub max_air_dashes: u8,
    pub reset_air_dashes_on_ground: bool,
    pub swim_speed: f32,
    pub swim_duration: f32,
    pub swim_cooldown: f32,
}

#[derive(Debug, Clone)]
pub struct WallConfig {
    pub slide_speed: f32,
    pub accel_time: f32,
    pub decel_time: f32,
    pub accel_curve: MotionCurve,
    pub decel_curve: MotionCurve,
    pub lock_speed: f32,
    pub lock_engage_time: f32,
    pub lock_disengage_time: f32,
    pub lock_curve: MotionCurve,
    pub lock_hold_threshold: f32,
}

#[derive(Debug, Clone)]
pub struct SwimConfig {
    pub speed: f32,
    pub fast_speed: f32,
    pub accel: f32,
    pub surface_offset: f32,
    pub buoyancy_strength: f32,
    pub buoyancy_damping: f32,
    pub max_buoyancy_force: f32,
    pub overshoot_soft: f32,
    pub overshoot_force: f32,
    pub overshoot_hard: f32,
    pub overshoot_lerp: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub bob_smooth_time: f32,
}

#[derive(Debug, Clone)]
pub struct LedgeConfig {
    pub probe_forward: f32,
    pub probe_rise: f32,
    pub probe_depth: f32,
    pub wall_check_inset: f32,
    pub grab_offset_x: f32,
    pub grab_offset_y: f32,
    pub grab_window: f32,
    pub min_hold_time: f32,
    pub climb_duration: f32,
    pub climb_hop: f32,
    pub release_impulse: f32,
    pub regrab_cooldown: f32,
}

#[derive(Debug, Clone)]
pub struct ComboHitConfig {
    pub damage: f32,
    pub knockback: f32,
    pub range: f32,
    pub duration: f32,
    pub cooldown: f32,
    pub forward_force: f32,
    pub upward_force: f32,
}

#[derive(Debug, Clone)]
pub struct ComboConfig {
    pub window: f32,
    pub reset_time: f32,
    pub hits: Vec<ComboHitConfig>,
    pub pogo_range: f32,
    pub pogo_cooldown: f32,
    pub pogo_damage: f32,
}

impl ComboConfig {
    pub fn max_hits(&self) -> usize {
        self.hits.len()
    }

    /// Per-hit tuning. Index is clamped to the configured range; callers
    /// must not call this with an empty hit list (attacking is refused
    /// upstream when no hits are configured).
    pub fn hit(&self, index: usize) -> &ComboHitConfig {
        let i = index.min(self.hits.len().saturating_sub(1));
        &self.hits[i]
    }
}

#[derive(Debug, Clone)]
pub struct KnockbackConfig {
    pub force: f32,
    pub duration: f32,
}

// ============================================================================
// Top-level config resource
// ============================================================================

#[derive(Resource, Debug, Clone)]
pub struct CharacterConfig {
    pub max_health: f32,
    pub hurt_invuln_seconds: f32,
    pub movement: MovementConfig,
    pub jump: JumpConfig,
    pub dash: DashConfig,
    pub wall: WallConfig,
    pub swim: SwimConfig,
    pub ledge: LedgeConfig,
    pub combo: ComboConfig,
    pub knockback: KnockbackConfig,
}

impl CharacterConfig {
    pub fn from_def(def: &CharacterDef) -> Self {
        Self {
            max_health: def.health.max,
            hurt_invuln_seconds: def.health.hurt_invuln_seconds,
            movement: MovementConfig {
                move_speed: def.movement.move_speed,
                run_speed: def.movement.run_speed,
                ground_smooth_time: def.movement.ground_smooth_time,
                air_control_mult: def.movement.air_control_mult,
                air_accel: def.movement.air_accel,
                max_air_speed: def.movement.max_air_speed,
                air_drift_decay: def.movement.air_drift_decay,
                gravity: def.movement.gravity,
            },
            jump: JumpConfig {
                force: def.jump.force,
                cut_multiplier: def.jump.cut_multiplier,
                coyote_time: def.jump.coyote_time,
                buffer_time: def.jump.buffer_time,
                momentum_grace_time: def.jump.momentum_grace_time,
                double_jump_force: def.jump.double_jump_force,
                wall_jump_horizontal: def.jump.wall_jump_horizontal,
                wall_jump_vertical: def.jump.wall_jump_vertical,
                water_jump_force: def.jump.water_jump_force,
                water_jump_cooldown: def.jump.water_jump_cooldown,
            },
            dash: DashConfig {
                speed: def.dash.speed,
                duration: def.dash.duration,
                cooldown: def.dash.cooldown,
                end_slowdown: def.dash.end_slowdown,
                normalize_diagonal: def.dash.normalize_diagonal,
                max_air_dashes: def.dash.max_air_dashes,
                reset_air_dashes_on_ground: def.dash.reset_air_dashes_on_ground,
                swim_speed: def.dash.swim_speed,
                swim_duration: def.dash.swim_duration,
                swim_cooldown: def.dash.swim_cooldown,
            },
            wall: WallConfig {
                slide_speed: def.wall.slide_speed,
                accel_time: def.wall.accel_time,
                decel_time: def.wall.decel_time,
                accel_curve: MotionCurve::from_def(&def.wall.accel_curve),
                decel_curve: MotionCurve::from_def(&def.wall.decel_curve),
                lock_speed: def.wall.lock_speed,
                lock_engage_time: def.wall.lock_engage_time,
                lock_disengage_time: def.wall.lock_disengage_time,
                lock_curve: MotionCurve::from_def(&def.wall.lock_curve),
                lock_hold_threshold: def.wall.lock_hold_threshold,
            },
            swim: SwimConfig {
                speed: def.swim.speed,
                fast_speed: def.swim.fast_speed,
                accel: def.swim.accel,
                surface_offset: def.swim.surface_offset,
                buoyancy_strength: def.swim.buoyancy_strength,
                buoyancy_damping: def.swim.buoyancy_damping,
                max_buoyancy_force: def.swim.max_buoyancy_force,
                overshoot_soft: def.swim.overshoot_soft,
                overshoot_force: def.swim.overshoot_force,
                overshoot_hard: def.swim.overshoot_hard,
                overshoot_lerp: def.swim.overshoot_lerp,
                bob_amplitude: def.swim.bob_amplitude,
                bob_frequency: def.swim.bob_frequency,
                bob_smooth_time: def.swim.bob_smooth_time,
            },
            ledge: LedgeConfig {
                probe_forward: def.ledge.probe_forward,
                probe_rise: def.ledge.probe_rise,
                probe_depth: def.ledge.probe_depth,
                wall_check_inset: def.ledge.wall_check_inset,
                grab_offset_x: def.ledge.grab_offset_x,
                grab_offset_y: def.ledge.grab_offset_y,
                grab_window: def.ledge.grab_window,
                min_hold_time: def.ledge.min_hold_time,
                climb_duration: def.ledge.climb_duration,
                climb_hop: def.ledge.climb_hop,
                release_impulse: def.ledge.release_impulse,
                regrab_cooldown: def.ledge.regrab_cooldown,
            },
            combo: ComboConfig {
                window: def.combo.window,
                reset_time: def.combo.reset_time,
                hits: def.combo.hits.iter().map(ComboHitConfig::from_def).collect(),
                pogo_range: def.combo.pogo_range,
                pogo_cooldown: def.combo.pogo_cooldown,
                pogo_damage: def.combo.pogo_damage,
            },
            knockback: KnockbackConfig {
                force: def.knockback.force,
                duration: def.knockback.duration,
            },
        }
    }
}

impl ComboHitConfig {
    fn from_def(def: &ComboHitDef) -> Self {
        Self {
            damage: def.damage,
            knockback: def.knockback,
            range: def.range,
            duration: def.duration,
            cooldown: def.cooldown,
            forward_force: def.forward_force,
            upward_force: def.upward_force,
        }
    }
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            hurt_invuln_seconds: 0.6,
            movement: MovementConfig {
                move_speed: 200.0,
                run_speed: 340.0,
                ground_smooth_time: 0.08,
                air_control_mult: 0.65,
                air_accel: 1700.0,
                max_air_speed: 340.0,
                air_drift_decay: 480.0,
                gravity: 1800.0,
            },
            jump: JumpConfig {
                force: 640.0,
                cut_multiplier: 0.5,
                coyote_time: 0.15,
                buffer_time: 0.12,
                momentum_grace_time: 0.25,
                double_jump_force: 560.0,
                wall_jump_horizontal: 380.0,
                wall_jump_vertical: 560.0,
                water_jump_force: 420.0,
                water_jump_cooldown: 0.35,
            },
            dash: DashConfig {
                speed: 900.0,
                duration: 0.16,
                cooldown: 0.45,
                end_slowdown: 0.45,
                normalize_diagonal: true,
                max_air_dashes: 1,
                reset_air_dashes_on_ground: true,
                swim_speed: 520.0,
                swim_duration: 0.22,
                swim_cooldown: 0.8,
            },
            wall: WallConfig {
                slide_speed: 140.0,
                accel_time: 0.25,
                decel_time: 0.2,
                accel_curve: MotionCurve::Smooth,
                decel_curve: MotionCurve::Smooth,
                lock_speed: 8.0,
                lock_engage_time: 0.18,
                lock_disengage_time: 0.15,
                lock_curve: MotionCurve::Smooth,
                lock_hold_threshold: 0.6,
            },
            swim: SwimConfig {
                speed: 160.0,
                fast_speed: 260.0,
                accel: 900.0,
                surface_offset: 18.0,
                buoyancy_strength: 14.0,
                buoyancy_damping: 4.0,
                max_buoyancy_force: 1600.0,
                overshoot_soft: 40.0,
                overshoot_force: 900.0,
                overshoot_hard: 120.0,
                overshoot_lerp: 10.0,
                bob_amplitude: 6.0,
                bob_frequency: 1.2,
                bob_smooth_time: 0.35,
            },
            ledge: LedgeConfig {
                probe_forward: 18.0,
                probe_rise: 26.0,
                probe_depth: 44.0,
                wall_check_inset: 6.0,
                grab_offset_x: 10.0,
                grab_offset_y: 0.85,
                grab_window: 48.0,
                min_hold_time: 0.12,
                climb_duration: 0.3,
                climb_hop: 160.0,
                release_impulse: 260.0,
                regrab_cooldown: 0.3,
            },
            combo: ComboConfig {
                window: 0.35,
                reset_time: 0.4,
                hits: vec![
                    ComboHitConfig {
                        damage: 8.0,
                        knockback: 160.0,
                        range: 34.0,
                        duration: 0.22,
                        cooldown: 0.08,
                        forward_force: 60.0,
                        upward_force: 0.0,
                    },
                    ComboHitConfig {
                        damage: 10.0,
                        knockback: 180.0,
                        range: 36.0,
                        duration: 0.24,
                        cooldown: 0.1,
                        forward_force: 80.0,
                        upward_force: 0.0,
                    },
                    ComboHitConfig {
                        damage: 16.0,
                        knockback: 320.0,
                        range: 40.0,
                        duration: 0.32,
                        cooldown: 0.25,
                        forward_force: 40.0,
                        upward_force: 260.0,
                    },
                ],
                pogo_range: 30.0,
                pogo_cooldown: 0.18,
                pogo_damage: 10.0,
            },
            knockback: KnockbackConfig {
                force: 320.0,
                duration: 0.28,
            },
        }
    }
}
