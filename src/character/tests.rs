//! Character domain: harness-driven tests for the state machine.
//!
//! The harness owns every component the controller normally borrows and
//! mirrors the frame-tick sequence (probe fold, grace windows, timer
//! decrement, gate transitions, input, update) plus the fixed tick, so
//! the machine runs here exactly as it does in the app, minus physics
//! integration. Gravity is simulated where a test needs it by writing
//! the velocity directly between ticks.

use avian2d::prelude::{GravityScale, LinearVelocity, Position};
use bevy::prelude::Vec2;

use super::abilities::{Ability, AbilityRegistry};
use super::combo::{ComboTracker, StrikeKind, StrikeRequest};
use super::config::{CharacterConfig, MotionCurve};
use super::context::{Facing, StateContext, WallContact};
use super::input::ActionInput;
use super::ledge::{LedgeTarget, build_target, within_grab_window};
use super::machine::StateMachine;
use super::motion::dash::dash_direction;
use super::motion::knockback::knockback_tick;
use super::motion::swim::buoyancy_tick;
use super::motion::{move_toward, smooth_damp};
use super::probe::EnvProbe;
use super::states::{StateCtx, StateId, make_states};
use super::timers::{Countdown, TimerBank};
use crate::content::StartingAbilitiesDef;
use crate::sprites::AnimationController;

const FRAME: f32 = 1.0 / 60.0;

// -----------------------------------------------------------------------------
// Harness
// -----------------------------------------------------------------------------

/// Owned stand-ins for the controller's borrows.
struct Harness {
    machine: StateMachine,
    probe: EnvProbe,
    input: ActionInput,
    config: CharacterConfig,
    abilities: AbilityRegistry,
    timers: TimerBank,
    shared: StateContext,
    combo: ComboTracker,
    velocity: LinearVelocity,
    gravity: GravityScale,
    position: Position,
    anim: AnimationController,
    half: Vec2,
    /// Strikes drained each frame, as the controller drains them into
    /// messages.
    strikes: Vec<StrikeRequest>,
}

impl Harness {
    /// Standing on the ground with the starting ability set.
    fn grounded() -> Self {
        let mut harness = Self {
            machine: StateMachine::default(),
            probe: EnvProbe {
                grounded: true,
                ..Default::default()
            },
            input: ActionInput::default(),
            config: CharacterConfig::default(),
            abilities: AbilityRegistry::from_def(&StartingAbilitiesDef::default()),
            timers: TimerBank::default(),
            shared: StateContext::default(),
            combo: ComboTracker::default(),
            velocity: LinearVelocity::default(),
            gravity: GravityScale(1.0),
            position: Position::default(),
            anim: AnimationController::default(),
            half: Vec2::new(12.0, 24.0),
            strikes: Vec::new(),
        };
        harness.shared.grounded = true;
        harness
    }

    /// Airborne, already past the coyote window.
    fn airborne() -> Self {
        let mut harness = Self::grounded();
        harness.probe.grounded = false;
        harness.shared.grounded = false;
        harness.step(FRAME);
        for _ in 0..14 {
            harness.step(FRAME);
        }
        assert_eq!(harness.state(), StateId::Air);
        assert!(!harness.timers.coyote.active());
        harness
    }

    fn unlock_all(&mut self) {
        for ability in Ability::ALL {
            self.abilities.unlock(ability);
        }
    }

    fn state(&self) -> StateId {
        self.machine.current()
    }

    /// One frame tick, mirroring the controller's sequence. Edge flags
    /// are cleared afterwards, as the input reader would on the next
    /// sample.
    fn frame(&mut self, dt: f32) {
        self.shared.was_grounded = self.shared.grounded;
        self.shared.grounded = self.probe.grounded;
        self.shared.wall = self.probe.wall;
        self.shared.ceiling = self.probe.ceiling;
        self.shared.in_water = self.probe.in_water;
        self.shared.water_surface = self.probe.water_surface;
        self.shared.ledge = self.probe.ledge;

        if self.shared.grounded && !self.shared.was_grounded {
            self.shared
                .reset_air_actions(self.config.dash.reset_air_dashes_on_ground);
        }
        if self.shared.grounded {
            self.timers.coyote.start(self.config.jump.coyote_time);
        }
        if self.input.jump_just_pressed {
            self.timers.jump_buffer.start(self.config.jump.buffer_time);
        }

        self.timers.tick_all(dt);
        self.combo.frame_tick(&mut self.timers, &self.config.combo);

        if self.input.has_move()
            && !self.timers.knockback.active()
            && !matches!(
                self.machine.current(),
                StateId::Dash | StateId::Combat | StateId::LedgeGrab | StateId::LedgeClimb
            )
        {
            self.shared.facing = Facing::from_sign(self.input.axis.x);
        }

        let half = self.half;
        let mut ctx = StateCtx {
            dt,
            input: &self.input,
            config: &self.config,
            abilities: &self.abilities,
            timers: &mut self.timers,
            shared: &mut self.shared,
            combo: &mut self.combo,
            velocity: &mut self.velocity,
            gravity: &mut self.gravity,
            position: &mut self.position,
            anim: &mut self.anim,
        };
        self.machine.ensure_started(&mut ctx);

        if ctx.timers.knockback.active()
            && !ctx.shared.in_water
            && self.machine.current() != StateId::Air
        {
            self.machine.change_state(StateId::Air, &mut ctx);
        }
        if ctx.shared.pending_bounce.is_some() && self.machine.current() != StateId::Air {
            self.machine.change_state(StateId::Air, &mut ctx);
        }
        if let Some(target) = ctx.shared.ledge
            && ctx.velocity.y < 0.0
            && !ctx.timers.knockback.active()
            && !matches!(
                self.machine.current(),
                StateId::LedgeGrab | StateId::LedgeClimb
            )
            && within_grab_window(&target, ctx.position.0, half, &ctx.config.ledge)
        {
            ctx.shared.active_ledge = Some(target);
            self.machine.change_state(StateId::LedgeGrab, &mut ctx);
        }
        if ctx.shared.in_water
            && ctx.velocity.y <= 0.0
            && !matches!(
                self.machine.current(),
                StateId::Swim | StateId::Dash | StateId::LedgeGrab | StateId::LedgeClimb
            )
        {
            self.machine.change_state(StateId::Swim, &mut ctx);
        }

        self.machine.handle_input(&mut ctx);
        self.machine.update(&mut ctx);
        drop(ctx);

        for strike in self.shared.pending_strikes.drain(..) {
            self.strikes.push(strike);
        }

        self.input.jump_just_pressed = false;
        self.input.jump_just_released = false;
        self.input.dash_just_pressed = false;
        self.input.attack_just_pressed = false;
    }

    /// One fixed tick.
    fn fixed(&mut self, dt: f32) {
        let mut ctx = StateCtx {
            dt,
            input: &self.input,
            config: &self.config,
            abilities: &self.abilities,
            timers: &mut self.timers,
            shared: &mut self.shared,
            combo: &mut self.combo,
            velocity: &mut self.velocity,
            gravity: &mut self.gravity,
            position: &mut self.position,
            anim: &mut self.anim,
        };
        self.machine.ensure_started(&mut ctx);
        self.machine.fixed_update(&mut ctx);
    }

    fn step(&mut self, dt: f32) {
        self.frame(dt);
        self.fixed(dt);
    }

    /// Mirror of the controller's damage intake, minus message plumbing.
    fn hit_from(&mut self, source: Vec2) {
        if self.timers.hurt_invuln.active() {
            return;
        }
        self.shared.knockback_dir = (self.position.0 - source).normalize_or(Vec2::Y);
        self.timers.knockback.start(self.config.knockback.duration);
        self.timers
            .hurt_invuln
            .start(self.config.hurt_invuln_seconds);
        self.combo.cancel(&mut self.timers);
    }
}

// -----------------------------------------------------------------------------
// Countdown tests
// -----------------------------------------------------------------------------

#[test]
fn test_countdown_reports_finish_exactly_once() {
    let mut countdown = Countdown::default();
    countdown.start(0.1);
    assert!(countdown.active());

    countdown.tick(0.05);
    assert!(countdown.active());
    assert!(!countdown.just_finished());

    countdown.tick(0.06);
    assert!(!countdown.active());
    assert!(countdown.just_finished());

    countdown.tick(0.05);
    assert!(!countdown.just_finished());
}

#[test]
fn test_countdown_restart_rewinds_fully() {
    let mut countdown = Countdown::default();
    countdown.start(0.2);
    countdown.tick(0.15);
    countdown.start(0.2);
    assert!((countdown.remaining() - 0.2).abs() < f32::EPSILON);
}

#[test]
fn test_countdown_clear_suppresses_finish_signal() {
    let mut countdown = Countdown::default();
    countdown.start(0.1);
    countdown.clear();
    countdown.tick(0.2);
    assert!(!countdown.just_finished());
    assert!(!countdown.active());
}

#[test]
fn test_countdown_negative_duration_clamps_to_zero() {
    let mut countdown = Countdown::default();
    countdown.start(-1.0);
    assert!(!countdown.active());
    assert_eq!(countdown.progress(), 1.0);
}

#[test]
fn test_countdown_progress_spans_zero_to_one() {
    let mut countdown = Countdown::default();
    countdown.start(0.4);
    assert_eq!(countdown.progress(), 0.0);
    countdown.tick(0.1);
    assert!((countdown.progress() - 0.25).abs() < 1e-5);
    countdown.tick(1.0);
    assert_eq!(countdown.progress(), 1.0);
}

// -----------------------------------------------------------------------------
// Curve tests
// -----------------------------------------------------------------------------

#[test]
fn test_curve_sample_clamps_input() {
    let curve = MotionCurve::Smooth;
    assert_eq!(curve.sample(-1.0), 0.0);
    assert_eq!(curve.sample(2.0), 1.0);
}

#[test]
fn test_curve_points_interpolates_between_knots() {
    let curve = MotionCurve::Points(vec![(0.0, 0.0), (0.5, 1.0), (1.0, 0.5)]);
    assert!((curve.sample(0.25) - 0.5).abs() < 1e-5);
    assert!((curve.sample(0.75) - 0.75).abs() < 1e-5);
    assert!((curve.sample(1.0) - 0.5).abs() < 1e-5);
}

#[test]
fn test_curve_points_empty_falls_back_to_linear() {
    let curve = MotionCurve::Points(Vec::new());
    assert!((curve.sample(0.3) - 0.3).abs() < 1e-5);
}

// -----------------------------------------------------------------------------
// Motion helper tests
// -----------------------------------------------------------------------------

#[test]
fn test_move_toward_is_bounded() {
    assert_eq!(move_toward(0.0, 10.0, 3.0), 3.0);
    assert_eq!(move_toward(0.0, 2.0, 5.0), 2.0);
    assert_eq!(move_toward(0.0, -10.0, 3.0), -3.0);
}

#[test]
fn test_smooth_damp_converges_without_overshoot() {
    let mut velocity = 0.0;
    let mut current = 0.0;
    for _ in 0..120 {
        current = smooth_damp(current, 100.0, &mut velocity, 0.08, FRAME);
        assert!(current <= 100.0 + 1e-3);
    }
    assert!((current - 100.0).abs() < 1.0);
}

#[test]
fn test_dash_direction_defaults_to_facing() {
    let cfg = CharacterConfig::default().dash;
    assert_eq!(dash_direction(Vec2::ZERO, Facing::Left, &cfg), Vec2::new(-1.0, 0.0));
    assert_eq!(dash_direction(Vec2::ZERO, Facing::Right, &cfg), Vec2::new(1.0, 0.0));
}

#[test]
fn test_dash_direction_normalizes_diagonals() {
    let cfg = CharacterConfig::default().dash;
    let dir = dash_direction(Vec2::new(1.0, 1.0), Facing::Right, &cfg);
    assert!((dir.length() - 1.0).abs() < 1e-5);
    assert!(dir.x > 0.0 && dir.y > 0.0);
}

#[test]
fn test_dash_direction_pure_vertical() {
    let cfg = CharacterConfig::default().dash;
    assert_eq!(dash_direction(Vec2::new(0.0, 1.0), Facing::Left, &cfg), Vec2::new(0.0, 1.0));
}

// -----------------------------------------------------------------------------
// Machine basics
// -----------------------------------------------------------------------------

#[test]
fn test_state_set_is_complete_and_ordered() {
    let states = make_states();
    assert_eq!(states.len(), StateId::COUNT);
    for (index, state) in states.iter().enumerate() {
        assert_eq!(state.id().index(), index);
    }
}

#[test]
fn test_exit_runs_before_enter() {
    let mut h = Harness::grounded();
    h.input.dash_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Dash);
    assert_eq!(h.velocity.x, h.config.dash.speed);

    // Forced transition out of the dash: the exit slowdown must already
    // be applied when the jump impulse goes in.
    let mut ctx = StateCtx {
        dt: FRAME,
        input: &h.input,
        config: &h.config,
        abilities: &h.abilities,
        timers: &mut h.timers,
        shared: &mut h.shared,
        combo: &mut h.combo,
        velocity: &mut h.velocity,
        gravity: &mut h.gravity,
        position: &mut h.position,
        anim: &mut h.anim,
    };
    h.machine.change_state(StateId::Jump, &mut ctx);
    drop(ctx);

    assert_eq!(h.velocity.x, h.config.dash.speed * h.config.dash.end_slowdown);
    assert_eq!(h.velocity.y, h.config.jump.force);
    assert_eq!(h.gravity.0, 1.0);
}

// -----------------------------------------------------------------------------
// Grounded locomotion
// -----------------------------------------------------------------------------

#[test]
fn test_idle_walk_run_follow_input() {
    let mut h = Harness::grounded();
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Idle);

    h.input.axis.x = 1.0;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Walk);

    h.input.run_held = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Run);

    h.input.run_held = false;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Walk);

    h.input.axis.x = 0.0;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Idle);
}

#[test]
fn test_run_requires_the_run_ability() {
    let mut h = Harness::grounded();
    h.abilities = AbilityRegistry::from_def(&StartingAbilitiesDef {
        run: false,
        ..Default::default()
    });
    h.input.axis.x = 1.0;
    h.input.run_held = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Walk);
}

#[test]
fn test_walk_accelerates_toward_move_speed() {
    let mut h = Harness::grounded();
    h.input.axis.x = 1.0;
    for _ in 0..40 {
        h.step(FRAME);
    }
    assert_eq!(h.state(), StateId::Walk);
    assert!(h.velocity.x > 0.0);
    assert!(h.velocity.x <= h.config.movement.move_speed + 1e-3);
    assert!((h.velocity.x - h.config.movement.move_speed).abs() < 5.0);
}

#[test]
fn test_ground_stop_is_instant() {
    let mut h = Harness::grounded();
    h.velocity.x = 150.0;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Idle);
    assert_eq!(h.velocity.x, 0.0);
}

#[test]
fn test_falling_off_ground_enters_air() {
    let mut h = Harness::grounded();
    h.step(FRAME);
    h.probe.grounded = false;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Air);
}

// -----------------------------------------------------------------------------
// Jump: impulse, buffer, coyote, cut
// -----------------------------------------------------------------------------

#[test]
fn test_ground_jump_applies_force_and_consumes_windows() {
    let mut h = Harness::grounded();
    h.input.jump_just_pressed = true;
    h.step(FRAME);

    assert_eq!(h.state(), StateId::Jump);
    assert_eq!(h.velocity.y, h.config.jump.force);
    assert!(!h.timers.jump_buffer.active());
    assert!(!h.timers.coyote.active());
}

#[test]
fn test_coyote_jump_shortly_after_leaving_ground() {
    let mut h = Harness::grounded();
    h.step(FRAME);

    h.probe.grounded = false;
    for _ in 0..4 {
        h.step(FRAME);
    }
    assert_eq!(h.state(), StateId::Air);
    assert!(h.timers.coyote.active());

    h.input.jump_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Jump);
    assert_eq!(h.velocity.y, h.config.jump.force);
    // A coyote jump is a ground jump, not a double jump.
    assert!(!h.shared.double_jump_used);
}

#[test]
fn test_coyote_window_expires() {
    let mut h = Harness::grounded();
    h.abilities = AbilityRegistry::from_def(&StartingAbilitiesDef {
        double_jump: false,
        ..Default::default()
    });
    h.step(FRAME);

    h.probe.grounded = false;
    for _ in 0..12 {
        h.step(FRAME);
    }
    assert!(!h.timers.coyote.active());

    h.input.jump_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Air);
    assert_eq!(h.velocity.y, 0.0);
}

#[test]
fn test_buffered_jump_fires_on_landing() {
    let mut h = Harness::airborne();
    h.velocity.y = -200.0;

    h.input.jump_just_pressed = true;
    h.step(FRAME);
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Air);
    assert!(h.timers.jump_buffer.active());

    h.probe.grounded = true;
    h.frame(FRAME);
    assert_eq!(h.state(), StateId::Jump);
    assert_eq!(h.velocity.y, h.config.jump.force);
    assert!(!h.timers.jump_buffer.active());
}

#[test]
fn test_buffer_expires_before_landing() {
    let mut h = Harness::airborne();
    h.velocity.y = -200.0;

    h.input.jump_just_pressed = true;
    for _ in 0..10 {
        h.step(FRAME);
    }
    assert!(!h.timers.jump_buffer.active());

    h.probe.grounded = true;
    h.velocity.y = 0.0;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Idle);
}

#[test]
fn test_jump_cut_scales_rising_velocity_once() {
    let mut h = Harness::grounded();
    h.input.jump_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.velocity.y, h.config.jump.force);

    h.probe.grounded = false;
    h.input.jump_just_released = true;
    h.step(FRAME);
    let cut = h.config.jump.force * h.config.jump.cut_multiplier;
    assert_eq!(h.velocity.y, cut);

    // No further scaling on later ticks.
    h.step(FRAME);
    assert_eq!(h.velocity.y, cut);
}

#[test]
fn test_jump_cut_ignored_after_apex() {
    let mut h = Harness::grounded();
    h.input.jump_just_pressed = true;
    h.step(FRAME);
    h.probe.grounded = false;

    h.velocity.y = -5.0;
    h.input.jump_just_released = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Air);
    assert_eq!(h.velocity.y, -5.0);
}

#[test]
fn test_ceiling_bonk_ends_the_rise() {
    let mut h = Harness::grounded();
    h.input.jump_just_pressed = true;
    h.step(FRAME);
    h.probe.grounded = false;
    h.probe.ceiling = true;

    h.step(FRAME);
    assert_eq!(h.velocity.y, 0.0);
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Air);
}

#[test]
fn test_running_jump_keeps_momentum_through_grace() {
    let mut h = Harness::grounded();
    h.input.axis.x = 1.0;
    h.input.run_held = true;
    for _ in 0..40 {
        h.step(FRAME);
    }
    assert_eq!(h.state(), StateId::Run);
    let speed = h.velocity.x;
    assert!(speed > h.config.movement.move_speed);

    h.input.jump_just_pressed = true;
    h.input.axis.x = 0.0;
    h.input.run_held = false;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Jump);
    assert!(h.timers.jump_momentum.active());

    // No input, but the grace window preserves the launch speed.
    h.probe.grounded = false;
    for _ in 0..5 {
        h.step(FRAME);
    }
    assert_eq!(h.velocity.x, speed);

    // After the grace expires the drift decay takes over.
    for _ in 0..20 {
        h.step(FRAME);
    }
    assert!(!h.timers.jump_momentum.active());
    assert!(h.velocity.x < speed);
}

// -----------------------------------------------------------------------------
// Double jump and wall jump
// -----------------------------------------------------------------------------

#[test]
fn test_double_jump_once_per_flight() {
    let mut h = Harness::airborne();
    h.unlock_all();
    h.velocity.y = -100.0;

    h.input.jump_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Jump);
    assert_eq!(h.velocity.y, h.config.jump.double_jump_force);
    assert!(h.shared.double_jump_used);

    // Second press mid-rise does nothing.
    h.input.jump_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Jump);
    assert_eq!(h.velocity.y, h.config.jump.double_jump_force);
}

#[test]
fn test_landing_refunds_double_jump() {
    let mut h = Harness::airborne();
    h.unlock_all();
    h.velocity.y = -100.0;
    h.input.jump_just_pressed = true;
    h.step(FRAME);
    assert!(h.shared.double_jump_used);

    h.velocity.y = -1.0;
    h.probe.grounded = true;
    h.step(FRAME);
    assert!(!h.shared.double_jump_used);
}

#[test]
fn test_wall_jump_pushes_away_and_refunds_double_jump() {
    let mut h = Harness::airborne();
    h.unlock_all();
    h.shared.double_jump_used = true;
    h.probe.wall = WallContact::Right;
    h.velocity.y = -150.0;

    h.input.jump_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Jump);
    assert_eq!(h.velocity.x, -h.config.jump.wall_jump_horizontal);
    assert_eq!(h.velocity.y, h.config.jump.wall_jump_vertical);
    assert!(!h.shared.double_jump_used);
}

// -----------------------------------------------------------------------------
// Dash
// -----------------------------------------------------------------------------

#[test]
fn test_ground_dash_moves_at_dash_speed_without_gravity() {
    let mut h = Harness::grounded();
    h.input.dash_just_pressed = true;
    h.step(FRAME);

    assert_eq!(h.state(), StateId::Dash);
    assert_eq!(h.velocity.x, h.config.dash.speed);
    assert_eq!(h.velocity.y, 0.0);
    assert_eq!(h.gravity.0, 0.0);
    assert!(h.timers.dash_cooldown.active());
}

#[test]
fn test_dash_ends_with_slowdown_and_restored_gravity() {
    let mut h = Harness::grounded();
    h.input.dash_just_pressed = true;
    h.step(FRAME);

    for _ in 0..20 {
        h.frame(FRAME);
        if h.state() != StateId::Dash {
            break;
        }
        h.fixed(FRAME);
    }
    assert_eq!(h.state(), StateId::Idle);
    assert_eq!(h.gravity.0, 1.0);
    assert_eq!(
        h.velocity.x,
        h.config.dash.speed * h.config.dash.end_slowdown
    );
}

#[test]
fn test_air_dash_budget_is_enforced() {
    let mut h = Harness::airborne();
    h.velocity.y = -50.0;

    h.input.dash_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Dash);
    assert_eq!(h.shared.air_dash_count, 1);

    // Ride out the dash and the cooldown.
    for _ in 0..40 {
        h.step(FRAME);
    }
    assert_eq!(h.state(), StateId::Air);
    assert!(!h.timers.dash_cooldown.active());

    // Budget spent: a second air dash is refused.
    h.input.dash_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Air);
    assert_eq!(h.shared.air_dash_count, 1);
}

#[test]
fn test_landing_restores_the_air_dash_budget() {
    let mut h = Harness::airborne();
    h.velocity.y = -50.0;
    h.input.dash_just_pressed = true;
    h.step(FRAME);
    for _ in 0..40 {
        h.step(FRAME);
    }
    assert_eq!(h.shared.air_dash_count, 1);

    h.velocity.y = 0.0;
    h.probe.grounded = true;
    h.step(FRAME);
    assert_eq!(h.shared.air_dash_count, 0);
}

#[test]
fn test_diagonal_dash_speed_matches_cardinal() {
    let mut h = Harness::grounded();
    h.input.axis = Vec2::new(1.0, 1.0);
    h.input.dash_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Dash);
    let speed = (h.velocity.x * h.velocity.x + h.velocity.y * h.velocity.y).sqrt();
    assert!((speed - h.config.dash.speed).abs() < 0.5);
}

#[test]
fn test_dash_cancels_combo() {
    let mut h = Harness::grounded();
    h.input.attack_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Combat);
    assert!(h.combo.attacking());

    h.input.dash_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Dash);
    assert!(!h.combo.attacking());
    assert_eq!(h.combo.current(), 0);
}

// -----------------------------------------------------------------------------
// Combo chain
// -----------------------------------------------------------------------------

#[test]
fn test_first_attack_starts_the_chain() {
    let mut h = Harness::grounded();
    h.input.attack_just_pressed = true;
    h.step(FRAME);

    assert_eq!(h.state(), StateId::Combat);
    assert!(h.combo.attacking());
    assert_eq!(h.combo.current(), 1);
    assert_eq!(h.strikes.len(), 1);
    assert_eq!(h.strikes[0].kind, StrikeKind::Combo(0));
}

#[test]
fn test_queued_press_chains_with_no_cooldown_gap() {
    let mut h = Harness::grounded();
    h.input.attack_just_pressed = true;
    h.step(FRAME);

    // Press again while hit 0 is still active: queues instead of starting.
    h.input.attack_just_pressed = true;
    h.step(FRAME);
    assert!(h.combo.queued());
    assert_eq!(h.strikes.len(), 1);

    for _ in 0..30 {
        h.step(FRAME);
        if h.strikes.len() >= 2 {
            break;
        }
    }
    assert_eq!(h.strikes.len(), 2);
    assert_eq!(h.strikes[1].kind, StrikeKind::Combo(1));
    assert_eq!(h.state(), StateId::Combat);
    assert!(h.combo.attacking());
    // Seamless chain: no inter-attack cooldown was started.
    assert!(!h.timers.attack_cooldown.active());
}

#[test]
fn test_full_chain_resets_immediately() {
    let mut h = Harness::grounded();
    h.input.attack_just_pressed = true;
    h.step(FRAME);

    // Queue through the whole chain, pressing once per active hit.
    for _ in 0..120 {
        if h.combo.attacking() && !h.combo.queued() {
            h.input.attack_just_pressed = true;
        }
        h.step(FRAME);
        if h.strikes.len() >= 3 && !h.combo.attacking() {
            break;
        }
    }

    assert_eq!(h.strikes.len(), 3);
    assert_eq!(h.strikes[2].kind, StrikeKind::Combo(2));
    // Chain closed: index reset at once, cooldown running, back to ground.
    assert_eq!(h.combo.current(), 0);
    assert!(h.timers.attack_cooldown.active());
    assert_eq!(h.state(), StateId::Idle);
}

#[test]
fn test_unqueued_hit_ends_into_its_cooldown() {
    let mut h = Harness::grounded();
    h.input.attack_just_pressed = true;
    h.step(FRAME);

    // Let hit 0 run out with nothing queued.
    for _ in 0..30 {
        h.step(FRAME);
        if !h.combo.attacking() {
            break;
        }
    }
    assert_eq!(h.state(), StateId::Idle);
    assert!(h.timers.attack_cooldown.active());

    // Refused while the inter-attack cooldown runs.
    h.input.attack_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.strikes.len(), 1);

    // After the cooldown the chain continues from the next index.
    for _ in 0..30 {
        h.step(FRAME);
        if !h.timers.attack_cooldown.active() {
            break;
        }
    }
    h.input.attack_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.strikes.len(), 2);
    assert_eq!(h.strikes[1].kind, StrikeKind::Combo(1));
}

#[test]
fn test_lapsed_window_arms_reset_and_clears_chain() {
    let mut h = Harness::grounded();
    h.input.attack_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.combo.current(), 1);

    // Let the hit finish, the window lapse, and the reset timer run out.
    for _ in 0..60 {
        h.step(FRAME);
    }
    assert_eq!(h.combo.current(), 0);
    assert!(!h.combo.attacking());
}

#[test]
fn test_damage_cancels_combo_and_forces_air() {
    let mut h = Harness::grounded();
    h.input.attack_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Combat);

    h.hit_from(h.position.0 - Vec2::new(10.0, 0.0));
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Air);
    assert!(!h.combo.attacking());
    assert_eq!(h.combo.current(), 0);
}

// -----------------------------------------------------------------------------
// Pogo
// -----------------------------------------------------------------------------

#[test]
fn test_pogo_requires_ability_and_down_aim() {
    let mut h = Harness::airborne();
    h.velocity.y = -100.0;
    h.input.axis.y = -1.0;
    h.input.attack_just_pressed = true;
    h.step(FRAME);
    assert!(h.strikes.is_empty());

    h.unlock_all();
    h.input.attack_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.strikes.len(), 1);
    assert_eq!(h.strikes[0].kind, StrikeKind::Pogo);
    assert!(h.timers.pogo_cooldown.active());
    assert_eq!(h.state(), StateId::Air);
}

#[test]
fn test_pogo_bounce_refunds_air_actions() {
    let mut h = Harness::airborne();
    h.unlock_all();
    h.shared.air_dash_count = 1;
    h.shared.double_jump_used = true;
    h.velocity.y = -200.0;

    // A connected strike answers with a bounce that refreshes air actions.
    h.shared.pending_bounce = Some(h.config.jump.force);
    h.shared.air_dash_count = 0;
    h.shared.double_jump_used = false;
    h.step(FRAME);
    assert_eq!(h.velocity.y, h.config.jump.force);
    assert!(h.shared.pending_bounce.is_none());

    // The refreshed double jump is accepted again.
    h.input.jump_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Jump);
    assert_eq!(h.velocity.y, h.config.jump.double_jump_force);
    assert!(h.shared.double_jump_used);
}

#[test]
fn test_pending_bounce_forces_air_state() {
    let mut h = Harness::grounded();
    h.input.jump_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Jump);

    h.probe.grounded = false;
    h.shared.pending_bounce = Some(h.config.jump.force);
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Air);
    assert_eq!(h.velocity.y, h.config.jump.force);
}

// -----------------------------------------------------------------------------
// Wall slide and wall lock
// -----------------------------------------------------------------------------

#[test]
fn test_wall_slide_cap_ramps_to_slide_speed() {
    let mut h = Harness::airborne();
    h.probe.wall = WallContact::Right;
    h.input.axis.x = 1.0;

    // First touch nearly arrests the fall.
    h.velocity.y = -500.0;
    h.step(FRAME);
    assert!(h.velocity.y > -15.0);

    // Fully ramped, the cap settles at the slide speed.
    for _ in 0..30 {
        h.velocity.y = -500.0;
        h.step(FRAME);
    }
    assert_eq!(h.velocity.y, -h.config.wall.slide_speed);
}

#[test]
fn test_holding_jump_halves_the_slide_cap() {
    let mut h = Harness::airborne();
    h.probe.wall = WallContact::Left;
    h.input.axis.x = -1.0;
    h.input.jump_held = true;

    for _ in 0..30 {
        h.velocity.y = -500.0;
        h.step(FRAME);
    }
    assert_eq!(h.velocity.y, -h.config.wall.slide_speed * 0.5);
}

#[test]
fn test_wall_contact_alone_keeps_the_cap() {
    let mut h = Harness::airborne();
    h.probe.wall = WallContact::Right;

    // Neutral input: the slide still caps the fall.
    for _ in 0..30 {
        h.velocity.y = -500.0;
        h.step(FRAME);
    }
    assert_eq!(h.velocity.y, -h.config.wall.slide_speed);
}

#[test]
fn test_pressing_away_decays_the_cap() {
    let mut h = Harness::airborne();
    h.probe.wall = WallContact::Right;
    h.input.axis.x = 1.0;
    for _ in 0..30 {
        h.velocity.y = -500.0;
        h.step(FRAME);
    }
    assert_eq!(h.velocity.y, -h.config.wall.slide_speed);

    h.input.axis.x = -1.0;
    for _ in 0..4 {
        h.velocity.y = -500.0;
        h.step(FRAME);
    }
    assert!(h.velocity.y > -h.config.wall.slide_speed);
    assert!(h.velocity.y < 0.0);
}

#[test]
fn test_wall_slide_without_lock_ability_never_holds() {
    let mut h = Harness::airborne();
    h.probe.wall = WallContact::Right;
    h.input.axis.x = 1.0;

    for _ in 0..60 {
        h.velocity.y = -300.0;
        h.step(FRAME);
        assert!(h.gravity.0 > 0.0);
        assert!(h.velocity.y < 0.0);
    }
}

#[test]
fn test_wall_lock_engages_from_a_full_slide() {
    let mut h = Harness::airborne();
    h.unlock_all();
    h.probe.wall = WallContact::Right;

    // Light press: slide, no lock.
    h.input.axis.x = 0.5;
    for _ in 0..25 {
        h.velocity.y = -300.0;
        h.step(FRAME);
    }
    assert_eq!(h.velocity.y, -h.config.wall.slide_speed);
    assert_eq!(h.gravity.0, 1.0);

    // Hard press: the cap interpolates from the slide speed toward the
    // lock speed over the engage window.
    h.input.axis.x = 1.0;
    for _ in 0..5 {
        h.velocity.y = -300.0;
        h.step(FRAME);
    }
    assert!(h.velocity.y > -h.config.wall.slide_speed);
    assert!(h.velocity.y < -h.config.wall.lock_speed);

    for _ in 0..10 {
        h.velocity.y = -300.0;
        h.step(FRAME);
    }
    assert_eq!(h.state(), StateId::Air);
    assert_eq!(h.velocity.0, Vec2::ZERO);
    assert_eq!(h.gravity.0, 0.0);
}

#[test]
fn test_wall_lock_releases_back_to_slide() {
    let mut h = Harness::airborne();
    h.unlock_all();
    h.probe.wall = WallContact::Right;
    h.input.axis.x = 1.0;
    for _ in 0..20 {
        h.velocity.y = -300.0;
        h.step(FRAME);
    }
    assert_eq!(h.gravity.0, 0.0);

    // Releasing the press disengages: gravity returns and the cap ramps
    // out toward the slide speed instead of snapping.
    h.input.axis.x = 0.0;
    h.step(FRAME);
    assert_eq!(h.gravity.0, 1.0);

    for _ in 0..30 {
        h.velocity.y = -500.0;
        h.step(FRAME);
    }
    assert!(h.velocity.y >= -h.config.wall.slide_speed - 1e-3);
}

#[test]
fn test_wall_jump_leaves_the_lock() {
    let mut h = Harness::airborne();
    h.unlock_all();
    h.probe.wall = WallContact::Right;
    h.input.axis.x = 1.0;
    for _ in 0..20 {
        h.velocity.y = -300.0;
        h.step(FRAME);
    }
    assert_eq!(h.velocity.0, Vec2::ZERO);

    h.input.jump_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Jump);
    assert_eq!(h.velocity.x, -h.config.jump.wall_jump_horizontal);
    assert_eq!(h.velocity.y, h.config.jump.wall_jump_vertical);
    assert_eq!(h.gravity.0, 1.0);
}

// -----------------------------------------------------------------------------
// Water and swim
// -----------------------------------------------------------------------------

#[test]
fn test_sinking_into_water_preempts_and_cancels_combo() {
    let mut h = Harness::grounded();
    h.input.attack_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Combat);
    assert!(h.combo.attacking());

    // Mid-swing plunge: the water gate preempts the combat state.
    h.probe.grounded = false;
    h.probe.in_water = true;
    h.probe.water_surface = 0.0;
    h.position.0 = Vec2::new(0.0, -20.0);
    h.velocity.y = -300.0;
    h.step(FRAME);

    assert_eq!(h.state(), StateId::Swim);
    assert_eq!(h.gravity.0, 0.0);
    assert!(!h.combo.attacking());
    assert_eq!(h.combo.current(), 0);
}

#[test]
fn test_water_jump_escapes_the_entry_gate() {
    let mut h = Harness::airborne();
    h.probe.in_water = true;
    h.probe.water_surface = 0.0;
    h.position.0 = Vec2::new(0.0, -20.0);
    h.velocity.y = -50.0;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Swim);

    h.input.jump_just_pressed = true;
    h.frame(FRAME);
    assert_eq!(h.state(), StateId::Jump);
    assert_eq!(h.velocity.y, h.config.jump.water_jump_force);
    assert!(h.timers.water_jump_cooldown.active());

    // Still inside the volume, but rising: the gate does not reclaim.
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Jump);
}

#[test]
fn test_water_jump_cooldown_blocks_immediate_repeat() {
    let mut h = Harness::airborne();
    h.probe.in_water = true;
    h.probe.water_surface = 0.0;
    h.position.0 = Vec2::new(0.0, -20.0);
    h.velocity.y = -50.0;
    h.step(FRAME);

    h.input.jump_just_pressed = true;
    h.frame(FRAME);
    assert_eq!(h.state(), StateId::Jump);

    // Fell back in before the cooldown lapsed.
    h.velocity.y = -10.0;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Swim);
    h.input.jump_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Swim);
}

#[test]
fn test_water_jump_refused_when_too_deep() {
    let mut h = Harness::airborne();
    h.probe.in_water = true;
    h.probe.water_surface = 0.0;
    h.position.0 = Vec2::new(0.0, -200.0);
    h.velocity.y = -50.0;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Swim);

    h.input.jump_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Swim);
}

#[test]
fn test_swim_dash_uses_its_own_cooldown() {
    let mut h = Harness::airborne();
    h.probe.in_water = true;
    h.probe.water_surface = 0.0;
    h.position.0 = Vec2::new(0.0, -40.0);
    h.velocity.y = -50.0;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Swim);

    h.input.axis = Vec2::new(1.0, 0.0);
    h.input.dash_just_pressed = true;
    h.frame(FRAME);
    assert_eq!(h.state(), StateId::Dash);
    h.fixed(FRAME);
    assert_eq!(h.velocity.x, h.config.dash.swim_speed);
    assert!(h.timers.swim_dash_cooldown.active());
    assert!(!h.timers.dash_cooldown.active());

    // Back to swim when the burst ends, still inside the volume.
    for _ in 0..20 {
        h.step(FRAME);
        if h.state() != StateId::Dash {
            break;
        }
    }
    assert_eq!(h.state(), StateId::Swim);
}

#[test]
fn test_leaving_water_restores_gravity() {
    let mut h = Harness::airborne();
    h.probe.in_water = true;
    h.probe.water_surface = 0.0;
    h.position.0 = Vec2::new(0.0, -20.0);
    h.velocity.y = -50.0;
    h.step(FRAME);
    assert_eq!(h.gravity.0, 0.0);

    h.probe.in_water = false;
    h.frame(FRAME);
    assert_eq!(h.state(), StateId::Air);
    assert_eq!(h.gravity.0, 1.0);
}

// -----------------------------------------------------------------------------
// Buoyancy
// -----------------------------------------------------------------------------

#[test]
fn test_buoyancy_force_is_clamped() {
    let config = CharacterConfig::default();
    let mut velocity = LinearVelocity::default();
    let mut position = Position::default();
    let mut shared = StateContext::default();
    position.0 = Vec2::new(0.0, -500.0);

    buoyancy_tick(
        &mut velocity,
        &mut position,
        &mut shared,
        &config.swim,
        0.0,
        FRAME,
    );
    assert!((velocity.y - config.swim.max_buoyancy_force * FRAME).abs() < 1e-3);
}

#[test]
fn test_hard_overshoot_snaps_back_down() {
    let config = CharacterConfig::default();
    let mut velocity = LinearVelocity::default();
    let mut position = Position::default();
    let mut shared = StateContext::default();
    position.0 = Vec2::new(0.0, 130.0);
    velocity.y = 50.0;

    buoyancy_tick(
        &mut velocity,
        &mut position,
        &mut shared,
        &config.swim,
        0.0,
        FRAME,
    );
    assert!(position.y < 130.0);
    assert!(velocity.y <= 0.0);
}

#[test]
fn test_bob_phase_advances_while_floating() {
    let config = CharacterConfig::default();
    let mut velocity = LinearVelocity::default();
    let mut position = Position::default();
    let mut shared = StateContext::default();
    position.0 = Vec2::new(0.0, -config.swim.surface_offset);

    for _ in 0..10 {
        buoyancy_tick(
            &mut velocity,
            &mut position,
            &mut shared,
            &config.swim,
            0.0,
            FRAME,
        );
    }
    assert!(shared.bob_phase > 0.0);
}

// -----------------------------------------------------------------------------
// Ledge grab and climb
// -----------------------------------------------------------------------------

fn ledge_fixture(h: &Harness) -> LedgeTarget {
    // Corner just right of the body, slightly above the lower bound.
    let corner = Vec2::new(h.position.x + h.half.x + 6.0, h.position.y - 10.0);
    build_target(corner, Facing::Right, h.half, &h.config.ledge)
}

#[test]
fn test_ledge_anchor_math() {
    let cfg = CharacterConfig::default().ledge;
    let half = Vec2::new(12.0, 24.0);
    let target = build_target(Vec2::new(100.0, 50.0), Facing::Right, half, &cfg);

    assert_eq!(target.grab_point.x, 100.0 - cfg.grab_offset_x);
    assert!((target.grab_point.y - (50.0 - 48.0 * cfg.grab_offset_y)).abs() < 1e-4);
    assert_eq!(target.surface_point.x, 100.0 + half.x + 2.0);
    assert_eq!(target.surface_point.y, 50.0 + half.y + 0.5);
}

#[test]
fn test_grab_window_band() {
    let cfg = CharacterConfig::default().ledge;
    let half = Vec2::new(12.0, 24.0);
    let target = build_target(Vec2::new(0.0, 50.0), Facing::Right, half, &cfg);

    // Lower bound inside the band.
    assert!(within_grab_window(&target, Vec2::new(0.0, 70.0), half, &cfg));
    // Still above the ledge top.
    assert!(!within_grab_window(&target, Vec2::new(0.0, 80.0), half, &cfg));
    // Fallen past the band.
    assert!(!within_grab_window(
        &target,
        Vec2::new(0.0, 50.0 - cfg.grab_window),
        half,
        &cfg
    ));
}

#[test]
fn test_falling_past_a_ledge_grabs_it() {
    let mut h = Harness::airborne();
    let target = ledge_fixture(&h);
    h.probe.ledge = Some(target);
    h.velocity.y = -250.0;

    h.step(FRAME);
    assert_eq!(h.state(), StateId::LedgeGrab);
    assert_eq!(h.position.0, target.grab_point);
    assert_eq!(h.velocity.0, Vec2::ZERO);
    assert_eq!(h.gravity.0, 0.0);
    assert_eq!(h.shared.active_ledge, Some(target));
}

#[test]
fn test_ledge_grab_requires_falling() {
    let mut h = Harness::airborne();
    let target = ledge_fixture(&h);
    h.probe.ledge = Some(target);
    h.velocity.y = 120.0;

    h.step(FRAME);
    assert_eq!(h.state(), StateId::Air);
}

#[test]
fn test_knockback_suppresses_the_ledge_gate() {
    let mut h = Harness::airborne();
    let target = ledge_fixture(&h);
    h.probe.ledge = Some(target);
    h.velocity.y = -250.0;
    h.hit_from(h.position.0 + Vec2::new(20.0, 0.0));

    h.step(FRAME);
    assert_eq!(h.state(), StateId::Air);
}

#[test]
fn test_ledge_climb_waits_for_minimum_hold() {
    let mut h = Harness::airborne();
    let target = ledge_fixture(&h);
    h.probe.ledge = Some(target);
    h.velocity.y = -250.0;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::LedgeGrab);

    // Immediate up input is refused during the minimum hold.
    h.input.axis.y = 1.0;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::LedgeGrab);

    for _ in 0..10 {
        h.step(FRAME);
        if h.state() == StateId::LedgeClimb {
            break;
        }
    }
    assert_eq!(h.state(), StateId::LedgeClimb);
    assert_eq!(h.position.0, target.surface_point);
    assert_eq!(h.gravity.0, 0.0);
}

#[test]
fn test_ledge_climb_finishes_with_a_hop() {
    let mut h = Harness::airborne();
    let target = ledge_fixture(&h);
    h.probe.ledge = Some(target);
    h.velocity.y = -250.0;
    h.step(FRAME);
    h.input.axis.y = 1.0;
    for _ in 0..10 {
        h.step(FRAME);
        if h.state() == StateId::LedgeClimb {
            break;
        }
    }
    assert_eq!(h.state(), StateId::LedgeClimb);

    h.input.axis.y = 0.0;
    h.probe.ledge = None;
    h.probe.grounded = true;
    for _ in 0..30 {
        h.step(FRAME);
        if h.state() != StateId::LedgeClimb {
            break;
        }
    }
    assert_eq!(h.state(), StateId::Idle);
    assert_eq!(h.gravity.0, 1.0);
    assert!(h.shared.active_ledge.is_none());
}

#[test]
fn test_ledge_drop_pushes_away_and_starts_cooldown() {
    let mut h = Harness::airborne();
    let target = ledge_fixture(&h);
    h.probe.ledge = Some(target);
    h.velocity.y = -250.0;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::LedgeGrab);

    h.probe.ledge = None;
    h.input.axis.y = -1.0;
    h.frame(FRAME);
    assert_eq!(h.state(), StateId::Air);
    assert_eq!(h.velocity.x, -h.config.ledge.release_impulse);
    assert_eq!(h.gravity.0, 1.0);
    assert!(h.timers.ledge_cooldown.active());
    assert!(h.shared.active_ledge.is_none());
}

#[test]
fn test_ledge_jump_launches_away_from_the_wall() {
    let mut h = Harness::airborne();
    let target = ledge_fixture(&h);
    h.probe.ledge = Some(target);
    h.velocity.y = -250.0;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::LedgeGrab);

    h.probe.ledge = None;
    h.input.jump_just_pressed = true;
    h.frame(FRAME);
    assert_eq!(h.state(), StateId::Jump);
    assert_eq!(h.velocity.x, -h.config.jump.wall_jump_horizontal);
    assert_eq!(h.velocity.y, h.config.jump.wall_jump_vertical);
    assert!(h.timers.ledge_cooldown.active());
}

#[test]
fn test_ledge_grab_discards_a_pending_bounce() {
    let mut h = Harness::airborne();
    let target = ledge_fixture(&h);
    h.probe.ledge = Some(target);
    h.velocity.y = -250.0;
    h.shared.pending_bounce = Some(h.config.jump.force);

    // The bounce gate forces Air first; the grab gate then wins and
    // swallows the stale bounce.
    h.step(FRAME);
    assert_eq!(h.state(), StateId::LedgeGrab);
    assert!(h.shared.pending_bounce.is_none());
    assert_eq!(h.velocity.0, Vec2::ZERO);
}

// -----------------------------------------------------------------------------
// Knockback
// -----------------------------------------------------------------------------

#[test]
fn test_knockback_tick_scales_with_progress() {
    let config = CharacterConfig::default();
    let mut velocity = LinearVelocity::default();
    let dir = Vec2::new(1.0, 0.0);

    knockback_tick(&mut velocity, dir, &config.knockback, 0.0, false);
    assert_eq!(velocity.x, config.knockback.force);

    knockback_tick(&mut velocity, dir, &config.knockback, 0.5, false);
    assert_eq!(velocity.x, config.knockback.force * 0.5);

    knockback_tick(&mut velocity, dir, &config.knockback, 1.0, false);
    assert_eq!(velocity.x, 0.0);
}

#[test]
fn test_grounded_knockback_zeroes_vertical() {
    let config = CharacterConfig::default();
    let dir = Vec2::new(1.0, 1.0).normalize();

    let mut airborne = LinearVelocity::default();
    knockback_tick(&mut airborne, dir, &config.knockback, 0.0, false);
    assert!(airborne.y > 0.0);

    let mut grounded = LinearVelocity::default();
    knockback_tick(&mut grounded, dir, &config.knockback, 0.0, true);
    assert_eq!(grounded.y, 0.0);
    assert!(grounded.x > 0.0);
}

#[test]
fn test_damage_forces_air_and_stuns_input() {
    let mut h = Harness::grounded();
    h.step(FRAME);
    h.hit_from(h.position.0 - Vec2::new(10.0, 0.0));

    h.step(FRAME);
    assert_eq!(h.state(), StateId::Air);
    assert!(h.velocity.x > 0.0);

    // Stunned: a jump press is swallowed.
    h.input.jump_just_pressed = true;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Air);
    assert_eq!(h.velocity.y, 0.0);
}

#[test]
fn test_knockback_decays_and_recovers_to_ground() {
    let mut h = Harness::grounded();
    h.step(FRAME);
    h.hit_from(h.position.0 - Vec2::new(10.0, 0.0));

    h.step(FRAME);
    let early = h.velocity.x;
    h.step(FRAME);
    let later = h.velocity.x;
    assert!(later < early);

    for _ in 0..30 {
        h.step(FRAME);
    }
    assert!(!h.timers.knockback.active());
    assert_eq!(h.state(), StateId::Idle);
}

#[test]
fn test_hurt_invuln_ignores_followup_hits() {
    let mut h = Harness::grounded();
    h.step(FRAME);
    h.hit_from(h.position.0 - Vec2::new(10.0, 0.0));
    let dir = h.shared.knockback_dir;
    h.step(FRAME);
    let remaining = h.timers.knockback.remaining();

    // Opposite-side hit inside the invulnerability window: no restart,
    // no direction flip.
    h.hit_from(h.position.0 + Vec2::new(10.0, 0.0));
    assert_eq!(h.shared.knockback_dir, dir);
    assert!((h.timers.knockback.remaining() - remaining).abs() < 1e-6);
}

#[test]
fn test_knockback_in_water_stays_in_swim() {
    let mut h = Harness::airborne();
    h.probe.in_water = true;
    h.probe.water_surface = 0.0;
    h.position.0 = Vec2::new(0.0, -30.0);
    h.velocity.y = -50.0;
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Swim);

    h.hit_from(h.position.0 - Vec2::new(10.0, 0.0));
    h.step(FRAME);
    assert_eq!(h.state(), StateId::Swim);
}
