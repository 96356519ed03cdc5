//! Character domain: countdown timers and the per-character timer bank.

use bevy::prelude::*;

/// A single named countdown. Ticks toward zero once per frame, never goes
/// negative, and reports its zero crossing exactly once.
#[derive(Debug, Clone, Copy, Default)]
pub struct Countdown {
    remaining: f32,
    duration: f32,
    just_finished: bool,
}

impl Countdown {
    /// Start (or restart) the countdown. Negative durations clamp to zero.
    pub fn start(&mut self, duration: f32) {
        let duration = duration.max(0.0);
        self.remaining = duration;
        self.duration = duration;
        self.just_finished = false;
    }

    /// Stop without firing the zero-crossing signal.
    pub fn clear(&mut self) {
        self.remaining = 0.0;
        self.just_finished = false;
    }

    pub fn active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Fraction elapsed since `start`, in 0..1. A zero-duration countdown
    /// reports 1.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (1.0 - self.remaining / self.duration).clamp(0.0, 1.0)
    }

    /// True only on the tick that drove the countdown to zero.
    pub fn just_finished(&self) -> bool {
        self.just_finished
    }

    pub fn tick(&mut self, dt: f32) {
        self.just_finished = false;
        if self.remaining <= 0.0 {
            return;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        if self.remaining == 0.0 {
            self.just_finished = true;
        }
    }
}

/// All countdowns for one character. Decremented together once per frame
/// tick; states observe expiry and own their end transitions, the bank
/// never invokes callbacks itself.
#[derive(Component, Debug, Clone, Default)]
pub struct TimerBank {
    pub coyote: Countdown,
    pub jump_buffer: Countdown,
    /// Grace window after a running jump that preserves horizontal momentum.
    pub jump_momentum: Countdown,
    pub dash_duration: Countdown,
    pub dash_cooldown: Countdown,
    pub swim_dash_cooldown: Countdown,
    pub water_jump_cooldown: Countdown,
    pub combo_window: Countdown,
    pub combo_reset: Countdown,
    pub attack_active: Countdown,
    pub attack_cooldown: Countdown,
    pub pogo_cooldown: Countdown,
    pub wall_lock_engage: Countdown,
    pub wall_lock_disengage: Countdown,
    pub ledge_hold: Countdown,
    pub ledge_cooldown: Countdown,
    pub knockback: Countdown,
    pub hurt_invuln: Countdown,
}

impl TimerBank {
    pub fn tick_all(&mut self, dt: f32) {
        self.coyote.tick(dt);
        self.jump_buffer.tick(dt);
        self.jump_momentum.tick(dt);
        self.dash_duration.tick(dt);
        self.dash_cooldown.tick(dt);
        self.swim_dash_cooldown.tick(dt);
        self.water_jump_cooldown.tick(dt);
        self.combo_window.tick(dt);
        self.combo_reset.tick(dt);
        self.attack_active.tick(dt);
        self.attack_cooldown.tick(dt);
        self.pogo_cooldown.tick(dt);
        self.wall_lock_engage.tick(dt);
        self.wall_lock_disengage.tick(dt);
        self.ledge_hold.tick(dt);
        self.ledge_cooldown.tick(dt);
        self.knockback.tick(dt);
        self.hurt_invuln.tick(dt);
    }
}
