//! Wall slide: curved fall-speed cap with the wall-lock hold.

use crate::character::config::WallConfig;
use crate::character::timers::TimerBank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockPhase {
    #[default]
    None,
    Engaging,
    Locked,
    Disengaging,
}

/// What the slide applies to the body this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlideEffect {
    /// Clamp downward speed to this cap.
    Cap(f32),
    /// Fully locked: zero velocity, zero gravity.
    Hold,
}

/// Per-activation slide bookkeeping. The effective cap lives here, never
/// in the shared configuration, so overlapping wall interactions cannot
/// corrupt the configured slide speed.
#[derive(Debug, Clone, Default)]
pub struct WallSlide {
    lock: LockPhase,
    slide_time: f32,
    releasing: bool,
    release_time: f32,
    release_from: f32,
    lock_from: f32,
    cap: f32,
}

impl WallSlide {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Slide conditions ended (left the wall, landed, or exited the state).
    pub fn stop(&mut self, timers: &mut TimerBank) {
        timers.wall_lock_engage.clear();
        timers.wall_lock_disengage.clear();
        self.reset();
    }

    pub fn locked(&self) -> bool {
        matches!(self.lock, LockPhase::Locked)
    }

    pub fn lock_phase(&self) -> LockPhase {
        self.lock
    }

    /// Advance one fixed tick and return the effect to apply.
    ///
    /// `pressing_away` is input away from the wall, `pressing_hard` is
    /// input toward it past the lock-hold threshold. Holding jump halves
    /// the cap for a cling feel.
    pub fn fixed_tick(
        &mut self,
        cfg: &WallConfig,
        timers: &mut TimerBank,
        pressing_away: bool,
        pressing_hard: bool,
        lock_unlocked: bool,
        jump_held: bool,
        dt: f32,
    ) -> SlideEffect {
        match self.lock {
            LockPhase::None => {
                if lock_unlocked && pressing_hard {
                    self.begin_engage(cfg, timers);
                }
            }
            LockPhase::Engaging => {
                if !pressing_hard {
                    self.begin_disengage(cfg, timers);
                } else if !timers.wall_lock_engage.active() {
                    self.lock = LockPhase::Locked;
                }
            }
            LockPhase::Locked => {
                if !pressing_hard {
                    self.begin_disengage(cfg, timers);
                }
            }
            LockPhase::Disengaging => {
                if lock_unlocked && pressing_hard {
                    self.begin_engage(cfg, timers);
                } else if !timers.wall_lock_disengage.active() {
                    // The disengage ramp ends at the slide speed; resume
                    // the accel ramp from the same point.
                    self.lock = LockPhase::None;
                    self.slide_time = cfg.accel_time;
                }
            }
        }

        if self.locked() {
            return SlideEffect::Hold;
        }

        // Pressing away ramps the cap back down instead of dropping it.
        // Neutral input keeps the slide as it is.
        if self.lock == LockPhase::None {
            if pressing_away && !self.releasing {
                self.releasing = true;
                self.release_time = 0.0;
                self.release_from = self.cap;
            } else if !pressing_away && self.releasing {
                self.releasing = false;
                self.slide_time = 0.0;
            }
        }

        self.cap = match self.lock {
            LockPhase::Engaging => {
                let t = cfg.lock_curve.sample(timers.wall_lock_engage.progress());
                lerp(self.lock_from, cfg.lock_speed, t)
            }
            LockPhase::Disengaging => {
                let t = cfg.lock_curve.sample(timers.wall_lock_disengage.progress());
                lerp(cfg.lock_speed, cfg.slide_speed, t)
            }
            _ => {
                if self.releasing {
                    self.release_time += dt;
                    let t = ramp_progress(self.release_time, cfg.decel_time);
                    self.release_from * (1.0 - cfg.decel_curve.sample(t))
                } else {
                    self.slide_time += dt;
                    let t = ramp_progress(self.slide_time, cfg.accel_time);
                    cfg.slide_speed * cfg.accel_curve.sample(t)
                }
            }
        };

        let mut cap = self.cap;
        if jump_held {
            cap *= 0.5;
        }
        SlideEffect::Cap(cap.max(0.0))
    }

    fn begin_engage(&mut self, cfg: &WallConfig, timers: &mut TimerBank) {
        self.lock = LockPhase::Engaging;
        self.lock_from = self.cap;
        timers.wall_lock_disengage.clear();
        timers.wall_lock_engage.start(cfg.lock_engage_time);
    }

    fn begin_disengage(&mut self, cfg: &WallConfig, timers: &mut TimerBank) {
        self.lock = LockPhase::Disengaging;
        timers.wall_lock_engage.clear();
        timers.wall_lock_disengage.start(cfg.lock_disengage_time);
    }
}

fn ramp_progress(elapsed: f32, window: f32) -> f32 {
    if window <= 0.0 {
        1.0
    } else {
        (elapsed / window).clamp(0.0, 1.0)
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
