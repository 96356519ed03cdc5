//! Character domain: melee combo chain tracking.
//!
//! Owns the hit index, the queued-next-hit flag, and the interplay between
//! the combo window and the reset timer. Attack/cooldown countdowns live in
//! the `TimerBank`; damage resolution happens in the damage module from the
//! strike requests produced here.

use bevy::prelude::*;

use super::config::ComboConfig;
use super::timers::TimerBank;

/// What a started strike should resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeKind {
    /// Forward melee hit at the given combo index.
    Combo(usize),
    /// Downward air strike.
    Pogo,
}

/// A strike the state machine decided to perform this frame. Drained by the
/// controller into messages for the damage module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrikeRequest {
    pub kind: StrikeKind,
}

/// Outcome of an attack's duration timer expiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackEnd {
    /// Nothing pending; stay idle inside the combat state or leave it.
    Done,
    /// A queued press re-triggers the next hit immediately.
    StartNext,
    /// The chain hit its last configured hit and reset to zero.
    ChainClosed,
}

#[derive(Component, Debug, Clone, Default)]
pub struct ComboTracker {
    /// Next hit index to start; equals hits landed in the current chain.
    current: usize,
    attacking: bool,
    queued: bool,
    active_hit: Option<usize>,
}

impl ComboTracker {
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn attacking(&self) -> bool {
        self.attacking
    }

    pub fn queued(&self) -> bool {
        self.queued
    }

    /// Eligibility gate. Refuses while a hit is in flight, during the
    /// inter-attack cooldown, past the end of the chain, or when no hits
    /// are configured at all.
    pub fn can_attack(&self, timers: &TimerBank, config: &ComboConfig) -> bool {
        !self.attacking
            && !timers.attack_cooldown.active()
            && config.max_hits() > 0
            && self.current < config.max_hits()
    }

    /// Handle an attack press. Returns the strike to perform now, if any.
    /// A press during an in-flight hit inside the combo window queues the
    /// next hit instead of starting it.
    pub fn start_attack(
        &mut self,
        timers: &mut TimerBank,
        config: &ComboConfig,
    ) -> Option<StrikeRequest> {
        if self.attacking && timers.combo_window.active() {
            self.queued = true;
            return None;
        }
        if !self.can_attack(timers, config) {
            return None;
        }

        let index = self.current.min(config.max_hits().saturating_sub(1));
        let hit = config.hit(index);

        self.attacking = true;
        self.active_hit = Some(index);
        self.current += 1;
        timers.attack_active.start(hit.duration);
        timers.combo_window.start(config.window);
        timers.combo_reset.clear();

        Some(StrikeRequest {
            kind: StrikeKind::Combo(index),
        })
    }

    /// Called when the active hit's duration expires.
    pub fn finish_attack(&mut self, timers: &mut TimerBank, config: &ComboConfig) -> AttackEnd {
        let Some(index) = self.active_hit.take() else {
            return AttackEnd::Done;
        };
        self.attacking = false;

        if self.current >= config.max_hits() {
            // Full chain: reset immediately instead of waiting for the
            // reset timer.
            timers.attack_cooldown.start(config.hit(index).cooldown);
            self.reset_chain(timers);
            return AttackEnd::ChainClosed;
        }
        if self.queued {
            // A queued press chains seamlessly, with no cooldown gap.
            self.queued = false;
            return AttackEnd::StartNext;
        }
        timers.attack_cooldown.start(config.hit(index).cooldown);
        if !timers.combo_window.active() {
            timers.combo_reset.start(config.reset_time);
        }
        AttackEnd::Done
    }

    /// Per-frame bookkeeping outside of attack starts/ends: a window that
    /// closes with no queued press arms the reset timer, and the reset
    /// timer expiring clears the chain.
    pub fn frame_tick(&mut self, timers: &mut TimerBank, config: &ComboConfig) {
        if !self.attacking && self.current > 0 && timers.combo_window.just_finished() {
            timers.combo_reset.start(config.reset_time);
        }
        if timers.combo_reset.just_finished() {
            self.reset_chain(timers);
        }
    }

    /// Unconditional cancel: damage taken, dash started, or water entered.
    pub fn cancel(&mut self, timers: &mut TimerBank) {
        self.attacking = false;
        self.active_hit = None;
        self.reset_chain(timers);
        timers.attack_active.clear();
        timers.attack_cooldown.clear();
    }

    fn reset_chain(&mut self, timers: &mut TimerBank) {
        self.current = 0;
        self.queued = false;
        timers.combo_window.clear();
        timers.combo_reset.clear();
    }
}
