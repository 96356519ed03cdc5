//! Animation state selection and frame progression.

use bevy::prelude::*;

/// Animation states for the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Walk,
    Run,
    Jump,
    Fall,
    WallSlide,
    Dash,
    Swim,
    Attack(u8),
    LedgeGrab,
    LedgeClimb,
    Stagger,
}

/// Component for animation playback on a character sprite.
///
/// Frame data is table-driven per state until real sheets land; the
/// placeholder renderer only needs the state, facing, and flash fields.
#[derive(Component, Debug)]
pub struct AnimationController {
    pub state: AnimationState,
    pub facing_right: bool,
    /// Current frame index (0-based).
    pub current_frame: u32,
    /// Total frames in the current animation.
    pub total_frames: u32,
    /// Time accumulator for frame timing.
    pub frame_timer: f32,
    /// Seconds per frame.
    pub frame_duration: f32,
    /// Whether the animation should loop.
    pub looping: bool,
    /// Whether a non-looping animation has finished.
    pub finished: bool,
    /// Remaining hurt-flash time.
    pub flash_timer: f32,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self {
            state: AnimationState::Idle,
            facing_right: true,
            current_frame: 0,
            total_frames: 4,
            frame_timer: 0.0,
            frame_duration: 0.15,
            looping: true,
            finished: false,
            flash_timer: 0.0,
        }
    }
}

impl AnimationController {
    /// Set the animation state, resetting the frame if it changed.
    pub fn set_state(&mut self, state: AnimationState) {
        if self.state == state {
            return;
        }
        self.state = state;
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.finished = false;

        self.looping = matches!(
            state,
            AnimationState::Idle
                | AnimationState::Walk
                | AnimationState::Run
                | AnimationState::WallSlide
                | AnimationState::Swim
                | AnimationState::LedgeGrab
        );

        self.total_frames = match state {
            AnimationState::Idle => 4,
            AnimationState::Walk => 4,
            AnimationState::Run => 6,
            AnimationState::Jump => 2,
            AnimationState::Fall => 2,
            AnimationState::WallSlide => 2,
            AnimationState::Dash => 2,
            AnimationState::Swim => 4,
            AnimationState::Attack(_) => 3,
            AnimationState::LedgeGrab => 2,
            AnimationState::LedgeClimb => 3,
            AnimationState::Stagger => 2,
        };

        self.frame_duration = match state {
            AnimationState::Attack(_) => 0.08,
            AnimationState::Dash => 0.08,
            AnimationState::Stagger => 0.1,
            _ => 0.15,
        };
    }

    /// Begin a hurt flash lasting `duration` seconds.
    pub fn trigger_flash(&mut self, duration: f32) {
        self.flash_timer = duration.max(0.0);
    }
}

/// System that advances animation frames and decays the hurt flash.
pub(crate) fn update_animation_frames(
    time: Res<Time>,
    mut query: Query<&mut AnimationController>,
) {
    for mut controller in &mut query {
        controller.flash_timer = (controller.flash_timer - time.delta_secs()).max(0.0);
        if controller.finished {
            continue;
        }

        controller.frame_timer += time.delta_secs();
        if controller.frame_timer >= controller.frame_duration {
            controller.frame_timer -= controller.frame_duration;
            controller.current_frame += 1;

            if controller.current_frame >= controller.total_frames {
                if controller.looping {
                    controller.current_frame = 0;
                } else {
                    controller.current_frame = controller.total_frames - 1;
                    controller.finished = true;
                }
            }
        }
    }
}

/// System that renders the controller onto the flat placeholder sprite:
/// facing flips, a per-state tint, and the blinking hurt flash.
pub(crate) fn apply_character_visuals(mut query: Query<(&AnimationController, &mut Sprite)>) {
    for (controller, mut sprite) in &mut query {
        sprite.flip_x = !controller.facing_right;

        let mut color = state_tint(controller.state);
        if controller.flash_timer > 0.0 {
            // Blink at frame granularity while invulnerable.
            let on = (controller.flash_timer * 20.0) as i32 % 2 == 0;
            if on {
                color = Color::srgb(1.0, 1.0, 1.0);
            }
        }
        sprite.color = color;
    }
}

fn state_tint(state: AnimationState) -> Color {
    match state {
        AnimationState::Idle => Color::srgb(0.55, 0.78, 0.95),
        AnimationState::Walk => Color::srgb(0.45, 0.72, 0.92),
        AnimationState::Run => Color::srgb(0.30, 0.62, 0.95),
        AnimationState::Jump => Color::srgb(0.55, 0.90, 0.70),
        AnimationState::Fall => Color::srgb(0.40, 0.78, 0.60),
        AnimationState::WallSlide => Color::srgb(0.55, 0.62, 0.78),
        AnimationState::Dash => Color::srgb(0.95, 0.85, 0.35),
        AnimationState::Swim => Color::srgb(0.35, 0.55, 0.90),
        AnimationState::Attack(_) => Color::srgb(0.95, 0.55, 0.35),
        AnimationState::LedgeGrab => Color::srgb(0.80, 0.70, 0.50),
        AnimationState::LedgeClimb => Color::srgb(0.85, 0.78, 0.55),
        AnimationState::Stagger => Color::srgb(0.90, 0.35, 0.35),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_change_resets_playback() {
        let mut anim = AnimationController::default();
        anim.current_frame = 3;
        anim.frame_timer = 0.1;
        anim.set_state(AnimationState::Dash);
        assert_eq!(anim.current_frame, 0);
        assert_eq!(anim.frame_timer, 0.0);
        assert!(!anim.looping);
        assert!(!anim.finished);
    }

    #[test]
    fn test_setting_the_same_state_keeps_playback() {
        // States re-assert their animation every frame; that must not
        // restart the clip.
        let mut anim = AnimationController::default();
        anim.current_frame = 2;
        anim.frame_timer = 0.05;
        anim.set_state(AnimationState::Idle);
        assert_eq!(anim.current_frame, 2);
        assert_eq!(anim.frame_timer, 0.05);
    }

    #[test]
    fn test_flash_duration_never_negative() {
        let mut anim = AnimationController::default();
        anim.trigger_flash(-1.0);
        assert_eq!(anim.flash_timer, 0.0);
    }
}
