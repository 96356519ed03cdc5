//! Character domain: motion model.
//!
//! Pure velocity rules, one module per mode. Each is invoked only from the
//! owning state's `fixed_update`, which keeps the single-writer guarantee
//! on the body's velocity.

pub mod air;
pub mod dash;
pub mod ground;
pub mod knockback;
pub mod swim;
pub mod wall;

/// Critically damped smoothing toward a target, with overshoot clamping.
/// `velocity` is the filter's own memory, persisted by the caller between
/// ticks. `smooth_time` is roughly the time to cover most of the gap.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / dt.max(f32::EPSILON);
    }
    output
}

/// Move `current` toward `target` by at most `max_delta`.
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}
