//! Jump solver
//!
//! Closed-form launch velocities for a symmetric parabolic arc. The actor is
//! integrated per tick with `vy += g; y += vy; x += vx`, which brings it back
//! to launch height one tick before the continuous time of flight, so the
//! landing x is short of the aim point by at most `vx`.

use glam::Vec2;

/// Launch velocity produced by the solver (negative y is up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpVelocity {
    pub vx: f32,
    pub vy: f32,
}

impl JumpVelocity {
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.vx, self.vy)
    }
}

/// Clamp a charge power to the solver's usable range
///
/// Zero, negative and non-finite powers become `min_power` so the time of
/// flight is never zero.
#[inline]
pub fn clamp_power(power: f32, min_power: f32) -> f32 {
    if power.is_finite() {
        power.max(min_power)
    } else {
        min_power
    }
}

/// Ticks for a full up-and-down arc launched at `power`
#[inline]
pub fn time_of_flight(power: f32, gravity: f32, jump_force: f32) -> f32 {
    2.0 * (jump_force * power).abs() / gravity
}

/// Velocity that carries the actor `dx` horizontally over one full arc
pub fn solve_jump(
    power: f32,
    gravity: f32,
    jump_force: f32,
    dx: f32,
    min_power: f32,
) -> JumpVelocity {
    let power = clamp_power(power, min_power);
    let vy = -jump_force * power;
    let t = time_of_flight(power, gravity, jump_force);
    JumpVelocity { vx: dx / t, vy }
}

/// Advance a body by one tick of gravity
#[inline]
pub fn integrate(pos: &mut Vec2, vel: &mut Vec2, gravity: f32) {
    vel.y += gravity;
    *pos += *vel;
}
