//! The player body

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::{self, JumpVelocity};

/// Square actor, positioned by its top-left corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub airborne: bool,
}

impl Actor {
    /// Actor resting with its bottom edge on `ground_y`, centred on `center_x`
    pub fn resting(center_x: f32, ground_y: f32, size: f32) -> Self {
        Self {
            pos: Vec2::new(center_x - size / 2.0, ground_y - size),
            vel: Vec2::ZERO,
            size,
            airborne: false,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }

    /// Right edge; the next jump target must start past it
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size
    }

    #[inline]
    pub fn is_descending(&self) -> bool {
        self.vel.y > 0.0
    }

    /// Leave the ground with a solved velocity
    pub fn launch(&mut self, v: JumpVelocity) {
        self.vel = v.as_vec2();
        self.airborne = true;
    }

    /// One tick of gravity (no-op while grounded)
    pub fn step(&mut self, gravity: f32) {
        if self.airborne {
            physics::integrate(&mut self.pos, &mut self.vel, gravity);
        }
    }

    /// Come to rest with the bottom edge on `top`
    pub fn land_on(&mut self, top: f32) {
        self.pos.y = top - self.size;
        self.vel = Vec2::ZERO;
        self.airborne = false;
    }

    /// Scale position and size about the world origin
    pub fn rescale(&mut self, factor: f32) {
        self.pos *= factor;
        self.vel *= factor;
        self.size *= factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resting_actor_sits_on_ground() {
        let actor = Actor::resting(130.0, 450.0, 40.0);
        assert_eq!(actor.pos, Vec2::new(110.0, 410.0));
        assert_eq!(actor.bottom(), 450.0);
        assert_eq!(actor.center_x(), 130.0);
        assert!(!actor.airborne);
    }

    #[test]
    fn test_grounded_actor_does_not_fall() {
        let mut actor = Actor::resting(0.0, 100.0, 10.0);
        actor.step(0.6);
        assert_eq!(actor.bottom(), 100.0);
        assert_eq!(actor.vel, Vec2::ZERO);
    }

    #[test]
    fn test_land_clears_velocity() {
        let mut actor = Actor::resting(0.0, 100.0, 10.0);
        actor.launch(JumpVelocity { vx: 2.0, vy: -15.0 });
        actor.step(0.6);
        assert!(actor.airborne);
        assert!(actor.bottom() < 100.0);

        actor.land_on(100.0);
        assert!(!actor.airborne);
        assert_eq!(actor.vel, Vec2::ZERO);
        assert_eq!(actor.bottom(), 100.0);
    }
}
