//! Horizontal follow camera

use serde::{Deserialize, Serialize};

/// Left edge of the visible world
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    /// Camera x that centres `actor_x` in the viewport
    #[inline]
    pub fn target_for(actor_x: f32, viewport_width: f32) -> f32 {
        actor_x - viewport_width / 2.0
    }

    /// Jump straight to the follow target
    pub fn snap_to(&mut self, actor_x: f32, viewport_width: f32) {
        self.x = Self::target_for(actor_x, viewport_width);
    }

    /// One tick of exponential smoothing toward the follow target
    ///
    /// The factor is per tick, not per second.
    pub fn follow(&mut self, actor_x: f32, viewport_width: f32, smoothing: f32) {
        let target = Self::target_for(actor_x, viewport_width);
        self.x += (target - self.x) * smoothing;
    }
}
