use serde::{Deserialize, Serialize};

/// Physics body readings supplied by the host engine each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicsReading {
    pub velocity_x: f32,
    pub velocity_y: f32,
    /// Blocked from below by ground or platform tiles. Overlap with
    /// sensors such as coins or the goal does not count.
    pub grounded: bool,
}

impl PhysicsReading {
    pub fn grounded(velocity_x: f32) -> Self {
        Self {
            velocity_x,
            velocity_y: 0.0,
            grounded: true,
        }
    }

    pub fn airborne(velocity_x: f32, velocity_y: f32) -> Self {
        Self {
            velocity_x,
            velocity_y,
            grounded: false,
        }
    }

    /// Horizontal velocity with NaN/Inf replaced by zero.
    pub fn velocity_x(&self) -> f32 {
        if self.velocity_x.is_finite() {
            self.velocity_x
        } else {
            0.0
        }
    }

    pub fn velocity_y(&self) -> f32 {
        if self.velocity_y.is_finite() {
            self.velocity_y
        } else {
            0.0
        }
    }
}
