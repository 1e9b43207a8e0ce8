//! Navigation goal handed to the motion layer.

use serde::{Deserialize, Serialize};

use crate::generation::WorldPoint;

/// Quaternion orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Orientation {
    /// Identity rotation, i.e. facing forward along the frame's x axis.
    pub const FORWARD: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };
}

impl Default for Orientation {
    fn default() -> Self {
        Self::FORWARD
    }
}

/// A world-frame target pose. Carries no velocity or path information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPose {
    pub frame_id: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub orientation: Orientation,
}

impl GoalPose {
    pub fn new(frame_id: impl Into<String>, position: WorldPoint) -> Self {
        Self {
            frame_id: frame_id.into(),
            x: position.x,
            y: position.y,
            z: position.z,
            orientation: Orientation::FORWARD,
        }
    }
}
