//! Visible play area, as seen by gameplay.
//!
//! The camera plugin refreshes this every frame; headless apps keep the default
//! (a 10 unit tall view centred on the origin).

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraBounds {
    pub center_y: f32,
    pub half_height: f32,
}

impl Default for CameraBounds {
    fn default() -> Self {
        Self { center_y: 0.0, half_height: 5.0 }
    }
}

impl CameraBounds {
    #[inline]
    pub fn upper_edge(&self) -> f32 {
        self.center_y + self.half_height
    }

    /// One full screen height above the upper edge.
    #[inline]
    pub fn release_height(&self) -> f32 {
        self.upper_edge() + self.half_height * 2.0
    }

    #[inline]
    pub fn is_far_above(&self, y: f32) -> bool {
        y > self.release_height()
    }
}
