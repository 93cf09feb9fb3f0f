//! Space-time point type

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Space-time point with x, y, z spatial components and a time component t
///
/// Single precision, laid out for direct upload into GPU buffers.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub t: f32,
}

impl Vec4 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, t: 0.0 };

    /// Create a new Vec4
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, t: f32) -> Self {
        Self { x, y, z, t }
    }

    /// Create a space-time point from spatial coordinates and a time
    #[inline]
    pub fn from_spatial(xyz: [f32; 3], t: f32) -> Self {
        Self::new(xyz[0], xyz[1], xyz[2], t)
    }

    /// Extract the xyz components as an array (for 3D rendering)
    #[inline]
    pub fn xyz(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Linear interpolation between two points
    #[inline]
    pub fn lerp(self, other: Self, s: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * s,
            self.y + (other.y - self.y) * s,
            self.z + (other.z - self.z) * s,
            self.t + (other.t - self.t) * s,
        )
    }

    /// Point where the segment to `other` crosses the time level `time`
    ///
    /// Returns `None` when the segment is parallel to the time level.
    #[inline]
    pub fn at_time(self, other: Self, time: f32) -> Option<Self> {
        let dt = other.t - self.t;
        if dt.abs() <= f32::EPSILON {
            return None;
        }
        let s = ((time - self.t) / dt).clamp(0.0, 1.0);
        Some(self.lerp(other, s))
    }
}
