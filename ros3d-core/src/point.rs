//! Point types and related functionality

use bytemuck::{Pod, Zeroable};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Normalized RGB color, each channel in `[0.0, 1.0]`
pub type Color3f = [f32; 3];

/// A point with a normalized color, as stored in a render buffer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct ColoredPoint3f {
    pub position: Point3f,
    pub color: Color3f,
}

unsafe impl Pod for ColoredPoint3f {}
unsafe impl Zeroable for ColoredPoint3f {}

impl Default for ColoredPoint3f {
    fn default() -> Self {
        Self {
            position: Point3f::origin(),
            color: [0.0; 3],
        }
    }
}

/// Convert an 8-bit channel into the normalized `[0.0, 1.0]` range
#[inline]
pub fn normalize_channel(value: u8) -> f32 {
    value as f32 / 255.0
}
