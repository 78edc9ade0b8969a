//! Core data structures for ros3d
//!
//! This crate provides the fixed-capacity render buffers that incoming
//! point clouds are decoded into, the point and color types stored in them,
//! and the pose/transform math used to place scene objects on ROS frames.

pub mod error;
pub mod frame_buffer;
pub mod point;
pub mod transform;

pub use error::*;
pub use frame_buffer::*;
pub use point::*;
pub use transform::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Isometry3, Point3, UnitQuaternion, Vector3};
