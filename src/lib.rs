//! # ros3d
//!
//! Bridge ROS sensor and annotation topics into data a 3D renderer can upload.
//!
//! This is the umbrella crate that provides convenient access to all ros3d
//! functionality. You can use this crate to get everything in one place, or
//! use individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Frame buffers, point types, pose and transform math
//! - **I/O**: `sensor_msgs/PointCloud2` decoding
//! - **Visualization**: Point cloud and marker array topic clients
//!
//! ## Quick Start
//!
//! ```rust
//! use ros3d::prelude::*;
//!
//! let mut buffer = FrameBuffer::allocate(2, 1);
//! let frame = FrameEncoder::new(32).encode(
//!     2,
//!     1,
//!     &[Point3f::new(0.0, 0.0, 1.0), Point3f::new(0.1, 0.0, 1.0)],
//!     Some(&[[255, 0, 0], [0, 255, 0]][..]),
//! );
//!
//! PointCloudDecoder::new().decode(&frame, &mut buffer).unwrap();
//! assert!(buffer.take_dirty());
//! assert_eq!(buffer.color(1), [0.0, 1.0, 0.0]);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables io and visualization
//! - `io`: PointCloud2 wire-format support
//! - `visualization`: Topic clients (implies `io`)

// Re-export core functionality
pub use ros3d_core::*;

#[cfg(feature = "io")]
pub use ros3d_io as io;

#[cfg(feature = "visualization")]
pub use ros3d_visualization as visualization;

/// Convenient imports for common use cases
pub mod prelude {
    pub use ros3d_core::*;

    #[cfg(feature = "io")]
    pub use ros3d_io::*;

    #[cfg(feature = "visualization")]
    pub use ros3d_visualization::*;
}
