//! Wire-format support for ROS point cloud messages
//!
//! This crate turns `sensor_msgs/PointCloud2` messages, as delivered over a
//! JSON bridge with a base64 payload, into the position and color arrays of a
//! [`ros3d_core::FrameBuffer`].

pub mod buffer_view;
pub mod decoder;
pub mod encode;
pub mod error;
pub mod point_cloud2;

pub use buffer_view::{BufferView, Endianness};
pub use decoder::PointCloudDecoder;
pub use encode::FrameEncoder;
pub use error::*;
pub use point_cloud2::{PointCloud2, PointStep, MANDATORY_FIELD_BYTES};

use ros3d_core::FrameBuffer;

/// Decode a single frame with a throwaway decoder
///
/// Prefer keeping a [`PointCloudDecoder`] around when decoding a stream so
/// its payload allocation is reused.
pub fn decode(frame: &PointCloud2, buffer: &mut FrameBuffer) -> DecodeResult<()> {
    PointCloudDecoder::new().decode(frame, buffer)
}
