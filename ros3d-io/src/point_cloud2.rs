//! `sensor_msgs/PointCloud2` message shape and the point record layouts it carries

use serde::{Deserialize, Serialize};

use crate::buffer_view::Endianness;

/// Bytes of the x, y, z floats plus the unused channel that follows them
pub const MANDATORY_FIELD_BYTES: u32 = 16;

/// Offset of the blue byte in records that carry color
const COLOR_OFFSET: usize = 16;

/// Extra bytes of per-point fields (normals) ahead of the color channel
const NORMAL_FIELD_BYTES: usize = 16;

/// Point record layout, selected by the message's point step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointStep {
    /// 16 bytes: `x y z _`, no color
    Xyz,
    /// 32 bytes: `x y z _ b g r ...`
    XyzRgb,
    /// 48 bytes: `x y z _ normals(16) b g r ...`
    XyzNormalRgb,
    /// Any other stride: positions only, colors are left alone
    Unknown(u32),
}

impl PointStep {
    /// Classify a record stride
    pub fn from_stride(point_step: u32) -> Self {
        match point_step {
            16 => PointStep::Xyz,
            32 => PointStep::XyzRgb,
            48 => PointStep::XyzNormalRgb,
            other => PointStep::Unknown(other),
        }
    }

    /// Record stride in bytes
    pub fn stride(&self) -> u32 {
        match self {
            PointStep::Xyz => 16,
            PointStep::XyzRgb => 32,
            PointStep::XyzNormalRgb => 48,
            PointStep::Unknown(stride) => *stride,
        }
    }

    /// Byte offset of the blue channel within a record, if the layout has color
    pub fn color_offset(&self) -> Option<usize> {
        match self {
            PointStep::XyzRgb => Some(COLOR_OFFSET),
            PointStep::XyzNormalRgb => Some(COLOR_OFFSET + NORMAL_FIELD_BYTES),
            PointStep::Xyz | PointStep::Unknown(_) => None,
        }
    }

    /// Whether records of this layout carry color
    pub fn has_color(&self) -> bool {
        self.color_offset().is_some()
    }
}

/// An organized point cloud as delivered by the messaging transport
///
/// Only the fields needed to decode the payload are kept; everything else in
/// the message (header, field descriptors, `row_step`, `is_dense`) is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointCloud2 {
    pub width: u32,
    pub height: u32,
    pub point_step: u32,
    /// Base64 encoded point records
    pub data: String,
    #[serde(default)]
    pub is_bigendian: bool,
}

impl PointCloud2 {
    /// Number of points in the declared grid
    pub fn total_points(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Byte order of the payload
    pub fn endianness(&self) -> Endianness {
        Endianness::from_big_endian_flag(self.is_bigendian)
    }

    /// Record layout implied by the point step
    pub fn layout(&self) -> PointStep {
        PointStep::from_stride(self.point_step)
    }

    /// Minimum decoded payload length, or `None` if it overflows `usize`
    pub fn required_bytes(&self) -> Option<usize> {
        self.total_points().checked_mul(self.point_step as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_selection() {
        assert_eq!(PointStep::from_stride(16), PointStep::Xyz);
        assert_eq!(PointStep::from_stride(32), PointStep::XyzRgb);
        assert_eq!(PointStep::from_stride(48), PointStep::XyzNormalRgb);
        assert_eq!(PointStep::from_stride(24), PointStep::Unknown(24));

        for stride in [16, 24, 32, 48, 64] {
            assert_eq!(PointStep::from_stride(stride).stride(), stride);
        }
    }

    #[test]
    fn test_color_offsets() {
        assert_eq!(PointStep::XyzRgb.color_offset(), Some(16));
        assert_eq!(PointStep::XyzNormalRgb.color_offset(), Some(32));
        assert!(!PointStep::Xyz.has_color());
        assert!(!PointStep::Unknown(40).has_color());
    }

    #[test]
    fn test_deserialize_rosbridge_message() {
        let json = r#"{
            "header": {"frame_id": "camera_depth_optical_frame"},
            "height": 480,
            "width": 640,
            "fields": [],
            "is_bigendian": false,
            "point_step": 32,
            "row_step": 20480,
            "data": "AAAA",
            "is_dense": false
        }"#;
        let msg: PointCloud2 = serde_json::from_str(json).unwrap();
        assert_eq!(msg.total_points(), 640 * 480);
        assert_eq!(msg.layout(), PointStep::XyzRgb);
        assert_eq!(msg.endianness(), Endianness::Little);
        assert_eq!(msg.required_bytes(), Some(640 * 480 * 32));
    }
}
