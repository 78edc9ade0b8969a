//! Synthesis of `PointCloud2` messages from known points
//!
//! Useful wherever a publisher is not available: tests, benchmarks and
//! simulated sensors. Records are laid out the same way the decoder reads
//! them: `x y z`, one unused 4-byte channel, optional normals, then the color
//! as blue, green, red bytes. Remaining record bytes are zero.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ros3d_core::Point3f;

use crate::buffer_view::Endianness;
use crate::point_cloud2::{PointCloud2, PointStep};

/// Writer for point records of a fixed stride
#[derive(Debug, Clone, Copy)]
pub struct FrameEncoder {
    layout: PointStep,
    endian: Endianness,
}

impl FrameEncoder {
    /// Create an encoder producing records of `point_step` bytes
    ///
    /// # Panics
    ///
    /// Panics if `point_step` cannot hold the position triple and the unused channel.
    pub fn new(point_step: u32) -> Self {
        assert!(
            point_step >= crate::point_cloud2::MANDATORY_FIELD_BYTES,
            "point step {} is too small to hold a position",
            point_step
        );
        Self {
            layout: PointStep::from_stride(point_step),
            endian: Endianness::Little,
        }
    }

    /// Set the byte order of the float fields
    pub fn with_endianness(mut self, endian: Endianness) -> Self {
        self.endian = endian;
        self
    }

    /// Raw record bytes for `points`, with `colors` given as `[r, g, b]`
    ///
    /// Colors are ignored for layouts that have no color channel; points
    /// without a matching color entry get black.
    pub fn encode_bytes(&self, points: &[Point3f], colors: Option<&[[u8; 3]]>) -> Vec<u8> {
        let stride = self.layout.stride() as usize;
        let mut bytes = Vec::with_capacity(points.len() * stride);

        for (i, point) in points.iter().enumerate() {
            let start = bytes.len();
            for v in [point.x, point.y, point.z] {
                let raw = match self.endian {
                    Endianness::Little => v.to_le_bytes(),
                    Endianness::Big => v.to_be_bytes(),
                };
                bytes.extend_from_slice(&raw);
            }
            bytes.resize(start + stride, 0);

            if let Some(offset) = self.layout.color_offset() {
                let [r, g, b] = colors.and_then(|c| c.get(i)).copied().unwrap_or_default();
                bytes[start + offset..start + offset + 3].copy_from_slice(&[b, g, r]);
            }
        }
        bytes
    }

    /// Build a complete `width × height` message
    ///
    /// `points` may hold fewer entries than the grid declares, which yields a
    /// truncated payload.
    pub fn encode(
        &self,
        width: u32,
        height: u32,
        points: &[Point3f],
        colors: Option<&[[u8; 3]]>,
    ) -> PointCloud2 {
        PointCloud2 {
            width,
            height,
            point_step: self.layout.stride(),
            data: STANDARD.encode(self.encode_bytes(points, colors)),
            is_bigendian: self.endian == Endianness::Big,
        }
    }
}
