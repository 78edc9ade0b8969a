//! Decoding of `PointCloud2` payloads into a [`FrameBuffer`]
//!
//! Each real point contributes its position and, for layouts that carry one,
//! its color. Buffer slots beyond the frame's point count take the position
//! of the last real point so the unused capacity collapses onto it instead of
//! drawing stray geometry at the origin.
//!
//! A decode either rewrites the buffer and raises its dirty signal, or fails
//! without touching it: the stride and payload length are validated before
//! the first write.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ros3d_core::{normalize_channel, FrameBuffer};

use crate::buffer_view::BufferView;
use crate::error::{DecodeError, DecodeResult};
use crate::point_cloud2::{PointCloud2, PointStep, MANDATORY_FIELD_BYTES};

/// Bytes of the unused channel that follows the position triple
const RESERVED_CHANNEL_BYTES: usize = 4;

/// Reusable decoder; keeps its payload scratch allocation between frames
#[derive(Debug, Default)]
pub struct PointCloudDecoder {
    payload: Vec<u8>,
}

impl PointCloudDecoder {
    /// Create a decoder with an empty scratch buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrite `buffer` from the contents of `frame`
    ///
    /// A frame with no points is ignored and leaves the buffer, including its
    /// dirty flag, exactly as it was.
    pub fn decode(&mut self, frame: &PointCloud2, buffer: &mut FrameBuffer) -> DecodeResult<()> {
        let total_points = frame.total_points();
        if total_points == 0 {
            log::trace!("ignoring empty point cloud frame");
            return Ok(());
        }

        if frame.point_step < MANDATORY_FIELD_BYTES {
            return Err(DecodeError::MalformedStride {
                point_step: frame.point_step,
                minimum: MANDATORY_FIELD_BYTES,
            });
        }

        self.payload.clear();
        STANDARD.decode_vec(frame.data.as_bytes(), &mut self.payload)?;

        let expected = frame.required_bytes().unwrap_or(usize::MAX);
        if self.payload.len() < expected {
            return Err(DecodeError::TruncatedPayload {
                expected,
                actual: self.payload.len(),
            });
        }

        let capacity = buffer.capacity();
        if capacity != total_points {
            log::debug!(
                "point cloud grid {}x{} ({} points) does not match buffer capacity {}",
                frame.width,
                frame.height,
                total_points,
                capacity
            );
        }

        let layout = frame.layout();
        let real_points = total_points.min(capacity);
        let mut view = BufferView::new(&self.payload, frame.endianness());

        for i in 0..real_points {
            decode_point(&mut view, layout, i, buffer)?;
        }
        for i in real_points..capacity {
            buffer.copy_position(i - 1, i);
        }

        log::trace!(
            "decoded {} points ({:?}, {:?}) into buffer of {}",
            real_points,
            layout,
            frame.endianness(),
            capacity
        );
        buffer.mark_dirty();
        Ok(())
    }
}

/// Decode the record under the cursor into slot `index` and align to the next record
fn decode_point(
    view: &mut BufferView<'_>,
    layout: PointStep,
    index: usize,
    buffer: &mut FrameBuffer,
) -> DecodeResult<()> {
    view.reset_point_offset();

    let x = view.read_f32()?;
    let y = view.read_f32()?;
    let z = view.read_f32()?;
    buffer.set_position(index, x, y, z);
    view.skip(RESERVED_CHANNEL_BYTES)?;

    if let Some(color_offset) = layout.color_offset() {
        view.skip(color_offset - view.point_offset())?;
        let b = view.read_u8()?;
        let g = view.read_u8()?;
        let r = view.read_u8()?;
        buffer.set_color(index, normalize_channel(r), normalize_channel(g), normalize_channel(b));
    }

    let stride = layout.stride() as usize;
    let padding = stride.checked_sub(view.point_offset()).ok_or(DecodeError::MalformedStride {
        point_step: layout.stride(),
        minimum: view.point_offset() as u32,
    })?;
    view.skip(padding)
}
