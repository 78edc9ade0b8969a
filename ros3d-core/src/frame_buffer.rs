//! Fixed-capacity position/color buffers handed to a renderer
//!
//! A [`FrameBuffer`] is sized once from an organized grid (`width × height`)
//! and never resized afterwards. Incoming frames rewrite it in place and then
//! raise the dirty signal, which the rendering side acknowledges with
//! [`FrameBuffer::take_dirty`] before re-uploading both arrays.

use crate::point::{Color3f, ColoredPoint3f, Point3f};

/// Number of floats stored per point in each array
pub const COMPONENTS: usize = 3;

/// Two flat `f32` arrays (positions and colors) with a dirty flag
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    position: Vec<f32>,
    color: Vec<f32>,
    dirty: bool,
    version: u64,
}

impl FrameBuffer {
    /// Allocate zero-initialized buffers for a `width × height` grid
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or the capacity overflows.
    pub fn allocate(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "frame buffer dimensions must be positive, got {}x{}",
            width,
            height
        );
        let len = width
            .checked_mul(height)
            .and_then(|capacity| capacity.checked_mul(COMPONENTS))
            .unwrap_or_else(|| panic!("frame buffer size {}x{} overflows", width, height));

        Self {
            width,
            height,
            position: vec![0.0; len],
            color: vec![0.0; len],
            dirty: false,
            version: 0,
        }
    }

    /// Grid width the buffer was allocated for
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height the buffer was allocated for
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of points the buffer holds
    pub fn capacity(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    fn offset(&self, index: usize) -> usize {
        assert!(
            index < self.capacity(),
            "point index {} out of range for frame buffer of capacity {}",
            index,
            self.capacity()
        );
        index * COMPONENTS
    }

    /// Overwrite the position triple at `index`
    #[inline]
    pub fn set_position(&mut self, index: usize, x: f32, y: f32, z: f32) {
        let i3 = self.offset(index);
        self.position[i3..i3 + COMPONENTS].copy_from_slice(&[x, y, z]);
    }

    /// Overwrite the color triple at `index`
    #[inline]
    pub fn set_color(&mut self, index: usize, r: f32, g: f32, b: f32) {
        let i3 = self.offset(index);
        self.color[i3..i3 + COMPONENTS].copy_from_slice(&[r, g, b]);
    }

    /// Copy the position triple stored at `from` into `to`
    #[inline]
    pub fn copy_position(&mut self, from: usize, to: usize) {
        let src = self.offset(from);
        let dst = self.offset(to);
        self.position.copy_within(src..src + COMPONENTS, dst);
    }

    /// Position of the point at `index`
    pub fn position(&self, index: usize) -> Point3f {
        let i3 = self.offset(index);
        Point3f::new(self.position[i3], self.position[i3 + 1], self.position[i3 + 2])
    }

    /// Normalized color of the point at `index`
    pub fn color(&self, index: usize) -> Color3f {
        let i3 = self.offset(index);
        [self.color[i3], self.color[i3 + 1], self.color[i3 + 2]]
    }

    /// Flat `[x, y, z, x, y, z, ...]` positions
    pub fn positions(&self) -> &[f32] {
        &self.position
    }

    /// Flat `[r, g, b, r, g, b, ...]` colors
    pub fn colors(&self) -> &[f32] {
        &self.color
    }

    /// Raw bytes of the position array, ready for a vertex buffer upload
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.position)
    }

    /// Raw bytes of the color array, ready for a vertex buffer upload
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color)
    }

    /// Iterate over every slot as a colored point
    pub fn points(&self) -> impl Iterator<Item = ColoredPoint3f> + '_ {
        self.position
            .chunks_exact(COMPONENTS)
            .zip(self.color.chunks_exact(COMPONENTS))
            .map(|(p, c)| ColoredPoint3f {
                position: Point3f::new(p[0], p[1], p[2]),
                color: [c[0], c[1], c[2]],
            })
    }

    /// Signal the renderer that both arrays changed
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        self.version += 1;
    }

    /// Whether a dirty signal is pending
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Acknowledge a pending dirty signal, returning whether one was pending
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Number of dirty signals raised since allocation
    pub fn version(&self) -> u64 {
        self.version
    }
}
