//! Bounds-checked cursor over a decoded point cloud payload
//!
//! The view tracks two offsets: the absolute position in the payload and the
//! number of bytes consumed since the start of the current point record. The
//! second one lets the decoder jump to the next record boundary no matter
//! which fields of the current record it actually read.

use crate::error::{DecodeError, DecodeResult};

/// Byte order of multi-byte fields in a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

impl Endianness {
    /// Map the `is_bigendian` message flag to a byte order
    pub fn from_big_endian_flag(is_bigendian: bool) -> Self {
        if is_bigendian {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }
}

/// Read cursor over payload bytes
#[derive(Debug)]
pub struct BufferView<'a> {
    bytes: &'a [u8],
    endian: Endianness,
    offset: usize,
    point_offset: usize,
}

impl<'a> BufferView<'a> {
    /// Create a view positioned at the start of `bytes`
    pub fn new(bytes: &'a [u8], endian: Endianness) -> Self {
        Self {
            bytes,
            endian,
            offset: 0,
            point_offset: 0,
        }
    }

    /// Absolute byte offset into the payload
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes consumed since the last [`reset_point_offset`](Self::reset_point_offset)
    pub fn point_offset(&self) -> usize {
        self.point_offset
    }

    /// Bytes left after the cursor
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    /// Mark the cursor as sitting at the start of a new point record
    pub fn reset_point_offset(&mut self) {
        self.point_offset = 0;
    }

    fn take<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let end = self.offset + N;
        let slice = self.bytes.get(self.offset..end).ok_or(DecodeError::TruncatedPayload {
            expected: end,
            actual: self.bytes.len(),
        })?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        self.offset = end;
        self.point_offset += N;
        Ok(out)
    }

    /// Read a 32-bit float in the view's byte order
    pub fn read_f32(&mut self) -> DecodeResult<f32> {
        let raw = self.take::<4>()?;
        Ok(match self.endian {
            Endianness::Little => f32::from_le_bytes(raw),
            Endianness::Big => f32::from_be_bytes(raw),
        })
    }

    /// Read a single unsigned byte
    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.take::<1>()?[0])
    }

    /// Advance the cursor without reading
    ///
    /// Skipping up to the end of the payload is allowed; skipping past it is not.
    pub fn skip(&mut self, bytes: usize) -> DecodeResult<()> {
        let end = self.offset + bytes;
        if end > self.bytes.len() {
            return Err(DecodeError::TruncatedPayload {
                expected: end,
                actual: self.bytes.len(),
            });
        }
        self.offset = end;
        self.point_offset += bytes;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_little_and_big_endian() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1.5f32.to_le_bytes());
        bytes.extend_from_slice(&(-2.25f32).to_be_bytes());

        let mut view = BufferView::new(&bytes, Endianness::Little);
        assert_eq!(view.read_f32().unwrap(), 1.5);

        let mut view = BufferView::new(&bytes[4..], Endianness::Big);
        assert_eq!(view.read_f32().unwrap(), -2.25);
    }

    #[test]
    fn test_offsets_track_reads_and_skips() {
        let bytes = [0u8, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        let mut view = BufferView::new(&bytes, Endianness::Little);

        view.skip(4).unwrap();
        assert_eq!(view.read_u8().unwrap(), 4);
        assert_eq!(view.offset(), 5);
        assert_eq!(view.point_offset(), 5);

        view.reset_point_offset();
        assert_eq!(view.read_u8().unwrap(), 5);
        assert_eq!(view.offset(), 6);
        assert_eq!(view.point_offset(), 1);
        assert_eq!(view.remaining(), 4);
    }

    #[test]
    fn test_reads_past_end_fail() {
        let bytes = [0u8; 3];
        let mut view = BufferView::new(&bytes, Endianness::Little);
        assert_eq!(
            view.read_f32(),
            Err(DecodeError::TruncatedPayload { expected: 4, actual: 3 })
        );
        // A failed read does not move the cursor.
        assert_eq!(view.offset(), 0);

        view.skip(3).unwrap();
        assert!(view.skip(1).is_err());
        assert!(view.read_u8().is_err());
    }

    #[test]
    fn test_endianness_flag() {
        assert_eq!(Endianness::from_big_endian_flag(true), Endianness::Big);
        assert_eq!(Endianness::from_big_endian_flag(false), Endianness::Little);
    }
}
