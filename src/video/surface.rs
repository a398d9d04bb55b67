// Logical surface - indexed-color render target
//
// One byte per pixel, each byte a palette index. The engine's renderer
// writes into this surface; the conversion engine only reads it.

use crate::error::VideoError;
use crate::mem::MappedBuffer;

/// Indexed-color surface of width×height palette indices.
pub struct LogicalSurface {
    buf: MappedBuffer,
    width: usize,
    height: usize,
}

impl LogicalSurface {
    /// Allocate a surface of the given dimensions.
    ///
    /// # Errors
    /// `InvalidDimensions` if width×height is zero, `OutOfMemory` if the
    /// backing mapping fails.
    pub fn new(width: usize, height: usize) -> Result<Self, VideoError> {
        if width == 0 || height == 0 {
            return Err(VideoError::InvalidDimensions { width, height });
        }
        let buf = MappedBuffer::map(width * height)?;
        Ok(LogicalSurface { buf, width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of pixels
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, palette_index: u8) {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);

        self.buf.as_mut_slice()[y * self.width + x] = palette_index;
    }

    /// Get a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);

        self.buf.as_slice()[y * self.width + x]
    }

    /// Fill the whole surface with one palette index
    pub fn clear(&mut self, palette_index: u8) {
        self.buf.as_mut_slice().fill(palette_index);
    }

    pub fn as_slice(&self) -> &[u8] {
        self.buf.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.buf.as_mut_slice()
    }

    /// Copy the surface byte-exactly into caller-provided storage.
    ///
    /// # Panics
    /// Panics if `out` is not exactly width×height bytes
    pub fn read_into(&self, out: &mut [u8]) {
        assert_eq!(
            out.len(),
            self.len(),
            "Output buffer must match surface size"
        );
        out.copy_from_slice(self.buf.as_slice());
    }

    /// Backing physical address, where the platform can translate it
    pub fn physical_address(&self) -> Option<u64> {
        self.buf.physical_address()
    }
}
