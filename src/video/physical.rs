// Physical surface set - double-buffered packed-pixel presentation memory
//
// One mapping holds two equal halves. The conversion engine writes the
// inactive half and flips; the display consumer reads the active half. Each
// half is sized to the next power of two above width×height×4 bytes because
// the presentation hardware expects power-of-two-aligned buffer strides.

use crate::error::VideoError;
use crate::mem::MappedBuffer;

/// Double-buffered physical presentation surface.
pub struct PhysicalSurfaceSet {
    buf: MappedBuffer,
    half_len: usize,
    pixel_count: usize,
    active: usize,
}

impl PhysicalSurfaceSet {
    /// Allocate both halves for a width×height surface.
    pub fn new(width: usize, height: usize) -> Result<Self, VideoError> {
        if width == 0 || height == 0 {
            return Err(VideoError::InvalidDimensions { width, height });
        }
        let pixel_count = width * height;
        let half_len = (pixel_count * 4).next_power_of_two();
        let buf = MappedBuffer::map(half_len * 2)?;
        Ok(PhysicalSurfaceSet {
            buf,
            half_len,
            pixel_count,
            active: 0,
        })
    }

    /// Byte length of one half
    pub fn half_len(&self) -> usize {
        self.half_len
    }

    /// Pixels per frame (texels actually written per half)
    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    /// Index of the half currently active for presentation
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The half currently active for presentation
    pub fn active_half(&self) -> &[u8] {
        let start = self.active * self.half_len;
        &self.buf.as_slice()[start..start + self.half_len]
    }

    /// Write pointer into the currently inactive half.
    ///
    /// The caller must write at most `pixel_count` texels before flipping.
    pub fn back_half_ptr(&mut self) -> *mut u64 {
        let start = (self.active ^ 1) * self.half_len;
        unsafe { self.buf.as_mut_ptr().add(start) as *mut u64 }
    }

    /// Make the just-written half active. Plain toggle; consumer signaling
    /// is external to this module.
    pub fn flip(&mut self) {
        self.active ^= 1;
    }

    /// Backing physical address, where the platform can translate it
    pub fn physical_address(&self) -> Option<u64> {
        self.buf.physical_address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_is_next_pow2() {
        let set = PhysicalSurfaceSet::new(320, 200).unwrap();
        // 320*200*4 = 256000 -> 262144
        assert_eq!(set.half_len(), 262144);
        assert_eq!(set.pixel_count(), 64000);
    }

    #[test]
    fn test_exact_pow2_not_inflated() {
        let set = PhysicalSurfaceSet::new(256, 256).unwrap();
        assert_eq!(set.half_len(), 256 * 256 * 4);
    }

    #[test]
    fn test_flip_alternates() {
        let mut set = PhysicalSurfaceSet::new(64, 64).unwrap();
        assert_eq!(set.active_index(), 0);
        set.flip();
        assert_eq!(set.active_index(), 1);
        set.flip();
        assert_eq!(set.active_index(), 0);
    }

    #[test]
    fn test_back_half_is_not_active_half() {
        let mut set = PhysicalSurfaceSet::new(64, 64).unwrap();
        let back = set.back_half_ptr() as usize;
        let active = set.active_half().as_ptr() as usize;
        assert_ne!(back, active);
        assert_eq!(back, active + set.half_len());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            PhysicalSurfaceSet::new(0, 0),
            Err(VideoError::InvalidDimensions { .. })
        ));
    }
}
