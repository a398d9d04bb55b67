// Palette tables - gamma correction, packed color lookup, RGB565 mirror
//
// A palette update rebuilds two tables in full: the 256-entry packed-color
// lookup used by the conversion loop, and an RGB565 mirror of the same
// palette used for nearest-color queries. Neither table is ever partially
// updated.
//
// Packed pixel layout is the presentation hardware's wire format: 4 bytes
// per texel, byte0=B, byte1=G, byte2=R, byte3=A, alpha always zero. On the
// little-endian target that is the u32 value (r<<16)|(g<<8)|b.

/// Number of palette entries
pub const PALETTE_SIZE: usize = 256;

/// Size of a raw palette: 256 RGB triples
pub const PALETTE_BYTES: usize = PALETTE_SIZE * 3;

/// Number of gamma correction levels
pub const GAMMA_LEVELS: usize = 5;

// Power-curve exponents per gamma level; level 0 is identity, higher
// levels brighten the output.
const GAMMA_EXPONENTS: [f32; GAMMA_LEVELS] = [1.0, 0.875, 0.75, 0.625, 0.5];

/// Pack one RGB triple into the presentation pixel format (alpha zero).
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Per-channel gamma correction lookup for one gamma level.
pub struct GammaTable {
    table: [u8; 256],
    level: usize,
}

impl GammaTable {
    /// Build the table for a gamma level. Levels above the maximum clamp.
    pub fn new(level: usize) -> Self {
        let level = level.min(GAMMA_LEVELS - 1);
        let mut table = [0u8; 256];
        if level == 0 {
            for (i, entry) in table.iter_mut().enumerate() {
                *entry = i as u8;
            }
        } else {
            let exponent = GAMMA_EXPONENTS[level];
            for (i, entry) in table.iter_mut().enumerate() {
                let corrected = 255.0 * (i as f32 / 255.0).powf(exponent);
                *entry = (corrected + 0.5) as u8;
            }
        }
        GammaTable { table, level }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Correct one channel value
    #[inline]
    pub fn correct(&self, channel: u8) -> u8 {
        self.table[channel as usize]
    }
}

/// Palette-index → packed-color lookup table for the conversion loop.
pub struct ColorTable {
    packed: [u32; PALETTE_SIZE],
}

impl ColorTable {
    pub fn new() -> Self {
        ColorTable {
            packed: [0; PALETTE_SIZE],
        }
    }

    /// Rebuild the full table from 256 RGB triples through the gamma table.
    pub fn rebuild(&mut self, palette: &[u8; PALETTE_BYTES], gamma: &GammaTable) {
        for i in 0..PALETTE_SIZE {
            let r = gamma.correct(palette[i * 3]);
            let g = gamma.correct(palette[i * 3 + 1]);
            let b = gamma.correct(palette[i * 3 + 2]);
            self.packed[i] = pack_rgb(r, g, b);
        }
    }

    /// Packed color for one palette index
    #[inline]
    pub fn entry(&self, index: u8) -> u32 {
        self.packed[index as usize]
    }

    /// The whole table, for the conversion loop
    #[inline]
    pub fn packed(&self) -> &[u32; PALETTE_SIZE] {
        &self.packed
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::new()
    }
}

/// RGB565 mirror of the active palette, for nearest-color queries.
pub struct Rgb565Palette {
    entries: [u16; PALETTE_SIZE],
}

impl Rgb565Palette {
    pub fn new() -> Self {
        Rgb565Palette {
            entries: [0; PALETTE_SIZE],
        }
    }

    /// Rebuild the mirror from the same palette bytes as the color table.
    pub fn rebuild(&mut self, palette: &[u8; PALETTE_BYTES], gamma: &GammaTable) {
        for i in 0..PALETTE_SIZE {
            let r = gamma.correct(palette[i * 3]);
            let g = gamma.correct(palette[i * 3 + 1]);
            let b = gamma.correct(palette[i * 3 + 2]);
            self.entries[i] = Self::encode(r, g, b);
        }
    }

    #[inline]
    fn encode(r: u8, g: u8, b: u8) -> u16 {
        (((r as u16 & 0xF8) >> 3) << 11) | (((g as u16 & 0xFC) >> 2) << 5) | ((b as u16 & 0xF8) >> 3)
    }

    /// Decode an entry back to 8-bit channels
    #[inline]
    pub fn decode(entry: u16) -> (u8, u8, u8) {
        let r = ((entry >> 11) & 0x1F) as u8;
        let g = ((entry >> 5) & 0x3F) as u8;
        let b = (entry & 0x1F) as u8;
        (r << 3, g << 2, b << 3)
    }

    #[inline]
    pub fn entry(&self, index: u8) -> u16 {
        self.entries[index as usize]
    }

    /// Closest palette index to an RGB query by squared Euclidean distance.
    ///
    /// Ties go to the lowest index; an exact match short-circuits the scan.
    /// Before any palette load the entries are all zero and the result is 0.
    pub fn find_nearest(&self, r: u8, g: u8, b: u8) -> u8 {
        let mut best = 0usize;
        let mut best_diff = i32::MAX;

        for (i, &entry) in self.entries.iter().enumerate() {
            let (er, eg, eb) = Self::decode(entry);
            let dr = r as i32 - er as i32;
            let dg = g as i32 - eg as i32;
            let db = b as i32 - eb as i32;
            let diff = dr * dr + dg * dg + db * db;

            if diff < best_diff {
                best = i;
                best_diff = diff;
            }

            if diff == 0 {
                break;
            }
        }

        best as u8
    }
}

impl Default for Rgb565Palette {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_palette() -> [u8; PALETTE_BYTES] {
        let mut palette = [0u8; PALETTE_BYTES];
        for i in 0..PALETTE_SIZE {
            palette[i * 3] = i as u8;
            palette[i * 3 + 1] = (i as u8).wrapping_mul(3);
            palette[i * 3 + 2] = 255 - i as u8;
        }
        palette
    }

    #[test]
    fn test_gamma_level_zero_is_identity() {
        let gamma = GammaTable::new(0);
        for c in 0..=255u8 {
            assert_eq!(gamma.correct(c), c);
        }
    }

    #[test]
    fn test_gamma_brightens_and_preserves_endpoints() {
        for level in 1..GAMMA_LEVELS {
            let gamma = GammaTable::new(level);
            assert_eq!(gamma.correct(0), 0);
            assert_eq!(gamma.correct(255), 255);
            assert!(gamma.correct(64) > 64);
        }
    }

    #[test]
    fn test_gamma_level_clamps() {
        let gamma = GammaTable::new(99);
        assert_eq!(gamma.level(), GAMMA_LEVELS - 1);
    }

    #[test]
    fn test_pack_rgb_wire_layout() {
        // byte0=B, byte1=G, byte2=R, byte3=A on the little-endian target
        let packed = pack_rgb(0x12, 0x34, 0x56);
        assert_eq!(packed.to_le_bytes(), [0x56, 0x34, 0x12, 0x00]);
    }

    #[test]
    fn test_color_table_identity_rebuild() {
        let palette = test_palette();
        let gamma = GammaTable::new(0);
        let mut table = ColorTable::new();
        table.rebuild(&palette, &gamma);

        for i in 0..PALETTE_SIZE {
            let expected = pack_rgb(palette[i * 3], palette[i * 3 + 1], palette[i * 3 + 2]);
            assert_eq!(table.entry(i as u8), expected);
        }
    }

    #[test]
    fn test_rgb565_roundtrip_masks_low_bits() {
        let e = Rgb565Palette::encode(0xFF, 0xFF, 0xFF);
        assert_eq!(Rgb565Palette::decode(e), (0xF8, 0xFC, 0xF8));

        let e = Rgb565Palette::encode(0x17, 0x2B, 0x09);
        assert_eq!(Rgb565Palette::decode(e), (0x10, 0x28, 0x08));
    }

    #[test]
    fn test_find_nearest_exact() {
        let palette = test_palette();
        let gamma = GammaTable::new(0);
        let mut mirror = Rgb565Palette::new();
        mirror.rebuild(&palette, &gamma);

        for k in [0u8, 1, 77, 200, 255] {
            let (r, g, b) = Rgb565Palette::decode(mirror.entry(k));
            let found = mirror.find_nearest(r, g, b);
            // Lowest-indexed exact duplicate wins
            let expected = (0..=255u8)
                .find(|&i| mirror.entry(i) == mirror.entry(k))
                .unwrap();
            assert_eq!(found, expected);
        }
    }

    #[test]
    fn test_find_nearest_before_load_returns_zero() {
        let mirror = Rgb565Palette::new();
        assert_eq!(mirror.find_nearest(200, 100, 50), 0);
    }
}
