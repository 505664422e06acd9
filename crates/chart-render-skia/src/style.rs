// File: crates/chart-render-skia/src/style.rs
// Summary: Colors and stroke widths used when rasterizing a render tree.

/// Straight (non-premultiplied) RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        let byte = |i: usize| digits.get(i..i + 2).and_then(|s| u8::from_str_radix(s, 16).ok());
        match digits.len() {
            6 => Some(Self::opaque(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Packed `0xAARRGGBB`, the layout Skia colors use.
    pub const fn to_argb_u32(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RasterStyle {
    pub background: Rgba,
    pub curve: Rgba,
    pub curve_width: f32,
    /// Stroke of the emphasized (hovered) series.
    pub active: Rgba,
    pub active_width: f32,
    pub marker_line: Rgba,
    pub marker: Rgba,
    pub text: Rgba,
    /// Outline drawn under tooltip text.
    pub halo: Rgba,
    pub halo_width: f32,
    pub cell: Rgba,
    pub font_size: f32,
}

impl Default for RasterStyle {
    fn default() -> Self {
        Self {
            background: Rgba::opaque(255, 255, 255),
            curve: Rgba::new(0, 0, 0, 60),
            curve_width: 1.5,
            active: Rgba::opaque(0, 0, 0),
            active_width: 3.0,
            marker_line: Rgba::opaque(160, 160, 160),
            marker: Rgba::new(0, 0, 0, 40),
            text: Rgba::opaque(0, 0, 0),
            halo: Rgba::opaque(255, 255, 255),
            halo_width: 4.0,
            cell: Rgba::new(255, 0, 0, 80),
            font_size: 16.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(Rgba::from_hex("#ff8000"), Some(Rgba::opaque(255, 128, 0)));
        assert_eq!(Rgba::from_hex("#00000080"), Some(Rgba::new(0, 0, 0, 128)));
        assert_eq!(Rgba::from_hex("ff8000"), None);
        assert_eq!(Rgba::from_hex("#ff80"), None);
        assert_eq!(Rgba::from_hex("#gg0000"), None);
    }

    #[test]
    fn packs_argb() {
        assert_eq!(Rgba::new(0x11, 0x22, 0x33, 0x44).to_argb_u32(), 0x4411_2233);
    }
}
