// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (surface extent, margins).

/// Default surface width in pixels.
pub const WIDTH: u32 = 960;
/// Default surface height in pixels.
pub const HEIGHT: u32 = 500;

/// Outer surface size supplied by the host layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Plot area left after removing `margin`; components may be zero or negative.
    pub fn inner(&self, margin: &Insets) -> (f64, f64) {
        (
            self.width as f64 - margin.hsum() as f64,
            self.height as f64 - margin.vsum() as f64,
        )
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    /// Room for the value axis on the left and the time axis plus title below.
    fn default() -> Self {
        Self::new(100, 30, 30, 80)
    }
}
