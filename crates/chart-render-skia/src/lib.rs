// File: crates/chart-render-skia/src/lib.rs
// Summary: Skia raster backend for the chart render tree. Styling is always available;
// drawing and PNG encoding need the `raster` feature.

pub mod style;
#[cfg(feature = "raster")]
pub mod raster;

pub use style::{RasterStyle, Rgba};
#[cfg(feature = "raster")]
pub use raster::SkiaRenderer;
