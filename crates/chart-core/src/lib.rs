// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports scales, line geometry, hover resolution and the chart composer.

pub mod axis;
pub mod chart;
pub mod delaunay;
pub mod error;
pub mod format;
pub mod geometry;
pub mod grid;
pub mod hover;
pub mod path;
pub mod render;
pub mod scale;
pub mod series;
pub mod types;

pub use axis::{Axis, MarkerLine, Tick};
pub use chart::{Chart, ChartOptions, HoverChange, HoverState, PointerEvent};
pub use error::ChartError;
pub use format::TooltipFormat;
pub use geometry::{Point, Rect};
pub use hover::{HoverConfig, HoverResolver, Strategy};
pub use path::LineGenerator;
pub use render::{CurveStyle, RenderTree};
pub use scale::{build_scales, ContinuousScale, LogScale, Scales, TimeScale};
pub use series::{Dataset, DatasetId, Sample, SampleId, Series};
pub use types::{Extent, Insets};
