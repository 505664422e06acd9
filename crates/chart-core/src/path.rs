// File: crates/chart-core/src/path.rs
// Summary: Line generator; the single place where samples are projected to pixels.

use std::fmt::Write as _;

use crate::geometry::Point;
use crate::scale::{ContinuousScale, LogScale, Scales, TimeScale};
use crate::series::{Sample, Series};

/// Projects samples through the chart scales and strokes series as straight polylines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineGenerator {
    x: TimeScale,
    y: LogScale,
}

impl LineGenerator {
    pub fn new(scales: &Scales) -> Self {
        Self { x: scales.x, y: scales.y }
    }

    #[inline]
    pub fn x(&self, sample: &Sample) -> f64 {
        self.x.map(sample.date)
    }

    /// Values are shifted by one before the log mapping, so 0 lands on the value-1 floor.
    #[inline]
    pub fn y(&self, sample: &Sample) -> f64 {
        self.y.map(1.0 + sample.value)
    }

    #[inline]
    pub fn project(&self, sample: &Sample) -> Point {
        Point::new(self.x(sample), self.y(sample))
    }

    /// One point per sample, in series order.
    pub fn points(&self, series: &Series) -> Vec<Point> {
        series.samples.iter().map(|s| self.project(s)).collect()
    }

    /// SVG path data (`M x,y L x,y ...`). Empty for an empty series.
    pub fn path_data(&self, series: &Series) -> String {
        let mut d = String::with_capacity(series.len() * 16);
        for (i, p) in self.points(series).into_iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{cmd}{},{}", fmt_coord(p.x), fmt_coord(p.y));
        }
        d
    }
}

/// Trim coordinates to three decimals without trailing zeros.
pub(crate) fn fmt_coord(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
