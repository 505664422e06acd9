// File: crates/chart-core/src/axis.rs
// Summary: Axis tick models and reference lines built from the chart scales.

use chrono::{DateTime, Utc};

use crate::format::{format_date, format_si};
use crate::scale::{ContinuousScale, LogScale, TimeScale};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleKind {
    Time,
    Log10,
}

/// One tick: its pixel offset along the axis and the text to print.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Ticks plus a title for one axis. Drawing them is left to the host.
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub kind: ScaleKind,
    pub ticks: Vec<Tick>,
}

impl Axis {
    /// Bottom time axis with evenly spaced ticks.
    pub fn time(label: impl Into<String>, scale: &TimeScale, count: usize, date_format: &str) -> Self {
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|d: DateTime<Utc>| Tick { position: scale.map(d), label: format_date(&d, date_format) })
            .collect();
        Self { label: label.into(), kind: ScaleKind::Time, ticks }
    }

    /// Left log axis with SI-prefixed labels.
    pub fn log(label: impl Into<String>, scale: &LogScale, count: usize) -> Self {
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|v| Tick { position: scale.map(v), label: format_si(v) })
            .collect();
        Self { label: label.into(), kind: ScaleKind::Log10, ticks }
    }
}

/// Horizontal reference line at a fixed value, e.g. a "1M" threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerLine {
    pub value: f64,
    pub label: String,
}

impl MarkerLine {
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self { value, label: label.into() }
    }

    /// Pixel row of the line. Reference values are not offset like sample values are.
    pub fn y(&self, scale: &LogScale) -> f64 {
        scale.map(self.value)
    }
}
