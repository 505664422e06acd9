// File: crates/chart-core/src/scale.rs
// Summary: Time (X) and logarithmic value (Y) scales derived from a dataset.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{ChartError, Result};
use crate::grid::{decades, linspace, log_ladder};
use crate::series::Dataset;
use crate::types::{Extent, Insets};

/// Spans smaller than this are treated as a single point.
const DEGENERATE_SPAN: f64 = 1e-12;

/// Common surface shared by the horizontal and vertical scales, so axis
/// collaborators can be written once.
pub trait ContinuousScale {
    type Domain;
    fn map(&self, value: Self::Domain) -> f64;
    fn invert(&self, px: f64) -> Self::Domain;
    fn domain(&self) -> (Self::Domain, Self::Domain);
    fn range(&self) -> (f64, f64);
    fn ticks(&self, count: usize) -> Vec<Self::Domain>;
}

/// Horizontal scale, linear in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    range_start: f64,
    range_end: f64,
}

impl TimeScale {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, range_start: f64, range_end: f64) -> Self {
        Self { start, end, range_start, range_end }
    }

    fn span_ms(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64
    }
}

impl ContinuousScale for TimeScale {
    type Domain = DateTime<Utc>;

    /// A single-instant domain maps everything to the range start.
    #[inline]
    fn map(&self, date: DateTime<Utc>) -> f64 {
        let span = self.span_ms();
        if span.abs() < DEGENERATE_SPAN {
            return self.range_start;
        }
        let t = (date - self.start).num_milliseconds() as f64 / span;
        self.range_start + t * (self.range_end - self.range_start)
    }

    fn invert(&self, px: f64) -> DateTime<Utc> {
        let r = self.range_end - self.range_start;
        if r.abs() < DEGENERATE_SPAN {
            return self.start;
        }
        let t = (px - self.range_start) / r;
        let ms = self.start.timestamp_millis() as f64 + t * self.span_ms();
        DateTime::<Utc>::from_timestamp_millis(ms.round() as i64).unwrap_or(self.start)
    }

    fn domain(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.start, self.end)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Evenly spaced instants across the domain, endpoints included.
    fn ticks(&self, count: usize) -> Vec<DateTime<Utc>> {
        let t0 = self.start.timestamp_millis() as f64;
        let t1 = self.end.timestamp_millis() as f64;
        linspace(t0, t1, count)
            .into_iter()
            .filter_map(|ms| DateTime::<Utc>::from_timestamp_millis(ms.round() as i64))
            .collect()
    }
}

/// Vertical base-10 logarithmic scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogScale {
    vmin: f64,
    vmax: f64,
    range_start: f64,
    range_end: f64,
    // cached log endpoints
    log_min: f64,
    log_max: f64,
}

impl LogScale {
    /// Build a log scale. Non-positive bounds are clamped to 1 and an upper bound below
    /// the lower one collapses onto it; no error is raised.
    pub fn new(mut vmin: f64, mut vmax: f64, range_start: f64, range_end: f64) -> Self {
        if !(vmin > 0.0) || !vmin.is_finite() {
            vmin = 1.0;
        }
        if !(vmax >= vmin) || !vmax.is_finite() {
            vmax = vmin;
        }
        Self {
            vmin,
            vmax,
            range_start,
            range_end,
            log_min: vmin.log10(),
            log_max: vmax.log10(),
        }
    }
}

impl ContinuousScale for LogScale {
    type Domain = f64;

    /// A zero-span domain maps everything to the range start (the floor).
    #[inline]
    fn map(&self, value: f64) -> f64 {
        let span = self.log_max - self.log_min;
        if span.abs() < DEGENERATE_SPAN {
            return self.range_start;
        }
        let lv = value.max(f64::MIN_POSITIVE).log10();
        self.range_start + ((lv - self.log_min) / span) * (self.range_end - self.range_start)
    }

    fn invert(&self, px: f64) -> f64 {
        let r = self.range_end - self.range_start;
        if r.abs() < DEGENERATE_SPAN {
            return self.vmin;
        }
        let t = (px - self.range_start) / r;
        10f64.powf(self.log_min + t * (self.log_max - self.log_min))
    }

    fn domain(&self) -> (f64, f64) {
        (self.vmin, self.vmax)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// `k * 10^e` ticks inside the domain. Falls back to powers of ten when the full
    /// 1..9 ladder would exceed `count`, then thins those by a fixed stride.
    fn ticks(&self, count: usize) -> Vec<f64> {
        let count = count.max(1);
        let ladder = log_ladder(self.vmin, self.vmax);
        if ladder.len() <= count {
            return ladder;
        }
        let powers = decades(self.vmin, self.vmax);
        let stride = powers.len().div_ceil(count).max(1);
        powers.into_iter().step_by(stride).collect()
    }
}

/// The pair of scales every other component projects through, plus the inner plot size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scales {
    pub x: TimeScale,
    pub y: LogScale,
    pub inner_width: f64,
    pub inner_height: f64,
}

/// Derive both scales from every sample in `dataset`.
///
/// The vertical domain is `[1, max(value)]` while projection offsets values by +1, so zero
/// totals land on the floor instead of at `log(0)`. The largest sample therefore sits a
/// little above the top edge; the hover resolver widens its hit area to cover it.
pub fn build_scales(dataset: &Dataset, extent: Extent, margin: &Insets) -> Result<Scales> {
    let (inner_width, inner_height) = extent.inner(margin);
    if !(inner_width > 0.0) || !(inner_height > 0.0) {
        return Err(ChartError::InvalidExtent { width: inner_width, height: inner_height });
    }

    let mut dates = dataset.iter_samples().map(|(_, s)| s.date);
    let first = dates.next().ok_or(ChartError::EmptyDataset)?;
    let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));

    let vmax = dataset
        .iter_samples()
        .map(|(_, s)| s.value)
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);

    let x = TimeScale::new(start, end, 0.0, inner_width);
    let y = LogScale::new(1.0, vmax, inner_height, 0.0);
    debug!(
        samples = dataset.sample_count(),
        series = dataset.series().len(),
        %start,
        %end,
        vmax,
        inner_width,
        inner_height,
        "built chart scales"
    );
    Ok(Scales { x, y, inner_width, inner_height })
}
