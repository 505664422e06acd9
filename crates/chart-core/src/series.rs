// File: crates/chart-core/src/series.rs
// Summary: Sample/Series/Dataset model for per-entity cumulative time series.
// Notes:
// - Series are expected to arrive sorted by date; the model does not re-sort them.
// - A Dataset carries a label index and an identity used to detect replacement.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;

/// One observation of one entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub date: DateTime<Utc>,
    /// Cumulative total; expected to be non-negative.
    pub value: f64,
    pub label: String,
}

impl Sample {
    pub fn new(date: DateTime<Utc>, value: f64, label: impl Into<String>) -> Self {
        Self { date, value, label: label.into() }
    }
}

/// Ordered samples for a single entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub label: String,
    pub samples: Vec<Sample>,
}

impl Series {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), samples: Vec::new() }
    }

    /// Build a series from `(date, value)` pairs, stamping each sample with the series label.
    pub fn from_points(label: impl Into<String>, points: impl IntoIterator<Item = (DateTime<Utc>, f64)>) -> Self {
        let label = label.into();
        let samples = points
            .into_iter()
            .map(|(date, value)| Sample::new(date, value, label.clone()))
            .collect();
        Self { label, samples }
    }

    pub fn push(&mut self, date: DateTime<Utc>, value: f64) {
        let label = self.label.clone();
        self.samples.push(Sample::new(date, value, label));
    }

    pub fn len(&self) -> usize { self.samples.len() }
    pub fn is_empty(&self) -> bool { self.samples.is_empty() }
}

/// Positional handle to a sample inside one [`Dataset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SampleId {
    pub series: usize,
    pub index: usize,
}

impl SampleId {
    pub const fn new(series: usize, index: usize) -> Self {
        Self { series, index }
    }
}

/// Process-unique identity of a dataset instance. Clones share it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DatasetId(u64);

static NEXT_DATASET_ID: AtomicU64 = AtomicU64::new(1);

impl DatasetId {
    fn next() -> Self {
        Self(NEXT_DATASET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// All series drawn on one chart, plus a label → series index.
#[derive(Clone, Debug)]
pub struct Dataset {
    id: DatasetId,
    series: Vec<Series>,
    by_label: FxHashMap<String, usize>,
}

impl Dataset {
    /// Build a dataset. If two series share a label the first one owns the label index entry.
    pub fn new(series: Vec<Series>) -> Self {
        let mut by_label = FxHashMap::default();
        for (i, s) in series.iter().enumerate() {
            by_label.entry(s.label.clone()).or_insert(i);
        }
        Self { id: DatasetId::next(), series, by_label }
    }

    pub fn id(&self) -> DatasetId { self.id }

    pub fn series(&self) -> &[Series] { &self.series }

    pub fn series_by_label(&self, label: &str) -> Option<&Series> {
        self.by_label.get(label).map(|&i| &self.series[i])
    }

    pub fn series_index(&self, label: &str) -> Option<usize> {
        self.by_label.get(label).copied()
    }

    pub fn sample(&self, id: SampleId) -> Option<&Sample> {
        self.series.get(id.series)?.samples.get(id.index)
    }

    /// Total number of samples across all series.
    pub fn sample_count(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }

    /// Every sample in flat order: series order, then sample order.
    pub fn iter_samples(&self) -> impl Iterator<Item = (SampleId, &Sample)> + '_ {
        self.series.iter().enumerate().flat_map(|(si, s)| {
            s.samples.iter().enumerate().map(move |(i, sample)| (SampleId::new(si, i), sample))
        })
    }
}

impl From<Vec<Series>> for Dataset {
    fn from(series: Vec<Series>) -> Self {
        Self::new(series)
    }
}
