// File: crates/chart-core/src/error.rs
// Summary: Errors raised while building scales and dependent geometry.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    /// No samples at all, so the time domain is undefined.
    #[error("dataset contains no samples; cannot derive a scale domain")]
    EmptyDataset,
    /// Margins leave no room for the plot area.
    #[error("plot area is empty: inner size {width}x{height} px")]
    InvalidExtent { width: f64, height: f64 },
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
