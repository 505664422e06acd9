// File: crates/chart-core/src/grid.rs
// Summary: Tick value layout: even spacing for time, 1-2-..-9 ladders and decades for log axes.

/// `steps` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Relative slack so that `1000.0000000001` still counts as inside `[1, 1000]`.
const EDGE: f64 = 1e-12;

fn within(v: f64, lo: f64, hi: f64) -> bool {
    v >= lo * (1.0 - EDGE) && v <= hi * (1.0 + EDGE)
}

fn exponents(lo: f64, hi: f64) -> std::ops::RangeInclusive<i32> {
    (lo.log10().floor() as i32)..=(hi.log10().ceil() as i32)
}

/// Every `k * 10^e` (k = 1..9) inside `[lo, hi]`, ascending. Both bounds must be positive.
pub fn log_ladder(lo: f64, hi: f64) -> Vec<f64> {
    exponents(lo, hi)
        .flat_map(|e| {
            let base = 10f64.powi(e);
            (1..=9).map(move |k| base * k as f64)
        })
        .filter(|&v| within(v, lo, hi))
        .collect()
}

/// Powers of ten inside `[lo, hi]`, ascending. Both bounds must be positive.
pub fn decades(lo: f64, hi: f64) -> Vec<f64> {
    exponents(lo, hi).map(|e| 10f64.powi(e)).filter(|&v| within(v, lo, hi)).collect()
}
