//! Order statistics over deviation samples.
//!
//! Nearest-rank-below indexing: the sample at `floor(n * q)` of the ascending
//! array, clamped to `[0, n - 1]`. No interpolation, so two cohorts compared
//! side by side always resolve to an observed sample.

use serde::Serialize;

/// p50 / p95 / p99 / max of a sample set. All zero for an empty set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Percentiles {
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
    pub max: f64,
}

/// Compute percentiles from unsorted samples.
pub fn percentiles(samples: &[f64]) -> Percentiles {
    if samples.is_empty() {
        return Percentiles::default();
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentiles_sorted(&sorted)
}

/// Same as [`percentiles`] for an already ascending slice.
pub fn percentiles_sorted(sorted: &[f64]) -> Percentiles {
    match sorted.last() {
        None => Percentiles::default(),
        Some(&max) => Percentiles {
            p50: nearest_rank_below(sorted, 0.50),
            p95: nearest_rank_below(sorted, 0.95),
            p99: nearest_rank_below(sorted, 0.99),
            max,
        },
    }
}

#[inline]
fn nearest_rank_below(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    let idx = ((n as f64) * q).floor() as usize;
    sorted[idx.min(n - 1)]
}
