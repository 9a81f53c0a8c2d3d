//! Summary statistics over simulated run totals.
//!
//! Standard deviations are population (divide by n), matching how batch
//! summaries have always been reported.

use std::path::Path;

use serde::Serialize;

use crate::error::SimError;

/// Mean and population standard deviation. Both 0.0 for an empty sample.
pub fn mean_and_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Same as [`mean_and_std`] for integer run counts.
pub fn mean_and_std_u32(values: &[u32]) -> (f64, f64) {
    let as_f64: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    mean_and_std(&as_f64)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Percentiles {
    pub p5: u32,
    pub p10: u32,
    pub p25: u32,
    pub p50: u32,
    pub p75: u32,
    pub p90: u32,
    pub p95: u32,
    pub p99: u32,
}

/// Count of samples with exactly `runs` runs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistogramBin {
    pub runs: u32,
    pub count: u32,
    pub probability: f64,
}

/// P(runs >= threshold).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CumulativeEntry {
    pub runs: u32,
    pub probability: f64,
}

/// Distribution of per-team run totals.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunDistribution {
    pub samples: u64,
    pub mean: f64,
    pub std_dev: f64,
    pub min: u32,
    pub max: u32,
    pub median: u32,
    pub percentiles: Percentiles,
    /// One bin per run value from 0 to `max`.
    pub histogram: Vec<HistogramBin>,
    pub cumulative: Vec<CumulativeEntry>,
}

impl RunDistribution {
    /// Summarise a sample of run totals. `None` if the sample is empty.
    pub fn from_runs(runs: &[u32]) -> Option<Self> {
        if runs.is_empty() {
            return None;
        }
        let mut sorted = runs.to_vec();
        sorted.sort_unstable();
        let n = sorted.len() as f64;
        let (mean, std_dev) = mean_and_std_u32(&sorted);

        let percentile = |p: f64| -> u32 {
            let idx = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
            sorted[idx.min(sorted.len() - 1)]
        };
        let percentiles = Percentiles {
            p5: percentile(5.0),
            p10: percentile(10.0),
            p25: percentile(25.0),
            p50: percentile(50.0),
            p75: percentile(75.0),
            p90: percentile(90.0),
            p95: percentile(95.0),
            p99: percentile(99.0),
        };

        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        let mut counts = vec![0u32; max as usize + 1];
        for &r in &sorted {
            counts[r as usize] += 1;
        }
        let histogram = counts
            .iter()
            .enumerate()
            .map(|(runs, &count)| HistogramBin {
                runs: runs as u32,
                count,
                probability: count as f64 / n,
            })
            .collect();

        // P(runs >= k), built from the top down.
        let mut cumulative = Vec::with_capacity(counts.len());
        let mut at_least = 0u64;
        for (runs, &count) in counts.iter().enumerate().rev() {
            at_least += count as u64;
            cumulative.push(CumulativeEntry {
                runs: runs as u32,
                probability: at_least as f64 / n,
            });
        }
        cumulative.reverse();

        Some(Self {
            samples: sorted.len() as u64,
            mean,
            std_dev,
            min,
            max,
            median: percentile(50.0),
            percentiles,
            histogram,
            cumulative,
        })
    }
}

/// Write any serializable result as pretty JSON, creating parent directories.
pub fn save_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), SimError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| SimError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })
}
