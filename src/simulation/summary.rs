// src/simulation/summary.rs

use serde::Serialize;

/// Distribution summary of a profit sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitSummary {
    pub reps: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1); zero for a single replication.
    pub std_dev: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
    /// Share of replications that lost money.
    pub probability_of_loss: f64,
}

impl ProfitSummary {
    /// `None` for an empty sample.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len() as f64;

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = samples.iter().sum::<f64>() / n;
        let std_dev = if samples.len() > 1 {
            let ss: f64 = samples.iter().map(|p| (p - mean).powi(2)).sum();
            (ss / (n - 1.0)).sqrt()
        } else {
            0.0
        };

        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        let losses = samples.iter().filter(|&&p| p < 0.0).count();

        Some(Self {
            reps: samples.len(),
            mean,
            std_dev,
            min: sorted[0],
            median,
            max: sorted[sorted.len() - 1],
            probability_of_loss: losses as f64 / n,
        })
    }
}
