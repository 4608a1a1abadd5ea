use adcost_core::AdvertisingRecord;
use serde::Serialize;

/// Distribution of `cost_rub` across a record set: count, mean, sample
/// standard deviation, extremes and quartiles (linear interpolation).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub median: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

impl CostSummary {
    pub fn from_records(records: &[AdvertisingRecord]) -> Self {
        let mut costs: Vec<f64> = records.iter().map(|r| r.cost_rub as f64).collect();
        costs.sort_by(|a, b| a.total_cmp(b));

        let count = costs.len();
        let mean = (count > 0).then(|| costs.iter().sum::<f64>() / count as f64);
        let std = mean.filter(|_| count > 1).map(|m| {
            let var = costs.iter().map(|c| (c - m).powi(2)).sum::<f64>() / (count - 1) as f64;
            var.sqrt()
        });

        Self {
            count,
            mean,
            std,
            min: costs.first().copied(),
            p25: quantile(&costs, 0.25),
            median: quantile(&costs, 0.5),
            p75: quantile(&costs, 0.75),
            max: costs.last().copied(),
        }
    }
}

/// Quantile of an ascending slice with linear interpolation between ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}
