//! Bounded random sample of a view for the rating-vs-cost point cloud.

use adcost_core::AdvertisingRecord;
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One point of the scatter chart: position, colour and size channels,
/// plus hover fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub rating: f64,
    pub cost_rub: u64,
    pub time_slot: String,
    pub duration_sec: u32,
    pub channel: String,
    pub program_type: String,
}

impl From<&AdvertisingRecord> for ScatterPoint {
    fn from(r: &AdvertisingRecord) -> Self {
        Self {
            rating: r.rating,
            cost_rub: r.cost_rub,
            time_slot: r.time_slot.clone(),
            duration_sec: r.duration_sec,
            channel: r.channel.clone(),
            program_type: r.program_type.clone(),
        }
    }
}

/// At most `limit` records drawn without replacement, kept in source
/// order. Views no larger than `limit` are returned whole.
pub fn scatter_sample<R: Rng + ?Sized>(
    records: &[AdvertisingRecord],
    rng: &mut R,
    limit: usize,
) -> Vec<ScatterPoint> {
    if records.len() <= limit {
        return records.iter().map(ScatterPoint::from).collect();
    }

    let mut picked = index::sample(rng, records.len(), limit).into_vec();
    picked.sort_unstable();
    picked
        .into_iter()
        .map(|i| ScatterPoint::from(&records[i]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::record;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn records(n: u64) -> Vec<AdvertisingRecord> {
        (0..n)
            .map(|i| record((2023, 1, 1), "НТВ", "День (09:00-18:00)", 1_000 + i))
            .collect()
    }

    #[test]
    fn test_small_view_returned_whole() {
        let rows = records(10);
        let mut rng = StdRng::seed_from_u64(1);
        let points = scatter_sample(&rows, &mut rng, 1000);
        assert_eq!(points.len(), 10);
        assert_eq!(points[3].cost_rub, 1_003);
    }

    #[test]
    fn test_large_view_is_capped_without_duplicates() {
        let rows = records(2500);
        let mut rng = StdRng::seed_from_u64(2);
        let points = scatter_sample(&rows, &mut rng, 1000);
        assert_eq!(points.len(), 1000);
        // cost is unique per row, so strictly increasing means distinct rows in source order
        assert!(points.windows(2).all(|w| w[0].cost_rub < w[1].cost_rub));
    }

    #[test]
    fn test_seeded_sample_is_reproducible() {
        let rows = records(3000);
        let a = scatter_sample(&rows, &mut StdRng::seed_from_u64(9), 100);
        let b = scatter_sample(&rows, &mut StdRng::seed_from_u64(9), 100);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_view() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(scatter_sample(&[], &mut rng, 1000).is_empty());
    }
}
