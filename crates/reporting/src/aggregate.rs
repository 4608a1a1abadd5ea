//! Aggregations over a filtered view: grouped means, two-dimensional
//! pivots, per-channel statistics and headline means.
//!
//! Grouped results over an empty view are empty. Scalar means over an empty
//! view are `None`.

use adcost_core::types::round2;
use adcost_core::{AdvertisingRecord, Dimension, GroupKey};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Numeric column an aggregation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CostRub,
    Rating,
    CptRub,
}

impl Metric {
    pub fn value(self, record: &AdvertisingRecord) -> f64 {
        match self {
            Metric::CostRub => record.cost_rub as f64,
            Metric::Rating => record.rating,
            Metric::CptRub => record.cpt_rub,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Metric::CostRub => "cost_rub",
            Metric::Rating => "rating",
            Metric::CptRub => "cpt_rub",
        }
    }
}

pub fn mean(records: &[AdvertisingRecord], metric: Metric) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let sum: f64 = records.iter().map(|r| metric.value(r)).sum();
    Some(sum / records.len() as f64)
}

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

// ─── Grouped means ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMean {
    pub key: GroupKey,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedMeans {
    pub dimension: Dimension,
    pub metric: Metric,
    pub entries: Vec<GroupMean>,
}

impl GroupedMeans {
    /// Mean of `metric` per distinct value of `dimension`, ordered by key.
    pub fn compute(records: &[AdvertisingRecord], dimension: Dimension, metric: Metric) -> Self {
        let mut groups: BTreeMap<GroupKey, Accumulator> = BTreeMap::new();
        for record in records {
            groups
                .entry(dimension.key(record))
                .or_default()
                .push(metric.value(record));
        }

        let entries = groups
            .into_iter()
            .map(|(key, acc)| GroupMean {
                key,
                mean: acc.mean(),
                count: acc.count,
            })
            .collect();

        Self {
            dimension,
            metric,
            entries,
        }
    }

    pub fn mean_cost_by(records: &[AdvertisingRecord], dimension: Dimension) -> Self {
        Self::compute(records, dimension, Metric::CostRub)
    }

    pub fn sorted_by_value(mut self, ascending: bool) -> Self {
        self.entries.sort_by(|a, b| {
            let ord = a.mean.total_cmp(&b.mean);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
        self
    }

    pub fn get(&self, key: &GroupKey) -> Option<f64> {
        self.entries.iter().find(|e| &e.key == key).map(|e| e.mean)
    }

    pub fn as_map(&self) -> BTreeMap<String, f64> {
        self.entries
            .iter()
            .map(|e| (e.key.to_string(), e.mean))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Mean CPT per advertiser type, cheapest first.
pub fn advertiser_cpt(records: &[AdvertisingRecord]) -> GroupedMeans {
    GroupedMeans::compute(records, Dimension::AdvertiserType, Metric::CptRub).sorted_by_value(true)
}

// ─── Pivot ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotCell {
    pub row: GroupKey,
    pub column: GroupKey,
    pub mean: f64,
}

/// Mean of a metric keyed jointly by two dimensions. Only combinations that
/// occur in the data have a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotTable {
    pub row_dimension: Dimension,
    pub column_dimension: Dimension,
    pub metric: Metric,
    pub row_keys: Vec<GroupKey>,
    pub column_keys: Vec<GroupKey>,
    pub cells: Vec<PivotCell>,
}

impl PivotTable {
    pub fn compute(
        records: &[AdvertisingRecord],
        row_dimension: Dimension,
        column_dimension: Dimension,
        metric: Metric,
    ) -> Self {
        let mut groups: BTreeMap<(GroupKey, GroupKey), Accumulator> = BTreeMap::new();
        for record in records {
            groups
                .entry((row_dimension.key(record), column_dimension.key(record)))
                .or_default()
                .push(metric.value(record));
        }

        let row_keys: BTreeSet<GroupKey> = groups.keys().map(|(r, _)| r.clone()).collect();
        let column_keys: BTreeSet<GroupKey> = groups.keys().map(|(_, c)| c.clone()).collect();
        let cells = groups
            .into_iter()
            .map(|((row, column), acc)| PivotCell {
                row,
                column,
                mean: acc.mean(),
            })
            .collect();

        Self {
            row_dimension,
            column_dimension,
            metric,
            row_keys: row_keys.into_iter().collect(),
            column_keys: column_keys.into_iter().collect(),
            cells,
        }
    }

    pub fn mean_cost(
        records: &[AdvertisingRecord],
        row_dimension: Dimension,
        column_dimension: Dimension,
    ) -> Self {
        Self::compute(records, row_dimension, column_dimension, Metric::CostRub)
    }

    pub fn get(&self, row: &GroupKey, column: &GroupKey) -> Option<f64> {
        self.cells
            .iter()
            .find(|c| &c.row == row && &c.column == column)
            .map(|c| c.mean)
    }

    /// Dense matrix in `row_keys` × `column_keys` order; absent pairs are `None`.
    pub fn matrix(&self) -> Vec<Vec<Option<f64>>> {
        self.row_keys
            .iter()
            .map(|row| {
                self.column_keys
                    .iter()
                    .map(|column| self.get(row, column))
                    .collect()
            })
            .collect()
    }

    pub fn defined_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// ─── Channel statistics ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub channel: String,
    pub records: usize,
    pub mean_cost_rub: f64,
    pub median_cost_rub: f64,
    pub min_cost_rub: u64,
    pub max_cost_rub: u64,
    pub mean_rating: f64,
    pub mean_cpt_rub: f64,
}

impl ChannelStats {
    /// One row per channel present, ordered by channel name. Means and the
    /// median are rounded to 2 decimals.
    pub fn per_channel(records: &[AdvertisingRecord]) -> Vec<ChannelStats> {
        let mut by_channel: BTreeMap<&str, Vec<&AdvertisingRecord>> = BTreeMap::new();
        for record in records {
            by_channel.entry(record.channel.as_str()).or_default().push(record);
        }

        by_channel
            .into_iter()
            .map(|(channel, rows)| {
                let n = rows.len() as f64;
                let mut costs: Vec<u64> = rows.iter().map(|r| r.cost_rub).collect();
                costs.sort_unstable();

                ChannelStats {
                    channel: channel.to_string(),
                    records: rows.len(),
                    mean_cost_rub: round2(costs.iter().sum::<u64>() as f64 / n),
                    median_cost_rub: round2(median(&costs)),
                    min_cost_rub: costs[0],
                    max_cost_rub: costs[costs.len() - 1],
                    mean_rating: round2(rows.iter().map(|r| r.rating).sum::<f64>() / n),
                    mean_cpt_rub: round2(rows.iter().map(|r| r.cpt_rub).sum::<f64>() / n),
                }
            })
            .collect()
    }
}

/// Median of a non-empty ascending slice.
fn median(sorted: &[u64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
