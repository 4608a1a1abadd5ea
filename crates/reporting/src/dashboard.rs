//! Dashboard snapshot — every table, pivot and chart series the dashboard
//! shows for one filter selection, bundled for the presentation layer.

use crate::aggregate::{advertiser_cpt, mean, ChannelStats, GroupedMeans, Metric, PivotTable};
use crate::dataset::Dataset;
use crate::filter::FilterSpec;
use crate::sample::{scatter_sample, ScatterPoint};
use adcost_core::config::DashboardConfig;
use adcost_core::{AdvertisingRecord, Dimension, GroupKey};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

static MONTH_LABELS: [&str; 12] = [
    "Янв", "Фев", "Мар", "Апр", "Май", "Июн", "Июл", "Авг", "Сен", "Окт", "Ноя", "Дек",
];

/// Short Russian month name, `1 → Янв`.
pub fn month_label(month: u32) -> Option<&'static str> {
    MONTH_LABELS.get((month as usize).checked_sub(1)?).copied()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardRequest {
    pub filter: FilterSpec,
    pub pivot_rows: Dimension,
    pub pivot_columns: Dimension,
    pub preview_rows: usize,
    pub scatter_sample_limit: usize,
}

impl DashboardRequest {
    pub fn from_config(config: &DashboardConfig, filter: FilterSpec) -> Self {
        Self {
            filter,
            pivot_rows: Dimension::Channel,
            pivot_columns: Dimension::TimeSlot,
            preview_rows: config.preview_rows,
            scatter_sample_limit: config.scatter_sample_limit,
        }
    }

    pub fn with_pivot(mut self, rows: Dimension, columns: Dimension) -> Self {
        self.pivot_rows = rows;
        self.pivot_columns = columns;
        self
    }
}

impl Default for DashboardRequest {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default(), FilterSpec::default())
    }
}

/// Headline numbers. Means are `None` when the view is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineMetrics {
    pub mean_cost_rub: Option<f64>,
    pub mean_rating: Option<f64>,
    pub mean_cpt_rub: Option<f64>,
    pub records: usize,
}

impl HeadlineMetrics {
    pub fn compute(records: &[AdvertisingRecord]) -> Self {
        Self {
            mean_cost_rub: mean(records, Metric::CostRub),
            mean_rating: mean(records, Metric::Rating),
            mean_cpt_rub: mean(records, Metric::CptRub),
            records: records.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthPoint {
    pub month: u32,
    pub label: String,
    pub mean_cost_rub: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub snapshot_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub filter: FilterSpec,
    pub total_records: usize,
    pub filtered_records: usize,
    pub base_preview: Vec<AdvertisingRecord>,
    pub filtered_preview: Vec<AdvertisingRecord>,
    pub headline: HeadlineMetrics,
    pub pivot: PivotTable,
    pub channel_stats: Vec<ChannelStats>,
    pub cost_by_time_slot: GroupedMeans,
    /// Most expensive channel first.
    pub cost_by_channel: GroupedMeans,
    pub scatter: Vec<ScatterPoint>,
    pub cost_by_month: Vec<MonthPoint>,
    pub heatmap: PivotTable,
    pub cost_by_duration: GroupedMeans,
    /// Cheapest advertiser type first.
    pub cpt_by_advertiser: GroupedMeans,
}

impl DashboardSnapshot {
    pub fn build<R: Rng + ?Sized>(base: &Dataset, request: &DashboardRequest, rng: &mut R) -> Self {
        let view = request.filter.apply(base);
        Self::from_view(base, &view, request, rng)
    }

    /// Build from an already filtered `view` of `base`.
    pub fn from_view<R: Rng + ?Sized>(
        base: &Dataset,
        view: &Dataset,
        request: &DashboardRequest,
        rng: &mut R,
    ) -> Self {
        let records = view.records();

        let cost_by_month = GroupedMeans::mean_cost_by(records, Dimension::Month)
            .entries
            .into_iter()
            .filter_map(|e| match e.key {
                GroupKey::Number(m) => {
                    let month = u32::try_from(m).ok()?;
                    Some(MonthPoint {
                        month,
                        label: month_label(month)?.to_string(),
                        mean_cost_rub: e.mean,
                    })
                }
                GroupKey::Text(_) => None,
            })
            .collect();

        let snapshot = Self {
            snapshot_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            filter: request.filter.clone(),
            total_records: base.len(),
            filtered_records: view.len(),
            base_preview: base.head(request.preview_rows).to_vec(),
            filtered_preview: view.head(request.preview_rows).to_vec(),
            headline: HeadlineMetrics::compute(records),
            pivot: PivotTable::mean_cost(records, request.pivot_rows, request.pivot_columns),
            channel_stats: ChannelStats::per_channel(records),
            cost_by_time_slot: GroupedMeans::mean_cost_by(records, Dimension::TimeSlot),
            cost_by_channel: GroupedMeans::mean_cost_by(records, Dimension::Channel)
                .sorted_by_value(false),
            scatter: scatter_sample(records, rng, request.scatter_sample_limit),
            cost_by_month,
            heatmap: PivotTable::mean_cost(records, Dimension::Channel, Dimension::TimeSlot),
            cost_by_duration: GroupedMeans::mean_cost_by(records, Dimension::DurationSec),
            cpt_by_advertiser: advertiser_cpt(records),
        };

        info!(
            snapshot_id = %snapshot.snapshot_id,
            total = snapshot.total_records,
            filtered = snapshot.filtered_records,
            pivot = %format!("{}x{}", request.pivot_rows, request.pivot_columns),
            "Built dashboard snapshot"
        );
        snapshot
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
