//! Advertising cost reporting — dataset I/O, filtering, grouped means,
//! pivots, per-channel statistics, scatter sampling and dashboard snapshots.

pub mod aggregate;
pub mod cache;
pub mod dashboard;
pub mod dataset;
pub mod filter;
pub mod sample;

pub use aggregate::{ChannelStats, GroupedMeans, PivotTable};
pub use cache::DatasetCache;
pub use dashboard::{DashboardRequest, DashboardSnapshot};
pub use dataset::Dataset;
pub use filter::{FilterField, FilterSpec};
pub use sample::ScatterPoint;
