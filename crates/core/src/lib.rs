pub mod catalog;
pub mod config;
pub mod dimension;
pub mod error;
pub mod types;

pub use catalog::Catalog;
pub use config::AppConfig;
pub use dimension::{Dimension, GroupKey};
pub use error::{AdCostError, AdCostResult};
pub use types::{AdvertisingRecord, DayOfWeek};
