//! Synthetic TV advertising dataset — pricing model, record sampling,
//! and cost distribution summaries.

pub mod generator;
pub mod pricing;
pub mod summary;

pub use generator::DataGenerator;
pub use pricing::{PriceInputs, PricingModel};
pub use summary::CostSummary;
