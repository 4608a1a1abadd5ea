//! Cost model: time slot sets the base price, channel scales it, duration
//! and rating push it up, a jitter factor blurs it and holiday months add
//! a seasonal premium.

use adcost_core::catalog::{seasonal_multiplier, Catalog};
use adcost_core::{AdCostError, AdCostResult};
use serde::{Deserialize, Serialize};

/// Reference spot length the base prices are quoted for.
const REFERENCE_DURATION_SEC: f64 = 30.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceInputs {
    pub channel: String,
    pub time_slot: String,
    pub duration_sec: u32,
    pub rating: f64,
    pub month: u32,
    /// Random factor in [0.9, 1.1].
    pub jitter: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct PricingModel {
    catalog: Catalog,
}

impl PricingModel {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Cost in whole rubles. Truncates once before and once after the
    /// seasonal multiplier so regenerated data matches existing files.
    pub fn cost_rub(&self, inputs: &PriceInputs) -> AdCostResult<u64> {
        let base = self.catalog.base_cost(&inputs.time_slot).ok_or_else(|| {
            AdCostError::InvalidInput(format!("unknown time slot '{}'", inputs.time_slot))
        })?;
        let multiplier = self
            .catalog
            .channel_multiplier(&inputs.channel)
            .ok_or_else(|| {
                AdCostError::InvalidInput(format!("unknown channel '{}'", inputs.channel))
            })?;

        let raw = base
            * multiplier
            * (inputs.duration_sec as f64 / REFERENCE_DURATION_SEC)
            * (1.0 + inputs.rating / 10.0)
            * inputs.jitter;
        let raw = raw.max(0.0).trunc();

        Ok((raw * seasonal_multiplier(inputs.month)).trunc() as u64)
    }
}

impl Default for PricingModel {
    fn default() -> Self {
        Self::new(Catalog::standard())
    }
}

/// Reached audience in thousands: rating times a sampled viewer factor,
/// scaled down by ten and floored.
pub fn audience_reach_thousands(rating: f64, viewer_factor: u64) -> u64 {
    (rating * viewer_factor as f64 / 10.0).max(0.0).floor() as u64
}

// ─── Tests ──────────────────────────────────────────────────────────────────
