//! Record sampler. Every random draw goes through the caller's `Rng`, so a
//! seeded generator reproduces a dataset exactly.

use crate::pricing::{audience_reach_thousands, PriceInputs, PricingModel};
use adcost_core::config::GeneratorConfig;
use adcost_core::types::{cost_per_thousand, round2};
use adcost_core::{AdCostError, AdCostResult, AdvertisingRecord, Catalog};
use chrono::{Days, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

const RATING_MIN: f64 = 1.0;
const RATING_MAX: f64 = 15.0;
const VIEWER_FACTOR_MIN: u64 = 50_000;
const VIEWER_FACTOR_MAX: u64 = 200_000;
const JITTER_MIN: f64 = 0.9;
const JITTER_MAX: f64 = 1.1;

pub struct DataGenerator {
    catalog: Catalog,
    pricing: PricingModel,
    start_date: NaiveDate,
    end_date: NaiveDate,
    window_days: u32,
}

impl DataGenerator {
    /// Fails when `start_date + window_days` falls outside the calendar range.
    pub fn new(catalog: Catalog, start_date: NaiveDate, window_days: u32) -> AdCostResult<Self> {
        let end_date = start_date
            .checked_add_days(Days::new(window_days as u64))
            .ok_or_else(|| {
                AdCostError::Config(format!(
                    "window of {window_days} days from {start_date} overflows the calendar"
                ))
            })?;

        Ok(Self {
            catalog,
            pricing: PricingModel::new(catalog),
            start_date,
            end_date,
            window_days,
        })
    }

    pub fn from_config(config: &GeneratorConfig) -> AdCostResult<Self> {
        Self::new(Catalog::standard(), config.start_date, config.window_days)
    }

    /// Last date the sampler can produce.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
    ) -> AdCostResult<Vec<AdvertisingRecord>> {
        let records = (0..count)
            .map(|_| self.generate_record(rng))
            .collect::<AdCostResult<Vec<_>>>()?;

        info!(
            records = records.len(),
            start = %self.start_date,
            end = %self.end_date(),
            "Generated advertising dataset"
        );
        Ok(records)
    }

    pub fn generate_record<R: Rng + ?Sized>(&self, rng: &mut R) -> AdCostResult<AdvertisingRecord> {
        let offset = rng.gen_range(0..=self.window_days);
        // offset <= window_days, and start + window_days was checked in `new`
        let date = self
            .start_date
            .checked_add_days(Days::new(offset as u64))
            .unwrap_or(self.end_date);

        let channel = pick(rng, self.catalog.channels, "channels")?.name;
        let program_type = *pick(rng, self.catalog.program_types, "program types")?;
        let time_slot = pick(rng, self.catalog.time_slots, "time slots")?.name;
        let advertiser_type = *pick(rng, self.catalog.advertiser_types, "advertiser types")?;
        let duration_sec = *pick(rng, self.catalog.durations_sec, "durations")?;

        let rating = round2(rng.gen_range(RATING_MIN..=RATING_MAX));
        let viewer_factor = rng.gen_range(VIEWER_FACTOR_MIN..=VIEWER_FACTOR_MAX);
        let audience_reach_thousands = audience_reach_thousands(rating, viewer_factor);
        let jitter = rng.gen_range(JITTER_MIN..=JITTER_MAX);

        let (weekday, is_weekend, month) = AdvertisingRecord::calendar_fields(date);

        let cost_rub = self.pricing.cost_rub(&PriceInputs {
            channel: channel.to_string(),
            time_slot: time_slot.to_string(),
            duration_sec,
            rating,
            month,
            jitter,
        })?;
        let cpt_rub = cost_per_thousand(cost_rub, audience_reach_thousands);

        debug!(%date, channel, time_slot, cost_rub, "Sampled record");

        Ok(AdvertisingRecord {
            date,
            channel: channel.to_string(),
            program_type: program_type.to_string(),
            time_slot: time_slot.to_string(),
            duration_sec,
            rating,
            audience_reach_thousands,
            advertiser_type: advertiser_type.to_string(),
            cost_rub,
            cpt_rub,
            weekday,
            is_weekend,
            month,
        })
    }
}

fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, values: &'a [T], table: &str) -> AdCostResult<&'a T> {
    values
        .choose(rng)
        .ok_or_else(|| AdCostError::Config(format!("reference table '{table}' is empty")))
}

// ─── Tests ──────────────────────────────────────────────────────────────────
