//! Reference data for the synthetic dataset: the allowed values of every
//! categorical field and the price tables keyed by them.

use crate::dimension::Dimension;

/// A channel with its price multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelTier {
    pub name: &'static str,
    pub multiplier: f64,
}

/// A daypart with its base price in rubles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSlotTier {
    pub name: &'static str,
    pub base_cost_rub: f64,
}

pub const PRIME_TIME: &str = "Прайм-тайм (18:00-23:00)";

pub const CHANNELS: &[ChannelTier] = &[
    ChannelTier { name: "Первый канал", multiplier: 1.5 },
    ChannelTier { name: "Россия 1", multiplier: 1.4 },
    ChannelTier { name: "НТВ", multiplier: 1.3 },
    ChannelTier { name: "ТНТ", multiplier: 1.1 },
    ChannelTier { name: "СТС", multiplier: 1.0 },
    ChannelTier { name: "Пятый канал", multiplier: 0.8 },
    ChannelTier { name: "Рен ТВ", multiplier: 0.9 },
    ChannelTier { name: "Матч ТВ", multiplier: 1.2 },
];

pub const TIME_SLOTS: &[TimeSlotTier] = &[
    TimeSlotTier { name: "Утро (06:00-09:00)", base_cost_rub: 50_000.0 },
    TimeSlotTier { name: "День (09:00-18:00)", base_cost_rub: 80_000.0 },
    TimeSlotTier { name: PRIME_TIME, base_cost_rub: 200_000.0 },
    TimeSlotTier { name: "Ночь (23:00-06:00)", base_cost_rub: 30_000.0 },
];

pub const PROGRAM_TYPES: &[&str] = &[
    "Новости",
    "Сериал",
    "Развлекательное шоу",
    "Спортивная передача",
    "Документальный фильм",
    "Ток-шоу",
    "Кино",
    "Утреннее шоу",
];

pub const ADVERTISER_TYPES: &[&str] = &[
    "FMCG",
    "Автомобили",
    "Финансы",
    "Телекоммуникации",
    "Ритейл",
    "Фармацевтика",
    "Технологии",
];

pub const DURATIONS_SEC: &[u32] = &[10, 15, 20, 30, 45, 60];

/// Months billed at the holiday rate.
pub const HIGH_SEASON_MONTHS: &[u32] = &[11, 12, 1];

pub const HIGH_SEASON_MULTIPLIER: f64 = 1.2;

/// Read-only view over the reference tables.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub channels: &'static [ChannelTier],
    pub time_slots: &'static [TimeSlotTier],
    pub program_types: &'static [&'static str],
    pub advertiser_types: &'static [&'static str],
    pub durations_sec: &'static [u32],
}

impl Catalog {
    pub const fn standard() -> Self {
        Self {
            channels: CHANNELS,
            time_slots: TIME_SLOTS,
            program_types: PROGRAM_TYPES,
            advertiser_types: ADVERTISER_TYPES,
            durations_sec: DURATIONS_SEC,
        }
    }

    pub fn channel_multiplier(&self, channel: &str) -> Option<f64> {
        self.channels
            .iter()
            .find(|c| c.name == channel)
            .map(|c| c.multiplier)
    }

    pub fn base_cost(&self, time_slot: &str) -> Option<f64> {
        self.time_slots
            .iter()
            .find(|s| s.name == time_slot)
            .map(|s| s.base_cost_rub)
    }

    /// Allowed values of a text dimension. Numeric and calendar dimensions
    /// have no catalog entry.
    pub fn allowed_values(&self, dimension: Dimension) -> Option<Vec<&'static str>> {
        match dimension {
            Dimension::Channel => Some(self.channels.iter().map(|c| c.name).collect()),
            Dimension::TimeSlot => Some(self.time_slots.iter().map(|s| s.name).collect()),
            Dimension::ProgramType => Some(self.program_types.to_vec()),
            Dimension::AdvertiserType => Some(self.advertiser_types.to_vec()),
            Dimension::DurationSec | Dimension::Month | Dimension::Weekday => None,
        }
    }

    pub fn is_allowed(&self, dimension: Dimension, value: &str) -> bool {
        self.allowed_values(dimension)
            .is_some_and(|values| values.contains(&value))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

pub fn seasonal_multiplier(month: u32) -> f64 {
    if HIGH_SEASON_MONTHS.contains(&month) {
        HIGH_SEASON_MULTIPLIER
    } else {
        1.0
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.channels.len(), 8);
        assert_eq!(catalog.program_types.len(), 8);
        assert_eq!(catalog.time_slots.len(), 4);
        assert_eq!(catalog.advertiser_types.len(), 7);
        assert_eq!(catalog.durations_sec.len(), 6);
    }

    #[test]
    fn test_prime_time_is_most_expensive() {
        let catalog = Catalog::standard();
        let prime = catalog.base_cost(PRIME_TIME).unwrap();
        assert!(catalog.time_slots.iter().all(|s| s.base_cost_rub <= prime));
        assert_eq!(catalog.base_cost("Ночь (23:00-06:00)"), Some(30_000.0));
        assert_eq!(catalog.base_cost("Вечер"), None);
    }

    #[test]
    fn test_channel_multipliers_in_range() {
        let catalog = Catalog::standard();
        for tier in catalog.channels {
            assert!((0.8..=1.5).contains(&tier.multiplier), "{}", tier.name);
        }
        assert_eq!(catalog.channel_multiplier("Первый канал"), Some(1.5));
    }

    #[test]
    fn test_allowed_values() {
        let catalog = Catalog::standard();
        assert!(catalog.is_allowed(Dimension::AdvertiserType, "FMCG"));
        assert!(!catalog.is_allowed(Dimension::AdvertiserType, "Crypto"));
        assert!(catalog.allowed_values(Dimension::Month).is_none());
    }

    #[test]
    fn test_seasonal_multiplier() {
        assert_eq!(seasonal_multiplier(12), 1.2);
        assert_eq!(seasonal_multiplier(1), 1.2);
        assert_eq!(seasonal_multiplier(6), 1.0);
    }
}
