//! Filter specification over the base dataset. `None` for a field means
//! "no restriction"; an empty set selects nothing.

use crate::dataset::Dataset;
use adcost_core::{AdCostError, AdvertisingRecord, Dimension};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Categorical fields a filter can restrict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Channel,
    TimeSlot,
    ProgramType,
    AdvertiserType,
}

impl FilterField {
    pub const ALL: [FilterField; 4] = [
        FilterField::Channel,
        FilterField::TimeSlot,
        FilterField::ProgramType,
        FilterField::AdvertiserType,
    ];

    pub fn dimension(self) -> Dimension {
        match self {
            FilterField::Channel => Dimension::Channel,
            FilterField::TimeSlot => Dimension::TimeSlot,
            FilterField::ProgramType => Dimension::ProgramType,
            FilterField::AdvertiserType => Dimension::AdvertiserType,
        }
    }
}

impl TryFrom<Dimension> for FilterField {
    type Error = AdCostError;

    fn try_from(dimension: Dimension) -> Result<Self, Self::Error> {
        match dimension {
            Dimension::Channel => Ok(FilterField::Channel),
            Dimension::TimeSlot => Ok(FilterField::TimeSlot),
            Dimension::ProgramType => Ok(FilterField::ProgramType),
            Dimension::AdvertiserType => Ok(FilterField::AdvertiserType),
            other => Err(AdCostError::InvalidInput(format!(
                "'{other}' cannot be used as a filter"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Inclusive date bounds.
    #[serde(default)]
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    #[serde(default)]
    pub channels: Option<BTreeSet<String>>,
    #[serde(default)]
    pub time_slots: Option<BTreeSet<String>>,
    #[serde(default)]
    pub program_types: Option<BTreeSet<String>>,
    #[serde(default)]
    pub advertiser_types: Option<BTreeSet<String>>,
}

impl FilterSpec {
    /// The explicit defaults for `dataset`: its full date span and every
    /// distinct value of each categorical field.
    pub fn full_for(dataset: &Dataset) -> Self {
        Self {
            date_range: dataset.date_span(),
            channels: Some(dataset.distinct_values(Dimension::Channel)),
            time_slots: Some(dataset.distinct_values(Dimension::TimeSlot)),
            program_types: Some(dataset.distinct_values(Dimension::ProgramType)),
            advertiser_types: Some(dataset.distinct_values(Dimension::AdvertiserType)),
        }
    }

    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some((start, end));
        self
    }

    pub fn with_values<I, S>(mut self, field: FilterField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        match field {
            FilterField::Channel => self.channels = Some(set),
            FilterField::TimeSlot => self.time_slots = Some(set),
            FilterField::ProgramType => self.program_types = Some(set),
            FilterField::AdvertiserType => self.advertiser_types = Some(set),
        }
        self
    }

    pub fn selection(&self, field: FilterField) -> Option<&BTreeSet<String>> {
        match field {
            FilterField::Channel => self.channels.as_ref(),
            FilterField::TimeSlot => self.time_slots.as_ref(),
            FilterField::ProgramType => self.program_types.as_ref(),
            FilterField::AdvertiserType => self.advertiser_types.as_ref(),
        }
    }

    /// A range whose end precedes its start selects nothing.
    pub fn is_malformed(&self) -> bool {
        self.date_range.is_some_and(|(start, end)| end < start)
    }

    /// Number of restrictions set, for report summaries.
    pub fn restrictions(&self) -> usize {
        [
            self.date_range.is_some(),
            self.channels.is_some(),
            self.time_slots.is_some(),
            self.program_types.is_some(),
            self.advertiser_types.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }

    pub fn matches(&self, record: &AdvertisingRecord) -> bool {
        let in_range = self
            .date_range
            .is_none_or(|(start, end)| start <= record.date && record.date <= end);

        in_range
            && member(&self.channels, &record.channel)
            && member(&self.time_slots, &record.time_slot)
            && member(&self.program_types, &record.program_type)
            && member(&self.advertiser_types, &record.advertiser_type)
    }

    /// Matching records as a fresh dataset, in source order.
    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        let records: Vec<AdvertisingRecord> = if self.is_malformed() {
            Vec::new()
        } else {
            dataset
                .records()
                .iter()
                .filter(|r| self.matches(r))
                .cloned()
                .collect()
        };

        debug!(
            source = dataset.len(),
            matched = records.len(),
            restrictions = self.restrictions(),
            "Applied filter"
        );
        Dataset::new(records)
    }
}

fn member(selected: &Option<BTreeSet<String>>, value: &str) -> bool {
    selected.as_ref().is_none_or(|set| set.contains(value))
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::record;

    const DAY: &str = "День (09:00-18:00)";
    const PRIME: &str = "Прайм-тайм (18:00-23:00)";

    fn dataset() -> Dataset {
        Dataset::new(vec![
            record((2023, 2, 1), "НТВ", DAY, 100_000),
            record((2023, 2, 10), "ТНТ", PRIME, 300_000),
            record((2023, 3, 5), "СТС", DAY, 80_000),
            record((2023, 4, 20), "НТВ", PRIME, 350_000),
        ])
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_spec_keeps_everything() {
        let data = dataset();
        assert_eq!(FilterSpec::default().apply(&data), data);
    }

    #[test]
    fn test_full_spec_keeps_everything_in_order() {
        let data = dataset();
        let spec = FilterSpec::full_for(&data);
        assert_eq!(spec.restrictions(), 5);
        assert_eq!(spec.apply(&data), data);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let spec = FilterSpec::default().with_date_range(date(2023, 2, 10), date(2023, 3, 5));
        let view = spec.apply(&dataset());
        assert_eq!(view.len(), 2);
        assert_eq!(view.records()[0].channel, "ТНТ");
        assert_eq!(view.records()[1].channel, "СТС");
    }

    #[test]
    fn test_category_membership() {
        let spec = FilterSpec::default()
            .with_values(FilterField::Channel, ["НТВ"])
            .with_values(FilterField::TimeSlot, [PRIME]);
        let view = spec.apply(&dataset());
        assert_eq!(view.len(), 1);
        assert_eq!(view.records()[0].cost_rub, 350_000);
    }

    #[test]
    fn test_empty_selection_yields_nothing() {
        let data = dataset();
        for field in FilterField::ALL {
            let spec = FilterSpec::full_for(&data).with_values(field, Vec::<String>::new());
            assert!(spec.apply(&data).is_empty(), "{}", field.dimension());
        }
    }

    #[test]
    fn test_inverted_range_yields_nothing() {
        let spec = FilterSpec::default().with_date_range(date(2023, 5, 1), date(2023, 1, 1));
        assert!(spec.is_malformed());
        assert!(spec.apply(&dataset()).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let spec = FilterSpec::default()
            .with_date_range(date(2023, 2, 1), date(2023, 3, 31))
            .with_values(FilterField::TimeSlot, [DAY, PRIME]);
        let once = spec.apply(&dataset());
        let twice = spec.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_source_untouched() {
        let data = dataset();
        let before = data.clone();
        let _ = FilterSpec::default()
            .with_values(FilterField::Channel, ["СТС"])
            .apply(&data);
        assert_eq!(data, before);
    }

    #[test]
    fn test_only_categorical_dimensions_are_filter_fields() {
        for dim in Dimension::PIVOTABLE {
            let field = FilterField::try_from(dim).unwrap();
            assert_eq!(field.dimension(), dim);
        }
        for dim in [Dimension::DurationSec, Dimension::Month, Dimension::Weekday] {
            assert!(matches!(
                FilterField::try_from(dim),
                Err(AdCostError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_selection_reads_back() {
        let spec = FilterSpec::default().with_values(FilterField::ProgramType, ["Кино"]);
        assert_eq!(spec.selection(FilterField::ProgramType).map(|s| s.len()), Some(1));
        assert!(spec.selection(FilterField::Channel).is_none());
    }
}
