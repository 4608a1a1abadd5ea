//! Grouping dimensions over `AdvertisingRecord` and the keys they produce.

use crate::error::AdCostError;
use crate::types::AdvertisingRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Channel,
    ProgramType,
    TimeSlot,
    AdvertiserType,
    DurationSec,
    Month,
    Weekday,
}

impl Dimension {
    /// Categorical dimensions offered for pivot rows and columns.
    pub const PIVOTABLE: [Dimension; 4] = [
        Dimension::Channel,
        Dimension::TimeSlot,
        Dimension::ProgramType,
        Dimension::AdvertiserType,
    ];

    /// Column name in the dataset file.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::Channel => "channel",
            Dimension::ProgramType => "program_type",
            Dimension::TimeSlot => "time_slot",
            Dimension::AdvertiserType => "advertiser_type",
            Dimension::DurationSec => "duration_sec",
            Dimension::Month => "month",
            Dimension::Weekday => "weekday",
        }
    }

    pub fn key(self, record: &AdvertisingRecord) -> GroupKey {
        match self {
            Dimension::Channel => GroupKey::Text(record.channel.clone()),
            Dimension::ProgramType => GroupKey::Text(record.program_type.clone()),
            Dimension::TimeSlot => GroupKey::Text(record.time_slot.clone()),
            Dimension::AdvertiserType => GroupKey::Text(record.advertiser_type.clone()),
            Dimension::DurationSec => GroupKey::Number(record.duration_sec as i64),
            Dimension::Month => GroupKey::Number(record.month as i64),
            Dimension::Weekday => GroupKey::Text(record.weekday.name().to_string()),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Dimension {
    type Err = AdCostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "channel" => Ok(Dimension::Channel),
            "program_type" => Ok(Dimension::ProgramType),
            "time_slot" => Ok(Dimension::TimeSlot),
            "advertiser_type" => Ok(Dimension::AdvertiserType),
            "duration_sec" | "duration" => Ok(Dimension::DurationSec),
            "month" => Ok(Dimension::Month),
            "weekday" => Ok(Dimension::Weekday),
            other => Err(AdCostError::InvalidInput(format!(
                "unknown dimension '{other}'"
            ))),
        }
    }
}

/// Value of a record along one dimension. Numbers order numerically and
/// sort before text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupKey {
    Number(i64),
    Text(String),
}

impl GroupKey {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            GroupKey::Text(s) => Some(s),
            GroupKey::Number(_) => None,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Number(n) => write!(f, "{n}"),
            GroupKey::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for GroupKey {
    fn from(s: &str) -> Self {
        GroupKey::Text(s.to_string())
    }
}

impl From<i64> for GroupKey {
    fn from(n: i64) -> Self {
        GroupKey::Number(n)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimension() {
        assert_eq!("channel".parse::<Dimension>().unwrap(), Dimension::Channel);
        assert_eq!("time-slot".parse::<Dimension>().unwrap(), Dimension::TimeSlot);
        assert_eq!("Duration".parse::<Dimension>().unwrap(), Dimension::DurationSec);
        assert!("rating".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_column_round_trip() {
        for dim in [
            Dimension::Channel,
            Dimension::ProgramType,
            Dimension::TimeSlot,
            Dimension::AdvertiserType,
            Dimension::DurationSec,
            Dimension::Month,
            Dimension::Weekday,
        ] {
            assert_eq!(dim.column().parse::<Dimension>().unwrap(), dim);
        }
    }

    #[test]
    fn test_numeric_keys_sort_numerically() {
        let mut keys = vec![GroupKey::Number(45), GroupKey::Number(10), GroupKey::Number(15)];
        keys.sort();
        assert_eq!(keys, vec![GroupKey::Number(10), GroupKey::Number(15), GroupKey::Number(45)]);
    }

    #[test]
    fn test_group_key_serializes_untagged() {
        assert_eq!(serde_json::to_string(&GroupKey::Number(30)).unwrap(), "30");
        assert_eq!(serde_json::to_string(&GroupKey::from("ТНТ")).unwrap(), "\"ТНТ\"");
    }
}
