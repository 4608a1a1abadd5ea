use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One sponsored TV advertising transaction. Field names double as the
/// dataset file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvertisingRecord {
    pub date: NaiveDate,
    pub channel: String,
    pub program_type: String,
    pub time_slot: String,
    pub duration_sec: u32,
    pub rating: f64,
    pub audience_reach_thousands: u64,
    pub advertiser_type: String,
    pub cost_rub: u64,
    pub cpt_rub: f64,
    pub weekday: DayOfWeek,
    pub is_weekend: bool,
    pub month: u32,
}

/// Column order of the dataset file.
pub const RECORD_COLUMNS: [&str; 13] = [
    "date",
    "channel",
    "program_type",
    "time_slot",
    "duration_sec",
    "rating",
    "audience_reach_thousands",
    "advertiser_type",
    "cost_rub",
    "cpt_rub",
    "weekday",
    "is_weekend",
    "month",
];

impl AdvertisingRecord {
    /// Calendar fields derived from `date`: weekday, weekend flag, month.
    pub fn calendar_fields(date: NaiveDate) -> (DayOfWeek, bool, u32) {
        let weekday = DayOfWeek::from(date.weekday());
        (weekday, weekday.is_weekend(), date.month())
    }
}

/// Cost per thousand reached viewers, rounded to kopecks. Zero reach yields 0.
pub fn cost_per_thousand(cost_rub: u64, audience_reach_thousands: u64) -> f64 {
    if audience_reach_thousands == 0 {
        return 0.0;
    }
    round2(cost_rub as f64 / (audience_reach_thousands as f64 / 1000.0))
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Day of week, serialized with its full English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn is_weekend(self) -> bool {
        matches!(self, DayOfWeek::Saturday | DayOfWeek::Sunday)
    }

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => DayOfWeek::Monday,
            chrono::Weekday::Tue => DayOfWeek::Tuesday,
            chrono::Weekday::Wed => DayOfWeek::Wednesday,
            chrono::Weekday::Thu => DayOfWeek::Thursday,
            chrono::Weekday::Fri => DayOfWeek::Friday,
            chrono::Weekday::Sat => DayOfWeek::Saturday,
            chrono::Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_fields_weekend() {
        // 2023-01-01 was a Sunday.
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let (weekday, is_weekend, month) = AdvertisingRecord::calendar_fields(date);
        assert_eq!(weekday, DayOfWeek::Sunday);
        assert!(is_weekend);
        assert_eq!(month, 1);
    }

    #[test]
    fn test_calendar_fields_weekday() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 15).unwrap();
        let (weekday, is_weekend, month) = AdvertisingRecord::calendar_fields(date);
        assert_eq!(weekday, DayOfWeek::Wednesday);
        assert!(!is_weekend);
        assert_eq!(month, 11);
    }

    #[test]
    fn test_cost_per_thousand() {
        assert_eq!(cost_per_thousand(250_000, 5_000), 50_000.0);
        assert_eq!(cost_per_thousand(100_000, 3_000), 33_333.33);
        assert_eq!(cost_per_thousand(100_000, 0), 0.0);
    }

    #[test]
    fn test_round2_ties_away_from_zero() {
        // 0.125 is exact in binary, so this is a true tie.
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(1.234), 1.23);
    }

    #[test]
    fn test_weekday_serializes_full_name() {
        let json = serde_json::to_string(&DayOfWeek::Saturday).unwrap();
        assert_eq!(json, "\"Saturday\"");
    }
}
