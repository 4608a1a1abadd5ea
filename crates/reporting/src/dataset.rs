//! The base record set and its CSV form: one header row with the record
//! column names, one row per record, no index column.

use adcost_core::types::RECORD_COLUMNS;
use adcost_core::{AdCostError, AdCostResult, AdvertisingRecord, Dimension};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    records: Vec<AdvertisingRecord>,
}

impl Dataset {
    pub fn new(records: Vec<AdvertisingRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[AdvertisingRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<AdvertisingRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First `n` rows, for table previews.
    pub fn head(&self, n: usize) -> &[AdvertisingRecord] {
        &self.records[..n.min(self.records.len())]
    }

    /// Earliest and latest date present.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    /// Distinct values of a dimension, rendered as text.
    pub fn distinct_values(&self, dimension: Dimension) -> BTreeSet<String> {
        self.records
            .iter()
            .map(|r| dimension.key(r).to_string())
            .collect()
    }

    pub fn read_from<R: Read>(reader: R, source: &str) -> AdCostResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.deserialize() {
            let record: AdvertisingRecord = result.map_err(|e| AdCostError::csv(source, e))?;
            records.push(record);
        }
        Ok(Self { records })
    }

    pub fn load(path: impl AsRef<Path>) -> AdCostResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            AdCostError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to open '{}': {e}", path.display()),
            ))
        })?;
        let dataset = Self::read_from(file, &path.display().to_string())?;
        info!(path = %path.display(), records = dataset.len(), "Loaded dataset");
        Ok(dataset)
    }

    pub fn write_to<W: Write>(&self, writer: W, target: &str) -> AdCostResult<()> {
        write_records(&self.records, writer, target)
    }

    /// Write the whole dataset to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> AdCostResult<()> {
        save_records(&self.records, path)
    }
}

impl From<Vec<AdvertisingRecord>> for Dataset {
    fn from(records: Vec<AdvertisingRecord>) -> Self {
        Self::new(records)
    }
}

pub fn write_records<W: Write>(
    records: &[AdvertisingRecord],
    writer: W,
    target: &str,
) -> AdCostResult<()> {
    // Header is written by hand so an empty view still carries the schema.
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer
        .write_record(RECORD_COLUMNS)
        .map_err(|e| AdCostError::csv(target, e))?;
    for record in records {
        csv_writer
            .serialize(record)
            .map_err(|e| AdCostError::csv(target, e))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn save_records(records: &[AdvertisingRecord], path: impl AsRef<Path>) -> AdCostResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        AdCostError::Io(std::io::Error::new(
            e.kind(),
            format!("failed to create '{}': {e}", path.display()),
        ))
    })?;
    write_records(records, file, &path.display().to_string())?;
    info!(path = %path.display(), records = records.len(), "Wrote dataset");
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use adcost_core::types::cost_per_thousand;

    pub(crate) fn record(
        date: (i32, u32, u32),
        channel: &str,
        time_slot: &str,
        cost_rub: u64,
    ) -> AdvertisingRecord {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        let (weekday, is_weekend, month) = AdvertisingRecord::calendar_fields(date);
        AdvertisingRecord {
            date,
            channel: channel.into(),
            program_type: "Новости".into(),
            time_slot: time_slot.into(),
            duration_sec: 30,
            rating: 5.5,
            audience_reach_thousands: 40_000,
            advertiser_type: "FMCG".into(),
            cost_rub,
            cpt_rub: cost_per_thousand(cost_rub, 40_000),
            weekday,
            is_weekend,
            month,
        }
    }

    fn sample_dataset() -> Dataset {
        Dataset::new(vec![
            record((2023, 3, 1), "НТВ", "День (09:00-18:00)", 120_000),
            record((2023, 1, 15), "ТНТ", "Ночь (23:00-06:00)", 35_000),
            record((2023, 12, 31), "НТВ", "Прайм-тайм (18:00-23:00)", 410_000),
        ])
    }

    #[test]
    fn test_csv_round_trip() {
        let dataset = sample_dataset();
        let mut buf = Vec::new();
        dataset.write_to(&mut buf, "memory").unwrap();
        let reloaded = Dataset::read_from(buf.as_slice(), "memory").unwrap();
        assert_eq!(reloaded, dataset);
    }

    #[test]
    fn test_header_matches_columns() {
        let mut buf = Vec::new();
        sample_dataset().write_to(&mut buf, "memory").unwrap();
        let text = String::from_utf8(buf).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, RECORD_COLUMNS.join(","));
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("Sunday"));
    }

    #[test]
    fn test_empty_dataset_keeps_header() {
        let mut buf = Vec::new();
        Dataset::default().write_to(&mut buf, "memory").unwrap();
        let reloaded = Dataset::read_from(buf.as_slice(), "memory").unwrap();
        assert!(reloaded.is_empty());
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_malformed_row_is_error() {
        let text = format!("{}\n2023-01-01,НТВ,Кино\n", RECORD_COLUMNS.join(","));
        let err = Dataset::read_from(text.as_bytes(), "broken.csv").unwrap_err();
        assert!(matches!(err, AdCostError::Csv { .. }));
        assert!(err.to_string().contains("broken.csv"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Dataset::load("/nonexistent/dir/tv_advertising_data.csv").unwrap_err();
        assert!(matches!(err, AdCostError::Io(_)));
    }

    #[test]
    fn test_date_span_and_distinct() {
        let dataset = sample_dataset();
        let (min, max) = dataset.date_span().unwrap();
        assert_eq!(min, NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
        assert_eq!(max, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        let channels = dataset.distinct_values(Dimension::Channel);
        assert_eq!(channels.len(), 2);
        assert!(Dataset::default().date_span().is_none());
    }

    #[test]
    fn test_head() {
        let dataset = sample_dataset();
        assert_eq!(dataset.head(2).len(), 2);
        assert_eq!(dataset.head(100).len(), 3);
    }
}
