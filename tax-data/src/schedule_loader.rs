use std::fs::File;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{BandSchedule, BandScheduleError, BandSpec};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a band schedule.
#[derive(Debug, Error)]
pub enum BandScheduleLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Cannot read band schedule: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid band schedule: {0}")]
    InvalidSchedule(#[from] BandScheduleError),
}

impl From<csv::Error> for BandScheduleLoaderError {
    fn from(err: csv::Error) -> Self {
        BandScheduleLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a band schedule CSV file.
///
/// - `band`: label shown for the band (e.g. `Next ₦2,200,000`)
/// - `rate`: marginal rate as a percentage (e.g. `15`)
/// - `capacity`: income taxed in this band (empty for the open-ended top band)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BandRecord {
    pub band: String,
    pub rate: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub capacity: Option<Decimal>,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for progressive band schedules stored as CSV.
///
/// Rows must appear in ascending rate order; the resulting schedule is
/// validated by [`BandSchedule::new`].
pub struct BandScheduleLoader;

impl BandScheduleLoader {
    /// Parse band records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BandRecord>, BandScheduleLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BandRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Turn parsed records into a validated schedule, keeping row order.
    pub fn into_schedule(records: Vec<BandRecord>) -> Result<BandSchedule, BandScheduleLoaderError> {
        let bands = records
            .into_iter()
            .map(|r| BandSpec {
                label: r.band,
                rate: r.rate,
                capacity: r.capacity,
            })
            .collect();

        Ok(BandSchedule::new(bands)?)
    }

    /// Read and validate a schedule from a CSV file.
    pub fn load_file(path: &Path) -> Result<BandSchedule, BandScheduleLoaderError> {
        let file = File::open(path)?;
        let records = Self::parse(file)?;
        debug!(path = %path.display(), bands = records.len(), "band schedule parsed");
        Self::into_schedule(records)
    }
}
