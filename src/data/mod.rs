//! Dataset loading.
//!
//! Reads the census CSV into [`CensusRecord`]s. Any failure here is terminal
//! for the session: callers surface the error and do not build a chart.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::core::{CensusRecord, MarginOfError, Metric};
use crate::error::{ChartError, ChartResult, LoadError};

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: [&str; 18] = [
    "id",
    "state",
    "abbr",
    "poverty",
    "povertyMoe",
    "age",
    "ageMoe",
    "income",
    "incomeMoe",
    "healthcare",
    "healthcareLow",
    "healthcareHigh",
    "obesity",
    "obesityLow",
    "obesityHigh",
    "smokes",
    "smokesLow",
    "smokesHigh",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CensusRow {
    id: u32,
    state: String,
    abbr: String,
    poverty: f64,
    poverty_moe: f64,
    age: f64,
    age_moe: f64,
    income: f64,
    income_moe: f64,
    healthcare: f64,
    healthcare_low: f64,
    healthcare_high: f64,
    obesity: f64,
    obesity_low: f64,
    obesity_high: f64,
    smokes: f64,
    smokes_low: f64,
    smokes_high: f64,
}

impl CensusRow {
    fn into_record(self) -> CensusRecord {
        CensusRecord::new(self.id, self.state, self.abbr)
            .with_metric(Metric::Poverty, self.poverty)
            .with_metric(Metric::Age, self.age)
            .with_metric(Metric::Income, self.income)
            .with_metric(Metric::Healthcare, self.healthcare)
            .with_metric(Metric::Smokes, self.smokes)
            .with_metric(Metric::Obesity, self.obesity)
            .with_margin(Metric::Poverty, MarginOfError::PlusMinus(self.poverty_moe))
            .with_margin(Metric::Age, MarginOfError::PlusMinus(self.age_moe))
            .with_margin(Metric::Income, MarginOfError::PlusMinus(self.income_moe))
            .with_margin(
                Metric::Healthcare,
                MarginOfError::Interval {
                    low: self.healthcare_low,
                    high: self.healthcare_high,
                },
            )
            .with_margin(
                Metric::Obesity,
                MarginOfError::Interval {
                    low: self.obesity_low,
                    high: self.obesity_high,
                },
            )
            .with_margin(
                Metric::Smokes,
                MarginOfError::Interval {
                    low: self.smokes_low,
                    high: self.smokes_high,
                },
            )
    }
}

/// Loads the dataset from a CSV file on disk.
pub fn load_records_from_path(path: impl AsRef<Path>) -> ChartResult<Vec<CensusRecord>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(LoadError::from)?;
    let records = load_records_from_reader(file)?;
    info!(path = %path.display(), rows = records.len(), "census dataset loaded");
    Ok(records)
}

/// Loads the dataset from any CSV byte stream.
///
/// Unknown extra columns are ignored. A missing required column, a row with
/// the wrong field count, or a non-numeric metric cell fails the whole load.
pub fn load_records_from_reader(source: impl Read) -> ChartResult<Vec<CensusRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers().map_err(LoadError::from)?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|header| header == **column))
    {
        return Err(ChartError::LoadFailure(LoadError::MissingColumn(*missing)));
    }

    let mut records = Vec::new();
    for row in reader.deserialize::<CensusRow>() {
        let row = row.map_err(LoadError::from)?;
        records.push(row.into_record());
    }
    debug!(rows = records.len(), "parsed census rows");
    Ok(records)
}

/// Parses an in-memory CSV document.
pub fn load_records_from_str(document: &str) -> ChartResult<Vec<CensusRecord>> {
    load_records_from_reader(document.as_bytes())
}
