//! CSV price files: `time,value` rows in chronological order.
//!
//! `time` may be integer milliseconds since the epoch, an RFC 3339 timestamp,
//! or a `YYYY-MM-DD` date (midnight UTC).

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate};
use pricepulse_core::{AnalysisError, PricePoint, PriceSeries};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("'{path}' row {row}: unparseable time '{value}'")]
    Time {
        path: PathBuf,
        row: usize,
        value: String,
    },
    #[error("'{path}' is not a valid price series: {source}")]
    Series {
        path: PathBuf,
        #[source]
        source: AnalysisError,
    },
}

#[derive(Debug, Deserialize)]
struct Row {
    time: String,
    value: f64,
}

#[derive(Debug, Serialize)]
struct OutRow {
    time: i64,
    value: f64,
}

/// Asset name derived from a file path (its stem).
pub fn asset_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse a timestamp cell into epoch milliseconds.
pub fn parse_time(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(ms) = raw.parse::<i64>() {
        return Some(ms);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Load and validate a price series from a CSV file with a header row.
pub fn load_series(path: &Path) -> Result<PriceSeries, LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let mut points = Vec::new();
    for (i, row) in reader.deserialize::<Row>().enumerate() {
        let row = row.map_err(csv_err)?;
        let time = parse_time(&row.time).ok_or_else(|| LoadError::Time {
            path: path.to_path_buf(),
            row: i + 1,
            value: row.time.clone(),
        })?;
        points.push(PricePoint::new(time, row.value));
    }

    PriceSeries::new(points).map_err(|source| LoadError::Series {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a series as `time,value` CSV with epoch-millisecond times.
pub fn write_series(path: &Path, series: &PriceSeries) -> Result<(), LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    for point in series.points() {
        writer
            .serialize(OutRow {
                time: point.time,
                value: point.value,
            })
            .map_err(csv_err)?;
    }
    writer
        .flush()
        .map_err(|e| csv_err(csv::Error::from(e)))?;
    Ok(())
}
