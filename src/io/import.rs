//! CSV time-series import (load and PV irradiance).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Load and irradiance series read from a CSV file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    /// Desired load per step (kW).
    pub load_kw: Vec<f64>,
    /// Normalized PV production potential per step (kW/kWp).
    pub irradiance: Vec<f64>,
}

/// Time-series data error.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read time series: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed time series CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("time series is empty")]
    Empty,
    #[error("time series row {row}: {message}")]
    BadValue { row: usize, message: String },
}

#[derive(Debug, Deserialize)]
struct Row {
    load_kw: f64,
    irradiance_kw_per_kwp: f64,
}

/// Reads a two-column time series from a CSV file.
///
/// Expected header: `load_kw,irradiance_kw_per_kwp`, one row per step.
///
/// # Errors
///
/// Returns a `DataError` if the file cannot be read, a row fails to
/// parse, the series is empty, or a value is negative or non-finite.
pub fn read_timeseries(path: &Path) -> Result<TimeSeries, DataError> {
    let file = File::open(path)?;
    let series = read_timeseries_from(file)?;
    debug!(steps = series.load_kw.len(), path = %path.display(), "time series loaded");
    Ok(series)
}

/// Reads a time series from any reader (see [`read_timeseries`]).
///
/// # Errors
///
/// Same conditions as [`read_timeseries`].
pub fn read_timeseries_from(reader: impl Read) -> Result<TimeSeries, DataError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut series = TimeSeries::default();

    for (i, result) in rdr.deserialize::<Row>().enumerate() {
        let row = result?;
        if !row.load_kw.is_finite() || row.load_kw < 0.0 {
            return Err(DataError::BadValue {
                row: i + 1,
                message: format!("load_kw must be finite and >= 0, got {}", row.load_kw),
            });
        }
        if !row.irradiance_kw_per_kwp.is_finite() || row.irradiance_kw_per_kwp < 0.0 {
            return Err(DataError::BadValue {
                row: i + 1,
                message: format!(
                    "irradiance_kw_per_kwp must be finite and >= 0, got {}",
                    row.irradiance_kw_per_kwp
                ),
            });
        }
        series.load_kw.push(row.load_kw);
        series.irradiance.push(row.irradiance_kw_per_kwp);
    }

    if series.load_kw.is_empty() {
        return Err(DataError::Empty);
    }
    Ok(series)
}
