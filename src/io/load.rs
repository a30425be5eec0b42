//! CSV loading of configuration rows and local override tables.
//!
//! Configuration rows are validated strictly: a bad row aborts the load with
//! the offending line. Override tables are best-effort: rows with missing or
//! non-finite values are skipped.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::cost::{CapexAnchors, LocalOverrides};
use crate::optimizer::{ConfigurationRow, LocationId, LocationTable};

/// Errors raised at the data boundary.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open \"{path}\": {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {field} {message}")]
    Invalid {
        line: u64,
        field: &'static str,
        message: String,
    },
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads configuration rows from a CSV file.
///
/// # Errors
///
/// Returns a `LoadError` if the file cannot be read or a row is invalid.
pub fn load_rows_from_path(path: &Path) -> Result<LocationTable, LoadError> {
    let table = load_rows(open(path)?)?;
    info!(path = %path.display(), locations = table.len(), "loaded configuration rows");
    Ok(table)
}

/// Loads configuration rows from any CSV reader, grouped by location in
/// file order.
///
/// # Errors
///
/// Returns a `LoadError` for malformed CSV, non-finite coordinates, negative
/// or non-finite sizes, or a capacity factor outside `[0, 1]`.
pub fn load_rows(reader: impl Read) -> Result<LocationTable, LoadError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut table = LocationTable::new();
    let mut count = 0_usize;

    for (idx, record) in rdr.deserialize::<ConfigurationRow>().enumerate() {
        let row = record?;
        // header occupies line 1
        validate_row(&row, idx as u64 + 2)?;
        table.entry(row.location_id).or_default().push(row);
        count += 1;
    }

    debug!(rows = count, locations = table.len(), "parsed configuration rows");
    Ok(table)
}

fn validate_row(row: &ConfigurationRow, line: u64) -> Result<(), LoadError> {
    let invalid = |field: &'static str, message: &str| LoadError::Invalid {
        line,
        field,
        message: message.to_string(),
    };

    if !row.latitude.is_finite() {
        return Err(invalid("latitude", "must be finite"));
    }
    if !row.longitude.is_finite() {
        return Err(invalid("longitude", "must be finite"));
    }
    if !row.solar_gw.is_finite() || row.solar_gw < 0.0 {
        return Err(invalid("solar_gw", "must be finite and >= 0"));
    }
    if !row.batt_gwh.is_finite() || row.batt_gwh < 0.0 {
        return Err(invalid("batt_gwh", "must be finite and >= 0"));
    }
    if !(0.0..=1.0).contains(&row.annual_cf) {
        return Err(invalid("annual_cf", "must be in [0, 1]"));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct WaccRecord {
    location_id: LocationId,
    wacc_percent: Option<f64>,
}

/// Loads local WACC values (percent) and stores them as fractions.
///
/// # Errors
///
/// Returns a `LoadError` for unreadable or structurally malformed CSV.
pub fn load_wacc(reader: impl Read) -> Result<HashMap<LocationId, f64>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut wacc = HashMap::new();
    let mut skipped = 0_usize;

    for record in rdr.deserialize::<WaccRecord>() {
        let record = record?;
        match record.wacc_percent.filter(|w| w.is_finite()) {
            Some(percent) => {
                wacc.insert(record.location_id, percent / 100.0);
            }
            None => skipped += 1,
        }
    }

    debug!(entries = wacc.len(), skipped, "parsed local wacc");
    Ok(wacc)
}

#[derive(Debug, Deserialize)]
struct CapexRecord {
    location_id: LocationId,
    solar_2024: Option<f64>,
    solar_2035: Option<f64>,
    solar_2050: Option<f64>,
    battery_2024: Option<f64>,
    battery_2035: Option<f64>,
    battery_2050: Option<f64>,
}

impl CapexRecord {
    fn anchors(&self) -> Option<CapexAnchors> {
        let values = [
            self.solar_2024?,
            self.solar_2035?,
            self.solar_2050?,
            self.battery_2024?,
            self.battery_2035?,
            self.battery_2050?,
        ];
        values.iter().all(|v| v.is_finite()).then(|| CapexAnchors {
            solar: [values[0], values[1], values[2]],
            battery: [values[3], values[4], values[5]],
        })
    }
}

/// Loads local CAPEX anchor projections. Extra columns such as `region` are
/// ignored.
///
/// # Errors
///
/// Returns a `LoadError` for unreadable or structurally malformed CSV.
pub fn load_capex(reader: impl Read) -> Result<HashMap<LocationId, CapexAnchors>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut capex = HashMap::new();
    let mut skipped = 0_usize;

    for record in rdr.deserialize::<CapexRecord>() {
        let record = record?;
        match record.anchors() {
            Some(anchors) => {
                capex.insert(record.location_id, anchors);
            }
            None => skipped += 1,
        }
    }

    debug!(entries = capex.len(), skipped, "parsed local capex");
    Ok(capex)
}

/// Loads whichever override tables are given into one [`LocalOverrides`].
///
/// # Errors
///
/// Returns a `LoadError` if either file cannot be read or parsed.
pub fn load_overrides(wacc_path: Option<&Path>, capex_path: Option<&Path>) -> Result<LocalOverrides, LoadError> {
    let mut overrides = LocalOverrides::default();
    if let Some(path) = wacc_path {
        overrides.wacc = load_wacc(open(path)?)?;
        info!(path = %path.display(), entries = overrides.wacc.len(), "loaded local wacc");
    }
    if let Some(path) = capex_path {
        overrides.capex = load_capex(open(path)?)?;
        info!(path = %path.display(), entries = overrides.capex.len(), "loaded local capex");
    }
    Ok(overrides)
}
