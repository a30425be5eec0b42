//! CSV export for optimizer results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::comparison::ComparedResult;

/// Column header for results export.
const HEADER: &str = "location_id,latitude,longitude,solar_gw,batt_gwh,annual_cf,\
                       lcoe,meets_target,max_config_solar,max_config_batt,max_config_lcoe,\
                       delta,breakeven_per_gw,breakeven_per_gw_km";

/// Exports compared results to a CSV file at the given path.
///
/// Writes a header row followed by one data row per location, in the order
/// given. Absent optional values are written as empty fields and infinite
/// costs as `inf`.
///
/// # Arguments
///
/// * `results` - Results annotated against the reference (if any)
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[ComparedResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes compared results as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[ComparedResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for c in results {
        let r = &c.result;
        let tx = c.tx_metrics.as_ref();
        wtr.write_record(&[
            r.row.location_id.to_string(),
            format!("{:.6}", r.row.latitude),
            format!("{:.6}", r.row.longitude),
            format!("{:.4}", r.row.solar_gw),
            format!("{:.4}", r.row.batt_gwh),
            format!("{:.6}", r.row.annual_cf),
            format!("{:.4}", r.lcoe),
            r.meets_target.to_string(),
            optional(r.max_config_solar),
            optional(r.max_config_batt),
            optional(r.max_config_lcoe),
            optional(c.delta),
            optional(tx.map(|m| m.breakeven_per_gw)),
            optional(tx.map(|m| m.breakeven_per_gw_km)),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.4}")).unwrap_or_default()
}
