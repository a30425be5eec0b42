//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use rand::{Rng, SeedableRng, rngs::StdRng};

use solar_lcoe::cost::FinancialParameters;
use solar_lcoe::optimizer::{ConfigurationRow, LocationTable};

/// Builds a row at a fixed site for `location_id`.
pub fn row(location_id: i64, solar_gw: f64, batt_gwh: f64, annual_cf: f64) -> ConfigurationRow {
    ConfigurationRow {
        location_id,
        latitude: 20.0 + location_id as f64 * 0.5,
        longitude: 40.0 - location_id as f64 * 0.25,
        solar_gw,
        batt_gwh,
        annual_cf,
    }
}

/// The worked example: three sizings at location 42.
pub fn location_42_rows() -> Vec<ConfigurationRow> {
    vec![row(42, 5.0, 8.0, 0.85), row(42, 10.0, 18.0, 0.95), row(42, 5.0, 4.0, 0.60)]
}

/// Table holding only location 42.
pub fn location_42_table() -> LocationTable {
    let mut table = LocationTable::new();
    table.insert(42, location_42_rows());
    table
}

/// Default dashboard financial assumptions.
pub fn default_params() -> FinancialParameters {
    FinancialParameters::default()
}

/// Random table with `locations` ids, some deliberately empty, and rows in
/// shuffled size order so tie handling and fallbacks are exercised.
pub fn random_table(locations: i64, seed: u64) -> LocationTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut table = LocationTable::new();
    for id in 0..locations {
        let count = if id % 7 == 3 { 0 } else { rng.random_range(1..12) };
        let rows = (0..count)
            .map(|_| {
                let solar_gw = f64::from(rng.random_range(0..8_u8));
                let batt_gwh = f64::from(rng.random_range(0..6_u8)) * 2.0;
                let annual_cf = if solar_gw == 0.0 {
                    0.0
                } else {
                    (rng.random_range(0.1..1.0_f64) * 100.0).round() / 100.0
                };
                row(id, solar_gw, batt_gwh, annual_cf)
            })
            .collect();
        table.insert(id, rows);
    }
    table
}

/// Configuration rows CSV with two locations.
pub const ROWS_CSV: &str = "\
location_id,latitude,longitude,solar_gw,batt_gwh,annual_cf
42,24.0,45.0,5,8,0.85
42,24.0,45.0,10,18,0.95
42,24.0,45.0,5,4,0.60
7,30.0,50.0,4,6,0.91
7,30.0,50.0,8,12,0.97
";
