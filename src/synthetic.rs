//! Seeded synthetic configuration grid for demos and tests.
//!
//! Each location gets a random solar resource and the same sizing sweep.
//! Capacity factor grows with solar until the daytime share is served, after
//! which storage is needed to climb further.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::optimizer::{ConfigurationRow, LocationTable};

/// Solar sizes swept at every location (includes the no-build row).
pub const SOLAR_SIZES: [f64; 7] = [0.0, 1.0, 2.0, 4.0, 6.0, 8.0, 10.0];
/// Battery sizes swept at every location.
pub const BATTERY_SIZES: [f64; 6] = [0.0, 2.0, 4.0, 8.0, 14.0, 20.0];

/// Share of the year that solar can serve without storage.
const DAYTIME_SHARE: f64 = 0.45;
/// Battery size at which overnight demand is fully covered.
const FULL_NIGHT_STORAGE: f64 = 18.0;

/// Builds a grid of `locations` cells with reproducible rows.
///
/// # Arguments
///
/// * `locations` - Number of locations (ids `0..locations`)
/// * `seed` - Random seed for resource and noise draws
pub fn demo_grid(locations: usize, seed: u64) -> LocationTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let columns = (locations as f64).sqrt().ceil().max(1.0) as usize;
    let mut table = LocationTable::new();

    for idx in 0..locations {
        let location_id = idx as i64;
        let latitude = -35.0 + 5.0 * (idx / columns) as f64;
        let longitude = -20.0 + 7.5 * (idx % columns) as f64;
        // annual energy per unit of solar sizing, as a share of baseload
        let resource: f64 = rng.random_range(0.16..0.30);

        let mut rows = Vec::with_capacity(SOLAR_SIZES.len() * BATTERY_SIZES.len());
        for &solar_gw in &SOLAR_SIZES {
            for &batt_gwh in &BATTERY_SIZES {
                let noise: f64 = rng.random_range(-0.005..0.005);
                rows.push(ConfigurationRow {
                    location_id,
                    latitude,
                    longitude,
                    solar_gw,
                    batt_gwh,
                    annual_cf: capacity_factor(resource, solar_gw, batt_gwh, noise),
                });
            }
        }
        table.insert(location_id, rows);
    }

    table
}

fn capacity_factor(resource: f64, solar_gw: f64, batt_gwh: f64, noise: f64) -> f64 {
    if solar_gw <= 0.0 {
        return 0.0;
    }
    let energy_limit = resource * solar_gw;
    let storage = (batt_gwh / FULL_NIGHT_STORAGE).min(1.0);
    let shape_limit = DAYTIME_SHARE + (1.0 - DAYTIME_SHARE) * storage;
    (energy_limit.min(shape_limit) * 0.99 + noise).clamp(0.0, 1.0)
}
