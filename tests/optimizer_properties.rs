//! Property checks for the cost model and optimizer over seeded random tables.

mod common;

use solar_lcoe::comparison::{compare_to_reference, compute_transmission_metrics};
use solar_lcoe::cost::{OverrideMap, capital_recovery_factor, compute_lcoe};
use solar_lcoe::optimizer::{
    OptimizationTarget, compute_best_for_all_locations, find_best_meeting_cf_target,
};

const SEEDS: [u64; 4] = [1, 7, 42, 1234];

#[test]
fn crf_basic_identities() {
    for n in 1..=60 {
        assert_eq!(capital_recovery_factor(0.0, n), 1.0 / f64::from(n));
        assert!(capital_recovery_factor(0.05, n) > 0.0);
    }
    assert_eq!(capital_recovery_factor(0.05, 0), 0.0);
}

#[test]
fn location_42_meets_at_ninety_percent() {
    let params = common::default_params();
    let rows = common::location_42_rows();
    let result = find_best_meeting_cf_target(&rows, 0.90, &params, None)
        .expect("non-empty rows yield a result");

    assert!(result.meets_target);
    assert_eq!(result.annual_cf(), 0.95);
    assert_eq!(result.lcoe, compute_lcoe(&rows[1], &params, None));
    assert_eq!(result.max_config_solar, Some(10.0));
    assert_eq!(result.max_config_batt, Some(18.0));
}

#[test]
fn location_42_falls_back_at_ninety_seven_percent() {
    let params = common::default_params();
    let results = compute_best_for_all_locations(
        &common::location_42_table(),
        OptimizationTarget::CapacityFactor(0.97),
        &params,
        &OverrideMap::new(),
    );
    assert_eq!(results.len(), 1);
    assert!(!results[0].meets_target);
    assert_eq!(results[0].annual_cf(), 0.95);
}

#[test]
fn one_result_per_non_empty_location() {
    let params = common::default_params();
    for seed in SEEDS {
        let table = common::random_table(30, seed);
        let non_empty: Vec<i64> = table
            .iter()
            .filter(|(_, rows)| !rows.is_empty())
            .map(|(id, _)| *id)
            .collect();
        for target in [OptimizationTarget::CapacityFactor(0.8), OptimizationTarget::Lcoe(120.0)] {
            let results = compute_best_for_all_locations(&table, target, &params, &OverrideMap::new());
            let ids: Vec<i64> = results.iter().map(|r| r.location_id()).collect();
            assert_eq!(ids, non_empty, "seed {seed}");
        }
    }
}

#[test]
fn met_target_is_cheapest_qualifying_row() {
    let params = common::default_params();
    let target_cf = 0.75;
    for seed in SEEDS {
        let table = common::random_table(30, seed);
        let results = compute_best_for_all_locations(
            &table,
            OptimizationTarget::CapacityFactor(target_cf),
            &params,
            &OverrideMap::new(),
        );
        for result in results.iter().filter(|r| r.meets_target) {
            let rows = &table[&result.location_id()];
            assert!(result.annual_cf() >= target_cf);
            let min = rows
                .iter()
                .filter(|r| r.annual_cf >= target_cf)
                .map(|r| compute_lcoe(r, &params, None))
                .fold(f64::INFINITY, f64::min);
            assert_eq!(result.lcoe, min, "seed {seed}, location {}", result.location_id());
        }
    }
}

#[test]
fn missed_target_is_most_reliable_row() {
    let params = common::default_params();
    let target_cf = 0.9;
    for seed in SEEDS {
        let table = common::random_table(30, seed);
        let results = compute_best_for_all_locations(
            &table,
            OptimizationTarget::CapacityFactor(target_cf),
            &params,
            &OverrideMap::new(),
        );
        for result in results.iter().filter(|r| !r.meets_target) {
            let rows = &table[&result.location_id()];
            let max_cf = rows.iter().map(|r| r.annual_cf).fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(result.annual_cf(), max_cf);
            assert!(rows.iter().all(|r| r.annual_cf < target_cf));
        }
    }
}

#[test]
fn max_config_is_always_attached_in_cf_mode() {
    let params = common::default_params();
    for seed in SEEDS {
        let table = common::random_table(30, seed);
        let results = compute_best_for_all_locations(
            &table,
            OptimizationTarget::CapacityFactor(0.85),
            &params,
            &OverrideMap::new(),
        );
        for result in &results {
            let rows = &table[&result.location_id()];
            let max_solar = rows.iter().map(|r| r.solar_gw).fold(f64::NEG_INFINITY, f64::max);
            let max_batt = rows
                .iter()
                .filter(|r| r.solar_gw == max_solar)
                .map(|r| r.batt_gwh)
                .fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(result.max_config_solar, Some(max_solar));
            assert_eq!(result.max_config_batt, Some(max_batt));
            assert!(result.max_config_lcoe.is_some());
        }
    }
}

#[test]
fn transmission_breakevens_are_never_negative() {
    let params = common::default_params();
    for seed in SEEDS {
        let table = common::random_table(20, seed);
        let target = OptimizationTarget::CapacityFactor(0.7);
        let results = compute_best_for_all_locations(&table, target, &params, &OverrideMap::new());
        let Some(reference) = results.first() else { continue };
        for c in compare_to_reference(&results, Some(reference.location_id()), target) {
            if let Some(m) = c.tx_metrics {
                assert!(m.breakeven_per_gw >= 0.0);
                assert!(m.breakeven_per_gw_km >= 0.0);
                if m.savings_per_mwh <= 0.0 {
                    assert_eq!(m.breakeven_per_gw, 0.0);
                    assert_eq!(m.breakeven_per_gw_km, 0.0);
                }
            }
        }
    }

    let a = common::row(1, 5.0, 5.0, 0.9);
    let b = common::row(2, 5.0, 5.0, 0.9);
    let m = compute_transmission_metrics(&a, &b, 12.5).expect("finite inputs");
    assert_eq!((m.breakeven_per_gw, m.breakeven_per_gw_km), (0.0, 0.0));
}

#[test]
fn repeated_runs_are_bitwise_identical() {
    let params = common::default_params();
    let table = common::random_table(40, 99);
    for target in [OptimizationTarget::CapacityFactor(0.8), OptimizationTarget::Lcoe(100.0)] {
        let first = compute_best_for_all_locations(&table, target, &params, &OverrideMap::new());
        let second = compute_best_for_all_locations(&table.clone(), target, &params.clone(), &OverrideMap::new());
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.lcoe.to_bits(), b.lcoe.to_bits());
            assert_eq!(a.row, b.row);
            assert_eq!(a.meets_target, b.meets_target);
        }
    }
}

#[test]
fn lcoe_mode_respects_ceiling() {
    let params = common::default_params();
    let ceiling = 110.0;
    for seed in SEEDS {
        let table = common::random_table(30, seed);
        let results = compute_best_for_all_locations(
            &table,
            OptimizationTarget::Lcoe(ceiling),
            &params,
            &OverrideMap::new(),
        );
        for result in &results {
            let rows = &table[&result.location_id()];
            assert!(result.max_config_solar.is_none());
            if result.meets_target {
                assert!(result.lcoe <= ceiling);
                for r in rows {
                    if compute_lcoe(r, &params, None) <= ceiling {
                        assert!(r.annual_cf <= result.annual_cf());
                    }
                }
            } else {
                assert!(rows.iter().all(|r| compute_lcoe(r, &params, None) > ceiling));
            }
        }
    }
}
