//! End-to-end runs of the `solar-lcoe` binary.

mod common;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_solar-lcoe"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("solar-lcoe process should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Reads the integer after `label` in the summary block.
fn summary_count(text: &str, label: &str) -> Option<usize> {
    text.lines()
        .find_map(|line| line.strip_prefix(label))
        .and_then(|rest| rest.trim().parse().ok())
}

fn scenario_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(name)
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("solar-lcoe-{}-{name}", std::process::id()));
    fs::write(&path, contents).expect("temp file should be writable");
    path
}

#[test]
fn demo_baseline_reports_every_location() {
    let output = run(&["--demo"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("--- Optimization Summary ---"));
    assert_eq!(summary_count(&text, "Locations:"), Some(64));
    let meeting = summary_count(&text, "Meeting target:").unwrap_or(usize::MAX);
    assert!(meeting <= 64);
}

#[test]
fn bundled_scenarios_run() {
    for name in ["baseline.toml", "outlook_2050.toml", "price_ceiling.toml"] {
        let path = scenario_path(name);
        let output = run(&["--scenario", path.to_str().unwrap_or_default()]);
        assert!(output.status.success(), "{name} failed: {}", String::from_utf8_lossy(&output.stderr));
        assert_eq!(summary_count(&stdout(&output), "Locations:"), Some(64), "{name}");
    }
}

#[test]
fn presets_run() {
    for preset in ["baseline", "outlook_2035", "outlook_2050", "price_ceiling"] {
        let output = run(&["--preset", preset]);
        assert!(output.status.success(), "preset {preset} failed");
    }
}

#[test]
fn csv_rows_with_reference_export() {
    let rows = temp_file("rows.csv", common::ROWS_CSV);
    let out = std::env::temp_dir().join(format!("solar-lcoe-{}-out.csv", std::process::id()));

    let output = run(&[
        "--rows",
        rows.to_str().unwrap_or_default(),
        "--reference",
        "42",
        "--out",
        out.to_str().unwrap_or_default(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let text = stdout(&output);
    assert_eq!(summary_count(&text, "Locations:"), Some(2));
    assert_eq!(summary_count(&text, "Meeting target:"), Some(2));

    let mut reader = csv::Reader::from_path(&out).expect("exported CSV should exist");
    let headers = reader.headers().expect("header row").clone();
    assert_eq!(headers.len(), 14);
    let delta_col = headers.iter().position(|h| h == "delta").unwrap_or(usize::MAX);
    let records: Vec<csv::StringRecord> = reader.records().filter_map(Result::ok).collect();
    assert_eq!(records.len(), 2);
    let reference = records
        .iter()
        .find(|r| r.get(0) == Some("42"))
        .expect("location 42 exported");
    assert_eq!(reference.get(delta_col).map(str::parse::<f64>), Some(Ok(0.0)));

    let _ = fs::remove_file(rows);
    let _ = fs::remove_file(out);
}

#[test]
fn invalid_rows_fail_with_message() {
    let rows = temp_file("bad.csv", "location_id,latitude,longitude,solar_gw,batt_gwh,annual_cf\n1,0,0,5,4,1.7\n");
    let output = run(&["--rows", rows.to_str().unwrap_or_default()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("annual_cf"));
    let _ = fs::remove_file(rows);
}

#[test]
fn unknown_preset_fails() {
    let output = run(&["--preset", "nope"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown preset"));
}
