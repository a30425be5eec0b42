//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

use crate::optimizer::LocationId;

/// Default API port.
pub const DEFAULT_PORT: u16 = 3000;
/// Number of locations in the synthetic demo grid.
pub const DEMO_LOCATIONS: usize = 64;
/// Seed for the synthetic demo grid.
pub const DEMO_SEED: u64 = 42;

/// Where configuration rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSource {
    /// A configuration-rows CSV file.
    Csv(PathBuf),
    /// The seeded synthetic grid.
    Demo,
}

/// Parsed CLI options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub rows: RowSource,
    pub wacc: Option<PathBuf>,
    pub capex: Option<PathBuf>,
    pub reference: Option<LocationId>,
    pub out: Option<PathBuf>,
    pub verbose: bool,
    pub serve: bool,
    pub port: u16,
    pub help: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            scenario: None,
            preset: None,
            rows: RowSource::Demo,
            wacc: None,
            capex: None,
            reference: None,
            out: None,
            verbose: false,
            serve: false,
            port: DEFAULT_PORT,
            help: false,
        }
    }
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

/// Parses options from an argument list (program name excluded).
///
/// # Errors
///
/// Returns a message for unknown flags, missing or malformed values, and
/// conflicting sources.
pub fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    let mut opts = CliOptions::default();
    let mut rows_path: Option<PathBuf> = None;
    let mut demo = false;
    let mut i = 0usize;

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --scenario (expected a TOML file path)")?;
                if opts.scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--rows" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --rows (expected a CSV file path)")?;
                if rows_path.replace(PathBuf::from(path)).is_some() {
                    return Err("--rows provided more than once".to_string());
                }
            }
            "--demo" => demo = true,
            "--wacc" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --wacc (expected a CSV file path)")?;
                opts.wacc = Some(PathBuf::from(path));
            }
            "--capex" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --capex (expected a CSV file path)")?;
                opts.capex = Some(PathBuf::from(path));
            }
            "--reference" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --reference (expected a location id)")?;
                let id = raw
                    .parse::<LocationId>()
                    .map_err(|_| format!("--reference value \"{raw}\" is not a valid location id"))?;
                opts.reference = Some(id);
            }
            "--out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --out (expected a file path)")?;
                opts.out = Some(PathBuf::from(path));
            }
            "--serve" => opts.serve = true,
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                opts.port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
            }
            "--verbose" | "-v" => opts.verbose = true,
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.scenario.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source".to_string(),
        );
    }
    opts.rows = match (rows_path, demo) {
        (Some(_), true) => {
            return Err("arguments `--rows` and `--demo` are mutually exclusive; choose one source".to_string());
        }
        (Some(path), false) => RowSource::Csv(path),
        (None, _) => RowSource::Demo,
    };

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index).map(String::as_str).ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("solar-lcoe: best solar-plus-storage configuration per location");
    eprintln!();
    eprintln!("Usage: solar-lcoe [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>     Load scenario from TOML config file");
    eprintln!("  --preset <name>       Use a built-in preset (baseline, outlook_2035, outlook_2050, price_ceiling)");
    eprintln!("  --rows <path>         Configuration rows CSV");
    eprintln!("  --demo                Use the synthetic demo grid (default)");
    eprintln!("  --wacc <path>         Local WACC CSV (location_id,wacc_percent)");
    eprintln!("  --capex <path>        Local CAPEX CSV (2024/2035/2050 anchors)");
    eprintln!("  --reference <id>      Compare every location against this one");
    eprintln!("  --out <path>          Export results to CSV");
    eprintln!("  --serve               Start REST API server (requires `api` feature)");
    eprintln!("  --port <u16>          API server port (default: {DEFAULT_PORT})");
    eprintln!("  -v, --verbose         Debug logging");
    eprintln!("  -h, --help            Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_args_use_defaults() {
        let opts = parse_args_from(Vec::new());
        assert_eq!(opts, Ok(CliOptions::default()));
    }

    #[test]
    fn supports_scenario_cli() {
        let opts = parse_args_from(args(&["--scenario", "scenario.toml"])).unwrap_or_default();
        assert_eq!(
            opts.scenario.as_deref().and_then(|p| p.to_str()),
            Some("scenario.toml")
        );
        assert!(opts.preset.is_none());
    }

    #[test]
    fn supports_full_run_cli() {
        let opts = parse_args_from(args(&[
            "--preset",
            "outlook_2035",
            "--rows",
            "rows.csv",
            "--wacc",
            "wacc.csv",
            "--capex",
            "capex.csv",
            "--reference",
            "-12",
            "--out",
            "out.csv",
        ]));
        assert!(opts.is_ok(), "{opts:?}");
        let opts = opts.unwrap_or_default();
        assert_eq!(opts.preset.as_deref(), Some("outlook_2035"));
        assert_eq!(opts.rows, RowSource::Csv(PathBuf::from("rows.csv")));
        assert_eq!(opts.reference, Some(-12));
        assert!(opts.wacc.is_some() && opts.capex.is_some() && opts.out.is_some());
    }

    #[test]
    fn scenario_and_preset_conflict() {
        let err = parse_args_from(args(&["--scenario", "a.toml", "--preset", "baseline"]));
        assert!(err.is_err());
    }

    #[test]
    fn rows_and_demo_conflict() {
        let err = parse_args_from(args(&["--rows", "a.csv", "--demo"]));
        assert!(err.is_err());
    }

    #[test]
    fn bad_reference_is_rejected() {
        let err = parse_args_from(args(&["--reference", "abc"]));
        assert!(err.err().is_some_and(|e| e.contains("--reference")));
    }

    #[test]
    fn missing_value_is_rejected() {
        assert!(parse_args_from(args(&["--port"])).is_err());
        assert!(parse_args_from(args(&["--bogus"])).is_err());
    }

    #[test]
    fn serve_and_port() {
        let opts = parse_args_from(args(&["--serve", "--port", "8080"])).unwrap_or_default();
        assert!(opts.serve);
        assert_eq!(opts.port, 8080);
    }
}
