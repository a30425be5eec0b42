//! solar-lcoe entry point: CLI wiring, data loading and batch execution.

use std::path::Path;
use std::process;
use std::sync::Arc;

use solar_lcoe::cli::{self, CliOptions, DEMO_LOCATIONS, DEMO_SEED, RowSource};
use solar_lcoe::comparison::compare_to_reference;
use solar_lcoe::config::ScenarioConfig;
use solar_lcoe::io::{export_csv, load_overrides, load_rows_from_path};
use solar_lcoe::logging;
use solar_lcoe::optimizer::OptimizationSummary;
use solar_lcoe::runtime::{Dataset, ExecutionStrategy, LcoeService};
use solar_lcoe::synthetic::demo_grid;
use tracing::warn;

fn load_scenario(cli: &CliOptions) -> ScenarioConfig {
    // --scenario takes priority, then --preset, then baseline default
    let loaded = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path)
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)
    } else {
        Ok(ScenarioConfig::baseline())
    };
    let scenario = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    scenario
}

fn load_dataset(cli: &CliOptions, scenario: &ScenarioConfig) -> Dataset {
    let table = match &cli.rows {
        RowSource::Csv(path) => load_rows_from_path(path).unwrap_or_else(|e| {
            eprintln!("error: {e}");
            process::exit(1);
        }),
        RowSource::Demo => demo_grid(DEMO_LOCATIONS, DEMO_SEED),
    };

    let overrides = load_overrides(cli.wacc.as_deref(), cli.capex.as_deref()).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    });
    if !scenario.overrides.is_global() && overrides.is_empty() {
        warn!("local overrides enabled but no --wacc or --capex data given, using global inputs");
    }

    Dataset::new(table).with_overrides(overrides)
}

fn main() {
    let cli = cli::parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        cli::print_usage();
        process::exit(1);
    });
    if cli.help {
        cli::print_usage();
        return;
    }
    logging::init(cli.verbose);

    let scenario = load_scenario(&cli);
    let dataset = Arc::new(load_dataset(&cli, &scenario));
    let request = scenario.request();

    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });
    let _guard = rt.enter();

    let service = LcoeService::new(Arc::clone(&dataset), ExecutionStrategy::from(&scenario.worker));
    let results = rt.block_on(service.compute(&request));

    for r in results.iter() {
        println!("{r}");
    }
    let summary = OptimizationSummary::from_results(&results, request.target);
    println!("\n{summary}");

    let compared = compare_to_reference(&results, cli.reference, request.target);
    if let Some(id) = cli.reference {
        if !results.iter().any(|r| r.location_id() == id) {
            warn!(reference = id, "reference location has no result, deltas omitted");
        }
    }

    if let Some(ref path) = cli.out {
        if let Err(e) = export_csv(&compared, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Results written to {}", path.display());
    }

    if cli.serve {
        serve(&rt, &cli, request.target, results);
    }
}

#[cfg(feature = "api")]
fn serve(
    rt: &tokio::runtime::Runtime,
    cli: &CliOptions,
    target: solar_lcoe::optimizer::OptimizationTarget,
    results: Arc<Vec<solar_lcoe::optimizer::OptimizedResult>>,
) {
    use std::net::SocketAddr;

    let state = Arc::new(solar_lcoe::api::AppState::new(target, results));
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    if let Err(e) = rt.block_on(solar_lcoe::api::serve(state, addr)) {
        eprintln!("error: API server failed on {addr}: {e}");
        process::exit(1);
    }
}

#[cfg(not(feature = "api"))]
fn serve(
    _rt: &tokio::runtime::Runtime,
    _cli: &CliOptions,
    _target: solar_lcoe::optimizer::OptimizationTarget,
    _results: Arc<Vec<solar_lcoe::optimizer::OptimizedResult>>,
) {
    eprintln!("error: --serve requires building with `--features api`");
    process::exit(1);
}
