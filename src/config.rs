//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::cost::{FinancialParameters, OverrideSelection, cost_multipliers_for_year};
use crate::optimizer::OptimizationTarget;
use crate::runtime::OptimizationRequest;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Global cost assumptions.
    #[serde(default)]
    pub financial: FinancialConfig,
    /// Optimisation mode and thresholds.
    #[serde(default)]
    pub target: TargetConfig,
    /// Cost-decline outlook.
    #[serde(default)]
    pub outlook: OutlookConfig,
    /// Local data toggles.
    #[serde(default)]
    pub overrides: OverrideSelection,
    /// Execution strategy.
    #[serde(default)]
    pub worker: WorkerConfig,
}

/// Global cost assumptions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinancialConfig {
    /// Solar CAPEX ($/kW AC).
    pub solar_capex_per_kw: f64,
    /// Battery CAPEX ($/kWh).
    pub battery_capex_per_kwh: f64,
    /// Annual solar O&M as a fraction of CAPEX.
    pub solar_opex_fraction: f64,
    /// Annual battery O&M as a fraction of CAPEX.
    pub battery_opex_fraction: f64,
    /// Solar asset life in years (must be > 0).
    pub solar_life_years: u32,
    /// Battery asset life in years (must be > 0).
    pub battery_life_years: u32,
    /// Discount rate (fraction, >= 0).
    pub wacc: f64,
    /// DC-to-AC oversizing factor (> 0).
    pub inverter_load_ratio: f64,
}

impl Default for FinancialConfig {
    fn default() -> Self {
        let p = FinancialParameters::default();
        Self {
            solar_capex_per_kw: p.solar_capex_per_kw,
            battery_capex_per_kwh: p.battery_capex_per_kwh,
            solar_opex_fraction: p.solar_opex_fraction,
            battery_opex_fraction: p.battery_opex_fraction,
            solar_life_years: p.solar_life_years,
            battery_life_years: p.battery_life_years,
            wacc: p.wacc,
            inverter_load_ratio: p.inverter_load_ratio,
        }
    }
}

/// Optimisation mode and thresholds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    /// `"cf"` (cheapest meeting a capacity factor) or `"lcoe"` (most
    /// reliable under a cost ceiling).
    pub mode: String,
    /// Capacity-factor target in `[0, 1]`.
    pub target_cf: f64,
    /// Cost ceiling ($/MWh).
    pub target_lcoe: f64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            mode: "cf".to_string(),
            target_cf: 0.90,
            target_lcoe: 90.0,
        }
    }
}

/// Cost-decline outlook.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutlookConfig {
    /// Year at which current CAPEX inputs apply unchanged.
    pub base_year: u32,
    /// Selected outlook year (clamped to `[base_year, 2050]`).
    pub year: u32,
}

impl Default for OutlookConfig {
    fn default() -> Self {
        Self {
            base_year: 2025,
            year: 2025,
        }
    }
}

/// Execution strategy settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkerConfig {
    /// Run batches on the background worker.
    pub enabled: bool,
    /// Worker reply timeout before falling back inline (ms).
    pub timeout_ms: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: 12_000,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"financial.wacc"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: dashboard defaults, capacity-factor
    /// target of 90 %, today's costs.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the 2035 outlook with local financing and CAPEX enabled.
    pub fn outlook_2035() -> Self {
        Self {
            outlook: OutlookConfig {
                year: 2035,
                ..OutlookConfig::default()
            },
            overrides: OverrideSelection {
                local_wacc: true,
                local_capex: true,
            },
            ..Self::default()
        }
    }

    /// Returns the 2050 outlook with local financing and CAPEX enabled.
    pub fn outlook_2050() -> Self {
        Self {
            outlook: OutlookConfig {
                year: 2050,
                ..OutlookConfig::default()
            },
            overrides: OverrideSelection {
                local_wacc: true,
                local_capex: true,
            },
            ..Self::default()
        }
    }

    /// Returns the price-ceiling preset: most reliable configuration at or
    /// under 65 $/MWh.
    pub fn price_ceiling() -> Self {
        Self {
            target: TargetConfig {
                mode: "lcoe".to_string(),
                target_lcoe: 65.0,
                ..TargetConfig::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "outlook_2035", "outlook_2050", "price_ceiling"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "outlook_2035" => Ok(Self::outlook_2035()),
            "outlook_2050" => Ok(Self::outlook_2050()),
            "price_ceiling" => Ok(Self::price_ceiling()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut check = |ok: bool, field: &str, message: &str| {
            if !ok {
                errors.push(ConfigError {
                    field: field.into(),
                    message: message.into(),
                });
            }
        };

        let f = &self.financial;
        check(
            f.solar_capex_per_kw.is_finite() && f.solar_capex_per_kw >= 0.0,
            "financial.solar_capex_per_kw",
            "must be finite and >= 0",
        );
        check(
            f.battery_capex_per_kwh.is_finite() && f.battery_capex_per_kwh >= 0.0,
            "financial.battery_capex_per_kwh",
            "must be finite and >= 0",
        );
        check(
            f.solar_opex_fraction.is_finite() && f.solar_opex_fraction >= 0.0,
            "financial.solar_opex_fraction",
            "must be finite and >= 0",
        );
        check(
            f.battery_opex_fraction.is_finite() && f.battery_opex_fraction >= 0.0,
            "financial.battery_opex_fraction",
            "must be finite and >= 0",
        );
        check(f.solar_life_years > 0, "financial.solar_life_years", "must be > 0");
        check(f.battery_life_years > 0, "financial.battery_life_years", "must be > 0");
        check(
            f.wacc.is_finite() && f.wacc >= 0.0,
            "financial.wacc",
            "must be finite and >= 0",
        );
        check(
            f.inverter_load_ratio.is_finite() && f.inverter_load_ratio > 0.0,
            "financial.inverter_load_ratio",
            "must be finite and > 0",
        );

        let t = &self.target;
        check(
            t.mode == "cf" || t.mode == "lcoe",
            "target.mode",
            &format!("must be \"cf\" or \"lcoe\", got \"{}\"", t.mode),
        );
        check(
            (0.0..=1.0).contains(&t.target_cf),
            "target.target_cf",
            "must be in [0.0, 1.0]",
        );
        check(
            t.target_lcoe.is_finite() && t.target_lcoe >= 0.0,
            "target.target_lcoe",
            "must be finite and >= 0",
        );

        let o = &self.outlook;
        check(o.year >= o.base_year, "outlook.year", "must be >= outlook.base_year");

        check(self.worker.timeout_ms > 0, "worker.timeout_ms", "must be > 0");

        errors
    }

    /// The optimisation target selected by `[target]`.
    pub fn optimization_target(&self) -> OptimizationTarget {
        if self.target.mode == "lcoe" {
            OptimizationTarget::Lcoe(self.target.target_lcoe)
        } else {
            OptimizationTarget::CapacityFactor(self.target.target_cf)
        }
    }

    /// Financial parameters with the outlook multipliers for the selected
    /// year applied.
    pub fn financial_parameters(&self) -> FinancialParameters {
        let f = &self.financial;
        FinancialParameters {
            solar_capex_per_kw: f.solar_capex_per_kw,
            battery_capex_per_kwh: f.battery_capex_per_kwh,
            solar_opex_fraction: f.solar_opex_fraction,
            battery_opex_fraction: f.battery_opex_fraction,
            solar_life_years: f.solar_life_years,
            battery_life_years: f.battery_life_years,
            wacc: f.wacc,
            inverter_load_ratio: f.inverter_load_ratio,
            cost_multipliers: cost_multipliers_for_year(self.outlook.base_year, self.outlook.year),
        }
    }

    /// Builds the full optimizer request for this scenario.
    pub fn request(&self) -> OptimizationRequest {
        OptimizationRequest {
            target: self.optimization_target(),
            params: self.financial_parameters(),
            selection: self.overrides,
            year: self.outlook.year,
        }
    }
}
