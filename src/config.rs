//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::components::{Battery, DispatchableGenerator, Microgrid, Photovoltaic, Project, WindPower};
use crate::io::import::read_timeseries;
use crate::profiles;

/// Seed offset for the irradiance RNG to avoid correlation with the
/// load profile noise.
const IRRADIANCE_SEED_OFFSET: u64 = 101;
/// Seed offset for the wind speed RNG.
const WIND_SEED_OFFSET: u64 = 211;

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.energy_rated_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    /// Creates a config error for the given field path.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the `island_baseline` preset. Load
/// from TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::island_baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Project framing (lifetime, discounting, time step).
    pub project: ProjectConfig,
    /// Dispatchable generator parameters.
    pub generator: GeneratorConfig,
    /// Battery storage parameters.
    pub battery: BatteryConfig,
    /// Solar PV plant parameters.
    pub pv: PvConfig,
    /// Wind power plant parameters.
    pub wind: WindConfig,
    /// Time-series source and horizon.
    pub timeseries: TimeseriesConfig,
    /// Synthetic load profile parameters.
    pub load_profile: LoadProfileConfig,
    /// Synthetic irradiance profile parameters.
    pub irradiance_profile: IrradianceProfileConfig,
    /// Synthetic wind speed profile parameters.
    pub wind_profile: WindProfileConfig,
}

/// Project framing parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project lifetime (y).
    pub lifetime_y: u32,
    /// Discount rate, 0.0 to 1.0.
    pub discount_rate: f64,
    /// Time step (h).
    pub timestep_h: f64,
    /// Currency symbol used in reports.
    pub currency: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            lifetime_y: 25,
            discount_rate: 0.05,
            timestep_h: 1.0,
            currency: "$".to_string(),
        }
    }
}

/// Dispatchable generator parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Rated power (kW).
    pub power_rated_kw: f64,
    /// Fuel curve intercept (fu/h per kW rated).
    pub fuel_intercept: f64,
    /// Fuel curve slope (fu/h per kW produced).
    pub fuel_slope: f64,
    /// Fuel price ($/fu).
    pub fuel_price: f64,
    /// Investment price ($/kW).
    pub investment_price: f64,
    /// O&M price ($/kW per operating hour).
    pub om_price_hours: f64,
    /// Wear lifetime (hours of operation).
    pub lifetime_hours: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            power_rated_kw: 1800.0,
            fuel_intercept: 0.0,
            fuel_slope: 0.24,
            fuel_price: 1.0,
            investment_price: 400.0,
            om_price_hours: 0.02,
            lifetime_hours: 15_000.0,
        }
    }
}

/// Battery storage parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Rated energy capacity (kWh).
    pub energy_rated_kwh: f64,
    /// Investment price ($/kWh).
    pub investment_price: f64,
    /// O&M price ($/kWh/y).
    pub om_price: f64,
    /// Calendar lifetime (y).
    pub lifetime_calendar_y: f64,
    /// Maximum number of cycles over life.
    pub lifetime_cycles: f64,
    /// Max charge rate (kW per kWh rated).
    pub charge_rate_max: f64,
    /// Max discharge rate (kW per kWh rated).
    pub discharge_rate_max: f64,
    /// Linear loss factor, 0.0 to 1.0.
    pub loss_factor: f64,
    /// Minimum state of charge, 0.0 to 1.0.
    pub soc_min: f64,
    /// Initial state of charge, 0.0 to 1.0.
    pub soc_ini: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            energy_rated_kwh: 9000.0,
            investment_price: 350.0,
            om_price: 10.0,
            lifetime_calendar_y: 15.0,
            lifetime_cycles: 3000.0,
            charge_rate_max: 1.0,
            discharge_rate_max: 1.0,
            loss_factor: 0.05,
            soc_min: 0.0,
            soc_ini: 0.0,
        }
    }
}

/// Solar PV plant parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PvConfig {
    /// Rated power (kW).
    pub power_rated_kw: f64,
    /// Derating factor (performance ratio), 0.0 to 1.0.
    pub derating_factor: f64,
    /// Investment price ($/kW).
    pub investment_price: f64,
    /// O&M price ($/kW/y).
    pub om_price: f64,
    /// Lifetime (y).
    pub lifetime_y: f64,
}

impl Default for PvConfig {
    fn default() -> Self {
        Self {
            power_rated_kw: 6000.0,
            derating_factor: 1.0,
            investment_price: 1200.0,
            om_price: 20.0,
            lifetime_y: 25.0,
        }
    }
}

/// Wind power plant parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindConfig {
    /// Rated power (kW). Zero means no wind source.
    pub power_rated_kw: f64,
    /// Turbine specific power (W/m²).
    pub turbine_specific_power: f64,
    /// Investment price ($/kW).
    pub investment_price: f64,
    /// O&M price ($/kW/y).
    pub om_price: f64,
    /// Lifetime (y).
    pub lifetime_y: f64,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            power_rated_kw: 0.0,
            turbine_specific_power: 300.0,
            investment_price: 3000.0,
            om_price: 60.0,
            lifetime_y: 25.0,
        }
    }
}

/// Time-series source and horizon parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeseriesConfig {
    /// Series source: `"synthetic"` or `"csv"`.
    pub source: String,
    /// CSV file path (required when `source = "csv"`).
    pub csv_path: Option<PathBuf>,
    /// Steps per simulated day (must be > 0).
    pub steps_per_day: usize,
    /// Number of days to simulate (must be > 0).
    pub days: usize,
    /// Master random seed for the synthetic profiles.
    pub seed: u64,
}

impl Default for TimeseriesConfig {
    fn default() -> Self {
        Self {
            source: "synthetic".to_string(),
            csv_path: None,
            steps_per_day: 24,
            days: 365,
            seed: 42,
        }
    }
}

/// Synthetic load profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadProfileConfig {
    /// Baseline consumption (kW).
    pub base_kw: f64,
    /// Sinusoidal amplitude (kW).
    pub amp_kw: f64,
    /// Phase offset (radians).
    pub phase_rad: f64,
    /// Gaussian noise standard deviation (kW).
    pub noise_std: f64,
}

impl Default for LoadProfileConfig {
    fn default() -> Self {
        Self {
            base_kw: 1750.0,
            amp_kw: 750.0,
            phase_rad: 2.88,
            noise_std: 50.0,
        }
    }
}

/// Synthetic irradiance profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IrradianceProfileConfig {
    /// Daylight window start within the day (inclusive).
    pub sunrise_idx: usize,
    /// Daylight window end within the day (exclusive).
    pub sunset_idx: usize,
    /// Multiplicative noise standard deviation.
    pub noise_std: f64,
}

impl Default for IrradianceProfileConfig {
    fn default() -> Self {
        Self {
            sunrise_idx: 6,
            sunset_idx: 19,
            noise_std: 0.15,
        }
    }
}

/// Synthetic wind speed profile parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindProfileConfig {
    /// Mean wind speed (m/s).
    pub mean_mps: f64,
    /// Innovation noise standard deviation (m/s).
    pub std_mps: f64,
    /// AR(1) persistence of the fluctuation, 0.0 to 1.0.
    pub persistence: f64,
}

impl Default for WindProfileConfig {
    fn default() -> Self {
        Self {
            mean_mps: 8.0,
            std_mps: 2.0,
            persistence: 0.7,
        }
    }
}

impl ScenarioConfig {
    /// Returns the island baseline preset: diesel sized just under the
    /// load peak, with PV and battery sized to matter (Ouessant-like
    /// ratios).
    pub fn island_baseline() -> Self {
        Self::default()
    }

    /// Returns the generator-only preset: no PV, no battery, diesel
    /// sized above the load peak.
    pub fn gen_only() -> Self {
        Self {
            generator: GeneratorConfig {
                power_rated_kw: 3000.0,
                ..GeneratorConfig::default()
            },
            battery: BatteryConfig {
                energy_rated_kwh: 0.0,
                ..BatteryConfig::default()
            },
            pv: PvConfig {
                power_rated_kw: 0.0,
                ..PvConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the high-solar preset: oversized PV to exercise
    /// spillage.
    pub fn high_solar() -> Self {
        Self {
            pv: PvConfig {
                power_rated_kw: 15_000.0,
                ..PvConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the wind-diesel preset: wind replaces PV as the
    /// renewable source.
    pub fn wind_diesel() -> Self {
        Self {
            pv: PvConfig {
                power_rated_kw: 0.0,
                ..PvConfig::default()
            },
            wind: WindConfig {
                power_rated_kw: 4000.0,
                ..WindConfig::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["island_baseline", "gen_only", "high_solar", "wind_diesel"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "island_baseline" => Ok(Self::island_baseline()),
            "gen_only" => Ok(Self::gen_only()),
            "high_solar" => Ok(Self::high_solar()),
            "wind_diesel" => Ok(Self::wind_diesel()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML
    /// is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new(
                "scenario",
                format!("cannot read \"{}\": {e}", path.display()),
            )
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains
    /// unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let p = &self.project;
        if p.lifetime_y == 0 {
            errors.push(ConfigError::new("project.lifetime_y", "must be >= 1"));
        }
        if !(0.0..=1.0).contains(&p.discount_rate) {
            errors.push(ConfigError::new(
                "project.discount_rate",
                "must be in [0.0, 1.0]",
            ));
        }
        if p.timestep_h <= 0.0 {
            errors.push(ConfigError::new("project.timestep_h", "must be > 0"));
        }

        if self.generator.power_rated_kw < 0.0 {
            errors.push(ConfigError::new("generator.power_rated_kw", "must be >= 0"));
        }
        if self.generator.lifetime_hours <= 0.0 {
            errors.push(ConfigError::new("generator.lifetime_hours", "must be > 0"));
        }

        let b = &self.battery;
        if b.energy_rated_kwh < 0.0 {
            errors.push(ConfigError::new("battery.energy_rated_kwh", "must be >= 0"));
        }
        if b.charge_rate_max < 0.0 || b.discharge_rate_max < 0.0 {
            errors.push(ConfigError::new(
                "battery.charge_rate_max",
                "rate limits must be >= 0",
            ));
        }
        if !(0.0..=1.0).contains(&b.loss_factor) {
            errors.push(ConfigError::new(
                "battery.loss_factor",
                "must be in [0.0, 1.0]",
            ));
        }
        if !(0.0..=1.0).contains(&b.soc_min) {
            errors.push(ConfigError::new("battery.soc_min", "must be in [0.0, 1.0]"));
        }
        if !(b.soc_min..=1.0).contains(&b.soc_ini) {
            errors.push(ConfigError::new(
                "battery.soc_ini",
                "must be in [soc_min, 1.0]",
            ));
        }
        if b.lifetime_calendar_y <= 0.0 {
            errors.push(ConfigError::new("battery.lifetime_calendar_y", "must be > 0"));
        }

        if self.pv.power_rated_kw < 0.0 {
            errors.push(ConfigError::new("pv.power_rated_kw", "must be >= 0"));
        }
        if !(0.0..=1.0).contains(&self.pv.derating_factor) {
            errors.push(ConfigError::new(
                "pv.derating_factor",
                "must be in [0.0, 1.0]",
            ));
        }
        if self.pv.lifetime_y <= 0.0 {
            errors.push(ConfigError::new("pv.lifetime_y", "must be > 0"));
        }

        if self.wind.power_rated_kw < 0.0 {
            errors.push(ConfigError::new("wind.power_rated_kw", "must be >= 0"));
        }
        if self.wind.turbine_specific_power <= 0.0 {
            errors.push(ConfigError::new(
                "wind.turbine_specific_power",
                "must be > 0",
            ));
        }
        if self.wind.lifetime_y <= 0.0 {
            errors.push(ConfigError::new("wind.lifetime_y", "must be > 0"));
        }

        let wp = &self.wind_profile;
        if wp.mean_mps < 0.0 || wp.std_mps < 0.0 {
            errors.push(ConfigError::new("wind_profile.mean_mps", "must be >= 0"));
        }
        if !(0.0..=1.0).contains(&wp.persistence) {
            errors.push(ConfigError::new(
                "wind_profile.persistence",
                "must be in [0.0, 1.0]",
            ));
        }

        let ts = &self.timeseries;
        if ts.source != "synthetic" && ts.source != "csv" {
            errors.push(ConfigError::new(
                "timeseries.source",
                format!("must be \"synthetic\" or \"csv\", got \"{}\"", ts.source),
            ));
        }
        if ts.source == "csv" && ts.csv_path.is_none() {
            errors.push(ConfigError::new(
                "timeseries.csv_path",
                "required when timeseries.source = \"csv\"",
            ));
        }
        if ts.steps_per_day == 0 {
            errors.push(ConfigError::new("timeseries.steps_per_day", "must be > 0"));
        }
        if ts.days == 0 {
            errors.push(ConfigError::new("timeseries.days", "must be > 0"));
        }

        let irr = &self.irradiance_profile;
        if irr.sunrise_idx >= irr.sunset_idx {
            errors.push(ConfigError::new(
                "irradiance_profile.sunrise_idx",
                "must be < irradiance_profile.sunset_idx",
            ));
        }
        if ts.steps_per_day > 0 && irr.sunset_idx > ts.steps_per_day {
            errors.push(ConfigError::new(
                "irradiance_profile.sunset_idx",
                "must be <= timeseries.steps_per_day",
            ));
        }

        errors
    }

    /// Builds the microgrid described by this scenario, loading or
    /// generating the time series.
    ///
    /// # Errors
    ///
    /// Returns the first validation error, or a `ConfigError` if the
    /// CSV time series cannot be read.
    pub fn build(&self) -> Result<Microgrid, ConfigError> {
        if let Some(error) = self.validate().into_iter().next() {
            return Err(error);
        }

        let ts = &self.timeseries;
        let (load_kw, irradiance) = match ts.source.as_str() {
            "csv" => {
                // validate() guarantees the path is present
                let path = ts.csv_path.as_deref().unwrap_or(Path::new(""));
                let series = read_timeseries(path).map_err(|e| {
                    ConfigError::new("timeseries.csv_path", e.to_string())
                })?;
                (series.load_kw, series.irradiance)
            }
            _ => {
                let steps = ts.steps_per_day * ts.days;
                let lp = &self.load_profile;
                let load = profiles::synthetic_load_kw(
                    lp.base_kw,
                    lp.amp_kw,
                    lp.phase_rad,
                    lp.noise_std,
                    ts.steps_per_day,
                    steps,
                    ts.seed,
                );
                let irr = &self.irradiance_profile;
                let irradiance = profiles::synthetic_irradiance(
                    irr.sunrise_idx,
                    irr.sunset_idx,
                    irr.noise_std,
                    ts.steps_per_day,
                    steps,
                    ts.seed.wrapping_add(IRRADIANCE_SEED_OFFSET),
                );
                (load, irradiance)
            }
        };

        // The capacity factor follows the common horizon even when the
        // load and irradiance come from a CSV file.
        let capacity_factor = if self.wind.power_rated_kw > 0.0 {
            let speeds = profiles::synthetic_wind_speed(
                self.wind_profile.mean_mps,
                self.wind_profile.std_mps,
                self.wind_profile.persistence,
                load_kw.len(),
                ts.seed.wrapping_add(WIND_SEED_OFFSET),
            );
            // generic power curve: Cp 0.5, cut-out 25 m/s
            WindPower::capacity_from_wind(&speeds, self.wind.turbine_specific_power, 0.5, 25.0, 3.0)
        } else {
            Vec::new()
        };

        let g = &self.generator;
        let b = &self.battery;
        let pv = &self.pv;
        let w = &self.wind;
        Ok(Microgrid {
            project: Project {
                lifetime_y: self.project.lifetime_y,
                discount_rate: self.project.discount_rate,
                timestep_h: self.project.timestep_h,
                currency: self.project.currency.clone(),
            },
            load_kw,
            generator: DispatchableGenerator {
                power_rated_kw: g.power_rated_kw,
                fuel_intercept: g.fuel_intercept,
                fuel_slope: g.fuel_slope,
                fuel_price: g.fuel_price,
                investment_price: g.investment_price,
                om_price_hours: g.om_price_hours,
                lifetime_hours: g.lifetime_hours,
                ..DispatchableGenerator::default()
            },
            battery: Battery {
                energy_rated_kwh: b.energy_rated_kwh,
                investment_price: b.investment_price,
                om_price: b.om_price,
                lifetime_calendar_y: b.lifetime_calendar_y,
                lifetime_cycles: b.lifetime_cycles,
                charge_rate_max: b.charge_rate_max,
                discharge_rate_max: b.discharge_rate_max,
                loss_factor: b.loss_factor,
                soc_min: b.soc_min,
                soc_ini: b.soc_ini,
                ..Battery::default()
            },
            pv: Photovoltaic {
                power_rated_kw: pv.power_rated_kw,
                derating_factor: pv.derating_factor,
                investment_price: pv.investment_price,
                om_price: pv.om_price,
                lifetime_y: pv.lifetime_y,
                irradiance,
                ..Photovoltaic::default()
            },
            wind: WindPower {
                power_rated_kw: w.power_rated_kw,
                investment_price: w.investment_price,
                om_price: w.om_price,
                lifetime_y: w.lifetime_y,
                capacity_factor,
                ..WindPower::default()
            },
        })
    }
}
