//! Microgrid system description and consistency checks.

use crate::config::ConfigError;

use super::{Battery, DispatchableGenerator, Photovoltaic, WindPower};

/// Microgrid project framing: horizon, discounting, and time step.
#[derive(Debug, Clone)]
pub struct Project {
    /// Project lifetime (y).
    pub lifetime_y: u32,
    /// Discount rate, 0.0 to 1.0.
    pub discount_rate: f64,
    /// Time step (h).
    pub timestep_h: f64,
    /// Currency used in price parameters and computed costs.
    pub currency: String,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            lifetime_y: 25,
            discount_rate: 0.05,
            timestep_h: 1.0,
            currency: "$".to_string(),
        }
    }
}

/// Full microgrid system description.
///
/// The load, PV irradiance and wind capacity factor series must share
/// the same length and the project time step; the simulated horizon is
/// conventionally one year.
#[derive(Debug, Clone)]
pub struct Microgrid {
    /// Project information.
    pub project: Project,
    /// Desired load per step (kW).
    pub load_kw: Vec<f64>,
    /// Dispatchable generator.
    pub generator: DispatchableGenerator,
    /// Battery energy storage.
    pub battery: Battery,
    /// Solar photovoltaic plant.
    pub pv: Photovoltaic,
    /// Wind power plant. A zero rating with an empty capacity factor
    /// series means no wind source.
    pub wind: WindPower,
}

impl Microgrid {
    /// Validates the description and returns a list of errors.
    ///
    /// Returns an empty vector if the microgrid is consistent. The
    /// simulation entry points call this and fail fast on the first
    /// error rather than producing silently wrong indicators.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.project.timestep_h <= 0.0 {
            errors.push(ConfigError::new("project.timestep_h", "must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.project.discount_rate) {
            errors.push(ConfigError::new(
                "project.discount_rate",
                "must be in [0.0, 1.0]",
            ));
        }
        if self.project.lifetime_y == 0 {
            errors.push(ConfigError::new("project.lifetime_y", "must be >= 1"));
        }

        if self.load_kw.is_empty() {
            errors.push(ConfigError::new("load_kw", "time series must not be empty"));
        }
        if self.load_kw.len() != self.pv.irradiance.len() {
            errors.push(ConfigError::new(
                "pv.irradiance",
                format!(
                    "length {} does not match load series length {}",
                    self.pv.irradiance.len(),
                    self.load_kw.len()
                ),
            ));
        }
        if self.load_kw.iter().any(|p| !p.is_finite() || *p < 0.0) {
            errors.push(ConfigError::new(
                "load_kw",
                "values must be finite and >= 0",
            ));
        }
        if self.pv.irradiance.iter().any(|g| !g.is_finite() || *g < 0.0) {
            errors.push(ConfigError::new(
                "pv.irradiance",
                "values must be finite and >= 0",
            ));
        }

        if self.generator.power_rated_kw < 0.0 {
            errors.push(ConfigError::new("generator.power_rated_kw", "must be >= 0"));
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

        let wind = &self.wind;
        if wind.power_rated_kw < 0.0 {
            errors.push(ConfigError::new("wind.power_rated_kw", "must be >= 0"));
        }
        // an empty series only stands for "no wind source"
        let wind_absent = wind.power_rated_kw == 0.0 && wind.capacity_factor.is_empty();
        if !wind_absent && wind.capacity_factor.len() != self.load_kw.len() {
            errors.push(ConfigError::new(
                "wind.capacity_factor",
                format!(
                    "length {} does not match load series length {}",
                    wind.capacity_factor.len(),
                    self.load_kw.len()
                ),
            ));
        }
        if wind
            .capacity_factor
            .iter()
            .any(|cf| !cf.is_finite() || !(0.0..=1.0).contains(cf))
        {
            errors.push(ConfigError::new(
                "wind.capacity_factor",
                "values must be finite and in [0.0, 1.0]",
            ));
        }

        let bat = &self.battery;
        if bat.energy_rated_kwh < 0.0 {
            errors.push(ConfigError::new("battery.energy_rated_kwh", "must be >= 0"));
        }
        if bat.charge_rate_max < 0.0 || bat.discharge_rate_max < 0.0 {
            errors.push(ConfigError::new(
                "battery.charge_rate_max",
                "rate limits must be >= 0",
            ));
        }
        if !(0.0..=1.0).contains(&bat.loss_factor) {
            errors.push(ConfigError::new(
                "battery.loss_factor",
                "must be in [0.0, 1.0]",
            ));
        }
        if !(0.0..=1.0).contains(&bat.soc_min) {
            errors.push(ConfigError::new("battery.soc_min", "must be in [0.0, 1.0]"));
        }
        if !(bat.soc_min..=1.0).contains(&bat.soc_ini) {
            errors.push(ConfigError::new(
                "battery.soc_ini",
                "must be in [soc_min, 1.0]",
            ));
        }

        errors
    }

    /// Number of steps in the simulated horizon.
    pub fn horizon_steps(&self) -> usize {
        self.load_kw.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_mg() -> Microgrid {
        Microgrid {
            project: Project::default(),
            load_kw: vec![100.0; 24],
            generator: DispatchableGenerator {
                power_rated_kw: 150.0,
                ..DispatchableGenerator::default()
            },
            battery: Battery {
                energy_rated_kwh: 50.0,
                ..Battery::default()
            },
            pv: Photovoltaic {
                power_rated_kw: 80.0,
                irradiance: vec![0.5; 24],
                ..Photovoltaic::default()
            },
            wind: WindPower::default(),
        }
    }

    #[test]
    fn valid_microgrid_passes() {
        let errors = valid_mg().validate();
        assert!(errors.is_empty(), "expected no errors: {errors:?}");
    }

    #[test]
    fn mismatched_series_rejected() {
        let mut mg = valid_mg();
        mg.pv.irradiance.truncate(12);
        let errors = mg.validate();
        assert!(errors.iter().any(|e| e.field == "pv.irradiance"));
    }

    #[test]
    fn negative_rating_rejected() {
        let mut mg = valid_mg();
        mg.generator.power_rated_kw = -1.0;
        let errors = mg.validate();
        assert!(errors.iter().any(|e| e.field == "generator.power_rated_kw"));
    }

    #[test]
    fn negative_load_rejected() {
        let mut mg = valid_mg();
        mg.load_kw[3] = -0.1;
        let errors = mg.validate();
        assert!(errors.iter().any(|e| e.field == "load_kw"));
    }

    #[test]
    fn soc_ini_below_soc_min_rejected() {
        let mut mg = valid_mg();
        mg.battery.soc_min = 0.4;
        mg.battery.soc_ini = 0.2;
        let errors = mg.validate();
        assert!(errors.iter().any(|e| e.field == "battery.soc_ini"));
    }

    #[test]
    fn absent_wind_source_passes() {
        let mg = valid_mg();
        assert!(mg.wind.capacity_factor.is_empty());
        assert!(mg.validate().is_empty());
    }

    #[test]
    fn rated_wind_without_series_rejected() {
        let mut mg = valid_mg();
        mg.wind.power_rated_kw = 500.0;
        let errors = mg.validate();
        assert!(errors.iter().any(|e| e.field == "wind.capacity_factor"));
    }

    #[test]
    fn out_of_range_capacity_factor_rejected() {
        let mut mg = valid_mg();
        mg.wind.power_rated_kw = 500.0;
        mg.wind.capacity_factor = vec![0.5; 24];
        assert!(mg.validate().is_empty());
        mg.wind.capacity_factor[7] = 1.2;
        let errors = mg.validate();
        assert!(errors.iter().any(|e| e.field == "wind.capacity_factor"));
    }

    #[test]
    fn zero_timestep_rejected() {
        let mut mg = valid_mg();
        mg.project.timestep_h = 0.0;
        let errors = mg.validate();
        assert!(errors.iter().any(|e| e.field == "project.timestep_h"));
    }
}
