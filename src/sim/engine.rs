//! Sequential operation simulation over the full horizon.

use tracing::debug;

use crate::components::Microgrid;
use crate::config::ConfigError;

use super::dispatch::dispatch;
use super::stats::OperationStats;
use super::types::StepRecord;

/// Operation simulation engine.
///
/// Holds the precomputed renewable potential and the storage state.
/// Step `k+1` depends on step `k`'s stored energy, so the loop is
/// strictly sequential; a full run is deterministic and side-effect
/// free.
pub struct Engine<'a> {
    mg: &'a Microgrid,
    pv_potential_kw: Vec<f64>,
    wind_potential_kw: Vec<f64>,
    stored_kwh: f64,
}

impl<'a> Engine<'a> {
    /// Creates an engine for the given microgrid, validating it first.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` if the description is
    /// inconsistent (mismatched series lengths, negative ratings).
    pub fn new(mg: &'a Microgrid) -> Result<Self, ConfigError> {
        if let Some(error) = mg.validate().into_iter().next() {
            return Err(error);
        }
        // validation accepts an empty wind series only for an absent
        // (zero-rated) source
        let wind_potential_kw = if mg.wind.capacity_factor.is_empty() {
            vec![0.0; mg.horizon_steps()]
        } else {
            mg.wind.production()
        };
        Ok(Self {
            mg,
            pv_potential_kw: mg.pv.production(),
            wind_potential_kw,
            stored_kwh: mg.battery.energy_ini_kwh(),
        })
    }

    /// Executes one step and returns its record.
    fn step(&mut self, k: usize) -> StepRecord {
        let mg = self.mg;
        let dt = mg.project.timestep_h;
        let load_kw = mg.load_kw[k];
        let pv_potential_kw = self.pv_potential_kw[k];
        let wind_potential_kw = self.wind_potential_kw[k];
        let net_load_kw = load_kw - pv_potential_kw - wind_potential_kw;

        let (charge_max_kw, discharge_max_kw) = mg.battery.power_bounds_kw(self.stored_kwh, dt);
        let d = dispatch(
            net_load_kw,
            charge_max_kw,
            discharge_max_kw,
            mg.generator.power_rated_kw,
        );

        // Storage dynamics; the clamp only absorbs float drift, the
        // power bounds already keep the energy inside its band.
        self.stored_kwh = mg
            .battery
            .apply_kwh(self.stored_kwh, d.storage_kw, dt)
            .clamp(mg.battery.energy_min_kwh(), mg.battery.energy_rated_kwh);

        StepRecord {
            step: k,
            time_h: k as f64 * dt,
            load_kw,
            pv_potential_kw,
            wind_potential_kw,
            net_load_kw,
            gen_kw: d.gen_kw,
            storage_kw: d.storage_kw,
            energy_stored_kwh: self.stored_kwh,
            spilled_kw: d.spilled_kw,
            shed_kw: d.shed_kw,
        }
    }

    /// Executes all steps and returns the complete record vector.
    pub fn run(&mut self) -> Vec<StepRecord> {
        let n = self.mg.horizon_steps();
        debug!(steps = n, "running operation simulation");
        let mut records = Vec::with_capacity(n);
        for k in 0..n {
            records.push(self.step(k));
        }
        records
    }
}

/// Simulates the operation of a microgrid over its full horizon.
///
/// Returns the per-step records and the aggregated operation
/// statistics.
///
/// # Errors
///
/// Returns a `ConfigError` if the microgrid description is
/// inconsistent.
pub fn simulate(mg: &Microgrid) -> Result<(Vec<StepRecord>, OperationStats), ConfigError> {
    let mut engine = Engine::new(mg)?;
    let records = engine.run();
    let stats = OperationStats::from_records(mg, &records);
    Ok((records, stats))
}
