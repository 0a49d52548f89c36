//! Shared simulation types.

use std::fmt;

/// Complete record of one simulated step.
///
/// Storage power uses the generator convention (positive=discharge,
/// negative=charge); `energy_stored_kwh` is the stored energy after the
/// step's storage dynamics have been applied.
#[derive(Debug, Clone)]
pub struct StepRecord {
    /// Step index.
    pub step: usize,
    /// Simulation time (h).
    pub time_h: f64,
    /// Desired load (kW).
    pub load_kw: f64,
    /// PV production potential (kW).
    pub pv_potential_kw: f64,
    /// Wind production potential (kW).
    pub wind_potential_kw: f64,
    /// Requested net load, load minus the renewable potential (kW).
    pub net_load_kw: f64,
    /// Generator power (kW, >= 0).
    pub gen_kw: f64,
    /// Storage power (kW; positive=discharge, negative=charge).
    pub storage_kw: f64,
    /// Stored energy after this step (kWh).
    pub energy_stored_kwh: f64,
    /// Spilled renewable power (kW, >= 0).
    pub spilled_kw: f64,
    /// Shed load power (kW, >= 0).
    pub shed_kw: f64,
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "k={:>5} ({:>8.1}h) | load={:>8.1} kW  pv={:>8.1}  wind={:>8.1} kW | \
             gen={:>8.1}  sto={:>8.1} (E={:>9.1} kWh) | \
             spill={:>7.1}  shed={:>7.1}",
            self.step,
            self.time_h,
            self.load_kw,
            self.pv_potential_kw,
            self.wind_potential_kw,
            self.gen_kw,
            self.storage_kw,
            self.energy_stored_kwh,
            self.spilled_kw,
            self.shed_kw,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_record_display_does_not_panic() {
        let r = StepRecord {
            step: 12,
            time_h: 12.0,
            load_kw: 1850.0,
            pv_potential_kw: 2400.0,
            wind_potential_kw: 0.0,
            net_load_kw: -550.0,
            gen_kw: 0.0,
            storage_kw: -550.0,
            energy_stored_kwh: 4100.0,
            spilled_kw: 0.0,
            shed_kw: 0.0,
        };
        let s = format!("{r}");
        assert!(s.contains("k=   12"));
    }
}
