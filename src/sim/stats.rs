//! Post-hoc aggregation of operation statistics from step records.

use std::fmt;

use crate::components::Microgrid;

use super::types::StepRecord;

/// Aggregated statistics over the simulated operation.
///
/// Computed post-hoc from the complete step record vector so that the
/// reported figures always agree with the trajectories. Yearly units
/// assume the simulated horizon is one year. `shed_rate`,
/// `storage_cycles` and `renew_rate` are NaN when their denominator is
/// zero; `spilled_rate` is infinite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationStats {
    /// Energy actually served to the load (kWh/y).
    pub served_energy: f64,
    /// Shed energy, not served to the load (kWh/y).
    pub shed_energy: f64,
    /// Maximum load shedding power (kW).
    pub shed_max: f64,
    /// Cumulated duration of load shedding (h/y).
    pub shed_hours: f64,
    /// Maximum consecutive duration of load shedding (h).
    pub shed_duration_max: f64,
    /// Ratio of shed energy to the desired load.
    pub shed_rate: f64,

    /// Energy supplied by the dispatchable generator (kWh/y).
    pub gen_energy: f64,
    /// Cumulated operating hours of the generator (h/y).
    pub gen_hours: f64,
    /// Fuel consumption (fu/y).
    pub gen_fuel: f64,

    /// Storage cycling (cycles/y).
    pub storage_cycles: f64,
    /// Energy charged into the storage (kWh/y).
    pub storage_char_energy: f64,
    /// Energy discharged out of the storage (kWh/y).
    pub storage_dis_energy: f64,
    /// Energy lost in the storage (kWh/y).
    pub storage_loss_energy: f64,

    /// Spilled renewable energy (kWh/y).
    pub spilled_energy: f64,
    /// Maximum spilled power (kW).
    pub spilled_max: f64,
    /// Ratio of spilled energy to the renewable potential.
    pub spilled_rate: f64,
    /// Renewable potential energy, absent spillage (kWh/y).
    pub renew_potential_energy: f64,
    /// Renewable energy actually used, net of spillage (kWh/y).
    pub renew_energy: f64,
    /// Share of served energy not supplied by the generator.
    pub renew_rate: f64,
}

impl OperationStats {
    /// Aggregates statistics from a complete simulation run.
    pub fn from_records(mg: &Microgrid, records: &[StepRecord]) -> Self {
        let dt = mg.project.timestep_h;
        let mut st = Self::default();

        // duration of the load-shedding event in progress (h)
        let mut shed_duration = 0.0_f64;

        for r in records {
            st.shed_energy += r.shed_kw * dt;
            st.shed_max = st.shed_max.max(r.shed_kw);
            if r.shed_kw > 0.0 {
                st.shed_hours += dt;
                shed_duration += dt;
                st.shed_duration_max = st.shed_duration_max.max(shed_duration);
            } else {
                shed_duration = 0.0;
            }

            if r.gen_kw > 0.0 {
                st.gen_energy += r.gen_kw * dt;
                st.gen_hours += dt;
                st.gen_fuel += mg.generator.fuel_rate_fu_per_h(r.gen_kw) * dt;
            }

            if r.storage_kw > 0.0 {
                st.storage_dis_energy += r.storage_kw * dt;
            } else {
                st.storage_char_energy -= r.storage_kw * dt;
            }

            st.spilled_energy += r.spilled_kw * dt;
            st.spilled_max = st.spilled_max.max(r.spilled_kw);
            st.renew_potential_energy += (r.pv_potential_kw + r.wind_potential_kw) * dt;
        }

        let load_energy: f64 = mg.load_kw.iter().sum::<f64>() * dt;
        st.served_energy = load_energy - st.shed_energy;
        st.shed_rate = if load_energy != 0.0 {
            st.shed_energy / load_energy
        } else {
            f64::NAN
        };

        let energy_ini = mg.battery.energy_ini_kwh();
        let energy_end = records
            .last()
            .map_or(energy_ini, |r| r.energy_stored_kwh);
        st.storage_loss_energy =
            st.storage_char_energy - st.storage_dis_energy - (energy_end - energy_ini);
        let throughput = st.storage_char_energy + st.storage_dis_energy;
        st.storage_cycles = if mg.battery.energy_rated_kwh != 0.0 {
            throughput / (2.0 * mg.battery.energy_rated_kwh)
        } else {
            f64::NAN
        };

        st.renew_energy = st.renew_potential_energy - st.spilled_energy;
        st.renew_rate = if st.served_energy != 0.0 {
            1.0 - st.gen_energy / st.served_energy
        } else {
            f64::NAN
        };
        st.spilled_rate = if st.renew_potential_energy != 0.0 {
            st.spilled_energy / st.renew_potential_energy
        } else {
            f64::INFINITY
        };

        st
    }
}

impl fmt::Display for OperationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Operation statistics ---")?;
        writeln!(
            f,
            "Served energy:     {:>12.1} kWh/y  (shed {:.1} kWh/y, {:.2}% of load)",
            self.served_energy,
            self.shed_energy,
            self.shed_rate * 100.0
        )?;
        writeln!(
            f,
            "Load shedding:     {:>12.1} h/y    (max {:.1} kW, longest event {:.1} h)",
            self.shed_hours, self.shed_max, self.shed_duration_max
        )?;
        writeln!(
            f,
            "Generator:         {:>12.1} kWh/y  ({:.1} h/y, fuel {:.1} fu/y)",
            self.gen_energy, self.gen_hours, self.gen_fuel
        )?;
        writeln!(
            f,
            "Storage:           {:>12.1} cycles/y (charged {:.1}, discharged {:.1}, lost {:.1} kWh/y)",
            self.storage_cycles,
            self.storage_char_energy,
            self.storage_dis_energy,
            self.storage_loss_energy
        )?;
        write!(
            f,
            "Renewables:        {:>12.1} kWh/y used of {:.1} potential (spilled {:.1} kWh/y, {:.2}%)",
            self.renew_energy,
            self.renew_potential_energy,
            self.spilled_energy,
            self.spilled_rate * 100.0
        )
    }
}
