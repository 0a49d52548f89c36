//! Battery energy storage model (including AC/DC converter).

/// Battery energy storage with linear losses.
///
/// Storage dynamics is `E(k+1) = E(k) − (P + α·|P|)·Δt`.
///
/// # Power Convention (Generator)
/// Storage power is positive when discharging (supplying the load) and
/// negative when charging.
#[derive(Debug, Clone)]
pub struct Battery {
    /// Rated energy capacity (kWh).
    pub energy_rated_kwh: f64,

    /// Initial investment price ($/kWh).
    pub investment_price: f64,
    /// Operation & maintenance price ($/kWh/y).
    pub om_price: f64,
    /// Calendar lifetime (y).
    pub lifetime_calendar_y: f64,
    /// Maximum number of cycles over life.
    pub lifetime_cycles: f64,

    /// Max charge power per kWh rated (kW/kWh = 1/h).
    pub charge_rate_max: f64,
    /// Max discharge power per kWh rated (kW/kWh = 1/h).
    pub discharge_rate_max: f64,
    /// Linear loss factor α (round-trip efficiency is about 1 − 2α).
    pub loss_factor: f64,
    /// Minimum state of charge, as a fraction of capacity (0.0 to 1.0).
    pub soc_min: f64,
    /// Initial state of charge, as a fraction of capacity (0.0 to 1.0).
    pub soc_ini: f64,

    /// Replacement price, as a fraction of the investment price.
    pub replacement_price_ratio: f64,
    /// Salvage price, as a fraction of the investment price.
    pub salvage_price_ratio: f64,
}

impl Default for Battery {
    fn default() -> Self {
        Self {
            energy_rated_kwh: 0.0,
            investment_price: 0.0,
            om_price: 0.0,
            lifetime_calendar_y: 15.0,
            lifetime_cycles: 3000.0,
            charge_rate_max: 1.0,
            discharge_rate_max: 1.0,
            loss_factor: 0.05,
            soc_min: 0.0,
            soc_ini: 0.0,
            replacement_price_ratio: 1.0,
            salvage_price_ratio: 1.0,
        }
    }
}

impl Battery {
    /// Minimum stored energy (kWh).
    pub fn energy_min_kwh(&self) -> f64 {
        self.soc_min * self.energy_rated_kwh
    }

    /// Initial stored energy (kWh).
    pub fn energy_ini_kwh(&self) -> f64 {
        self.soc_ini * self.energy_rated_kwh
    }

    /// Rated discharge power limit (kW, >= 0).
    pub fn power_discharge_max_kw(&self) -> f64 {
        self.discharge_rate_max * self.energy_rated_kwh
    }

    /// Rated charge power limit (kW, <= 0 in generator convention).
    pub fn power_charge_max_kw(&self) -> f64 {
        -self.charge_rate_max * self.energy_rated_kwh
    }

    /// Per-step storage power bounds `(charge_max, discharge_max)` given
    /// the current stored energy (kWh) and timestep (h).
    ///
    /// Combines the rated rate limits with the energy headroom so that
    /// one step of charging cannot overfill the battery nor one step of
    /// discharging empty it below the minimum, losses included.
    /// `charge_max <= 0 <= discharge_max`.
    pub fn power_bounds_kw(&self, stored_kwh: f64, timestep_h: f64) -> (f64, f64) {
        let headroom_charge =
            -(self.energy_rated_kwh - stored_kwh) / ((1.0 - self.loss_factor) * timestep_h);
        let headroom_discharge =
            (stored_kwh - self.energy_min_kwh()) / ((1.0 + self.loss_factor) * timestep_h);
        let charge_max = headroom_charge.max(self.power_charge_max_kw());
        let discharge_max = headroom_discharge.min(self.power_discharge_max_kw());
        (charge_max, discharge_max)
    }

    /// Stored energy (kWh) after one step at power `power_kw`.
    ///
    /// Losses are charged on the battery side both ways:
    /// `E' = E − (P + α·|P|)·Δt`.
    pub fn apply_kwh(&self, stored_kwh: f64, power_kw: f64, timestep_h: f64) -> f64 {
        stored_kwh - (power_kw + self.loss_factor * power_kw.abs()) * timestep_h
    }

    /// Effective lifetime (y) given yearly cycling.
    ///
    /// The calendar lifetime caps the cycling lifetime; a zero-capacity
    /// or idle battery ages on the calendar alone.
    pub fn lifetime_y(&self, cycles_per_y: f64) -> f64 {
        if self.energy_rated_kwh == 0.0 || cycles_per_y <= 0.0 || !cycles_per_y.is_finite() {
            self.lifetime_calendar_y
        } else {
            self.lifetime_calendar_y.min(self.lifetime_cycles / cycles_per_y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn battery() -> Battery {
        Battery {
            energy_rated_kwh: 10.0,
            charge_rate_max: 0.5,
            discharge_rate_max: 0.5,
            loss_factor: 0.0,
            soc_min: 0.1,
            soc_ini: 0.5,
            ..Battery::default()
        }
    }

    #[test]
    fn rated_power_limits() {
        let b = battery();
        assert_relative_eq!(b.power_discharge_max_kw(), 5.0);
        assert_relative_eq!(b.power_charge_max_kw(), -5.0);
    }

    #[test]
    fn bounds_limited_by_headroom() {
        let b = battery();
        // 9 kWh stored, 1 kWh of room, 1 h step, no losses:
        // charging is capped at 1 kW, discharging at the 5 kW rate limit
        let (charge_max, discharge_max) = b.power_bounds_kw(9.0, 1.0);
        assert_relative_eq!(charge_max, -1.0);
        assert_relative_eq!(discharge_max, 5.0);
    }

    #[test]
    fn bounds_respect_minimum_soc() {
        let b = battery();
        // 1.5 kWh stored, minimum is 1 kWh: only 0.5 kWh dischargeable
        let (_, discharge_max) = b.power_bounds_kw(1.5, 1.0);
        assert_relative_eq!(discharge_max, 0.5);
    }

    #[test]
    fn bounds_zero_for_zero_capacity() {
        let b = Battery::default();
        let (charge_max, discharge_max) = b.power_bounds_kw(0.0, 1.0);
        assert_eq!(charge_max, 0.0);
        assert_eq!(discharge_max, 0.0);
    }

    #[test]
    fn dynamics_with_losses() {
        let b = Battery {
            loss_factor: 0.05,
            ..battery()
        };
        // discharge 2 kW for 1 h: E drops by 2 + 0.05*2 = 2.1 kWh
        assert_relative_eq!(b.apply_kwh(5.0, 2.0, 1.0), 2.9);
        // charge 2 kW for 1 h: E rises by 2 - 0.05*2 = 1.9 kWh
        assert_relative_eq!(b.apply_kwh(5.0, -2.0, 1.0), 6.9);
    }

    #[test]
    fn lifetime_cycling_vs_calendar() {
        let b = Battery {
            lifetime_calendar_y: 15.0,
            lifetime_cycles: 3000.0,
            ..battery()
        };
        // 600 cycles/y -> 5 y of cycling life, under the 15 y calendar
        assert_relative_eq!(b.lifetime_y(600.0), 5.0);
        // 100 cycles/y -> 30 y of cycling life, calendar caps at 15 y
        assert_relative_eq!(b.lifetime_y(100.0), 15.0);
    }

    #[test]
    fn lifetime_calendar_when_idle_or_empty() {
        let b = battery();
        assert_relative_eq!(b.lifetime_y(0.0), 15.0);
        let none = Battery::default();
        assert_relative_eq!(none.lifetime_y(f64::INFINITY), 15.0);
    }
}
