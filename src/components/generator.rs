//! Dispatchable power source (e.g. Diesel genset, gas turbine, fuel cell).

/// A dispatchable generator that covers the net load the battery cannot.
///
/// The fuel curve is affine in the produced power while the unit is ON:
/// `fuel_rate = fuel_intercept * power_rated + fuel_slope * power` (fu/h).
/// Wear is counted in operating hours, so the effective lifetime in
/// years depends on how much the unit actually runs.
#[derive(Debug, Clone)]
pub struct DispatchableGenerator {
    /// Rated power (kW).
    pub power_rated_kw: f64,
    /// Fuel curve intercept (fu/h per kW rated).
    pub fuel_intercept: f64,
    /// Fuel curve slope (fu/h per kW produced).
    pub fuel_slope: f64,

    /// Fuel price ($/fu).
    pub fuel_price: f64,
    /// Initial investment price ($/kW).
    pub investment_price: f64,
    /// Operation & maintenance price ($/kW per operating hour).
    pub om_price_hours: f64,
    /// Wear lifetime (hours of operation).
    pub lifetime_hours: f64,

    /// Replacement price, as a fraction of the investment price.
    pub replacement_price_ratio: f64,
    /// Salvage price, as a fraction of the investment price.
    pub salvage_price_ratio: f64,
    /// Fuel counting unit (the "fu" of the price and fuel curve).
    pub fuel_unit: String,
}

impl Default for DispatchableGenerator {
    fn default() -> Self {
        Self {
            power_rated_kw: 0.0,
            fuel_intercept: 0.0,
            fuel_slope: 0.0,
            fuel_price: 0.0,
            investment_price: 0.0,
            om_price_hours: 0.0,
            lifetime_hours: 15_000.0,
            replacement_price_ratio: 1.0,
            salvage_price_ratio: 1.0,
            fuel_unit: "l".to_string(),
        }
    }
}

impl DispatchableGenerator {
    /// Fuel consumption rate (fu/h) while producing `power_kw`.
    ///
    /// Returns 0.0 when the unit is OFF (`power_kw <= 0`); the intercept
    /// term only applies while running.
    pub fn fuel_rate_fu_per_h(&self, power_kw: f64) -> f64 {
        if power_kw > 0.0 {
            self.fuel_intercept * self.power_rated_kw + self.fuel_slope * power_kw
        } else {
            0.0
        }
    }

    /// Effective lifetime (y) given yearly operating hours.
    ///
    /// Infinite when the unit never runs.
    pub fn lifetime_y(&self, oper_hours_per_y: f64) -> f64 {
        if oper_hours_per_y > 0.0 {
            self.lifetime_hours / oper_hours_per_y
        } else {
            f64::INFINITY
        }
    }
}
