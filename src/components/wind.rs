//! Wind power model driven by a capacity factor time series.

/// Air density at 15 °C (kg/m³).
const AIR_DENSITY: f64 = 1.225;

/// A wind power plant whose output follows a capacity factor series.
///
/// The capacity factor is the normalized power in [0, 1], so production
/// at step `k` is `power_rated_kw * capacity_factor[k]`. Use
/// [`WindPower::capacity_from_wind`] to derive the series from wind
/// speeds.
#[derive(Debug, Clone)]
pub struct WindPower {
    /// Rated power (kW).
    pub power_rated_kw: f64,
    /// Capacity factor (normalized power) per step, in [0, 1].
    pub capacity_factor: Vec<f64>,

    /// Initial investment price ($/kW).
    pub investment_price: f64,
    /// Operation & maintenance price ($/kW/y).
    pub om_price: f64,
    /// Lifetime (y).
    pub lifetime_y: f64,

    /// Replacement price, as a fraction of the investment price.
    pub replacement_price_ratio: f64,
    /// Salvage price, as a fraction of the investment price.
    pub salvage_price_ratio: f64,
}

impl Default for WindPower {
    fn default() -> Self {
        Self {
            power_rated_kw: 0.0,
            capacity_factor: Vec::new(),
            investment_price: 0.0,
            om_price: 0.0,
            lifetime_y: 25.0,
            replacement_price_ratio: 1.0,
            salvage_price_ratio: 1.0,
        }
    }
}

impl WindPower {
    /// Production potential time series (kW), one value per step.
    pub fn production(&self) -> Vec<f64> {
        self.capacity_factor
            .iter()
            .map(|cf| self.power_rated_kw * cf)
            .collect()
    }

    /// Capacity factor of a wind turbine from a wind speed series (m/s),
    /// using a generic parametrized power curve.
    ///
    /// A fixed power coefficient `cp` applies below rated power, with a
    /// smooth LogSumExp saturation at 1.0 tuned by `alpha` (higher means
    /// a sharper transition). Output is zero above the cut-out speed
    /// `v_out_mps`.
    ///
    /// # Arguments
    ///
    /// * `speeds_mps` - Wind speed series (m/s)
    /// * `tsp_w_m2` - Turbine specific power (W/m²), typically 200 to 400
    /// * `cp` - Power coefficient, below the Betz limit of 16/27
    /// * `v_out_mps` - Cut-out wind speed (m/s)
    /// * `alpha` - Saturation sharpness
    pub fn capacity_from_wind(
        speeds_mps: &[f64],
        tsp_w_m2: f64,
        cp: f64,
        v_out_mps: f64,
        alpha: f64,
    ) -> Vec<f64> {
        speeds_mps
            .iter()
            .map(|&v| {
                if v > v_out_mps {
                    return 0.0;
                }
                let cf = 0.5 * cp * AIR_DENSITY / tsp_w_m2 * v.powi(3);
                // smooth min(cf, 1) via LogSumExp
                let cf = -((-alpha).exp() + (-alpha * cf).exp()).ln() / alpha;
                cf.max(0.0)
            })
            .collect()
    }
}
