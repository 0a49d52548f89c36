//! Solar photovoltaic plant model (including AC/DC converter).

/// A solar PV plant whose output follows an irradiance time series.
///
/// The irradiance series is normalized per kW of rated power (kW/kWp),
/// so production at step `k` is
/// `derating_factor * power_rated_kw * irradiance[k]`.
#[derive(Debug, Clone)]
pub struct Photovoltaic {
    /// Rated power (kW).
    pub power_rated_kw: f64,
    /// Normalized production potential per step (kW/kWp).
    pub irradiance: Vec<f64>,

    /// Initial investment price ($/kW).
    pub investment_price: f64,
    /// Operation & maintenance price ($/kW/y).
    pub om_price: f64,
    /// Lifetime (y).
    pub lifetime_y: f64,

    /// Derating factor (performance ratio), 0.0 to 1.0.
    pub derating_factor: f64,

    /// Replacement price, as a fraction of the investment price.
    pub replacement_price_ratio: f64,
    /// Salvage price, as a fraction of the investment price.
    pub salvage_price_ratio: f64,
}

impl Default for Photovoltaic {
    fn default() -> Self {
        Self {
            power_rated_kw: 0.0,
            irradiance: Vec::new(),
            investment_price: 0.0,
            om_price: 0.0,
            lifetime_y: 25.0,
            derating_factor: 0.9,
            replacement_price_ratio: 1.0,
            salvage_price_ratio: 1.0,
        }
    }
}

impl Photovoltaic {
    /// Production potential time series (kW), one value per step.
    pub fn production(&self) -> Vec<f64> {
        self.irradiance
            .iter()
            .map(|g| self.derating_factor * self.power_rated_kw * g)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn production_scales_with_rating_and_derating() {
        let pv = Photovoltaic {
            power_rated_kw: 1000.0,
            irradiance: vec![0.0, 0.5, 1.0],
            derating_factor: 0.9,
            ..Photovoltaic::default()
        };
        let prod = pv.production();
        assert_eq!(prod.len(), 3);
        assert_relative_eq!(prod[0], 0.0);
        assert_relative_eq!(prod[1], 450.0);
        assert_relative_eq!(prod[2], 900.0);
    }

    #[test]
    fn zero_rating_produces_nothing() {
        let pv = Photovoltaic {
            irradiance: vec![0.8, 1.0],
            ..Photovoltaic::default()
        };
        assert!(pv.production().iter().all(|&p| p == 0.0));
    }
}
