//! Shared builders for integration tests.

use microgrid_sim::components::{
    Battery, DispatchableGenerator, Microgrid, Photovoltaic, Project, WindPower,
};
use microgrid_sim::profiles;

/// One-year project framing with hourly steps.
pub fn default_project() -> Project {
    Project::default()
}

/// Constant load series (kW).
pub fn constant_load(kw: f64, steps: usize) -> Vec<f64> {
    vec![kw; steps]
}

/// Noise-free daily load: sinusoid around `base_kw` with `amp_kw`
/// amplitude.
pub fn daily_load(base_kw: f64, amp_kw: f64, steps: usize) -> Vec<f64> {
    profiles::synthetic_load_kw(base_kw, amp_kw, 2.88, 0.0, 24, steps, 0)
}

/// Noise-free daily irradiance: half-sine daylight between 6h and 19h.
pub fn daily_irradiance(steps: usize) -> Vec<f64> {
    profiles::synthetic_irradiance(6, 19, 0.0, 24, steps, 0)
}

/// Microgrid with the given ratings and the default island economics.
pub fn microgrid(
    load_kw: Vec<f64>,
    irradiance: Vec<f64>,
    gen_rated_kw: f64,
    battery_rated_kwh: f64,
    pv_rated_kw: f64,
) -> Microgrid {
    Microgrid {
        project: default_project(),
        load_kw,
        generator: DispatchableGenerator {
            power_rated_kw: gen_rated_kw,
            fuel_intercept: 0.0,
            fuel_slope: 0.24,
            fuel_price: 1.0,
            investment_price: 400.0,
            om_price_hours: 0.02,
            lifetime_hours: 15_000.0,
            ..DispatchableGenerator::default()
        },
        battery: Battery {
            energy_rated_kwh: battery_rated_kwh,
            investment_price: 350.0,
            om_price: 10.0,
            lifetime_calendar_y: 15.0,
            lifetime_cycles: 3000.0,
            loss_factor: 0.05,
            ..Battery::default()
        },
        pv: Photovoltaic {
            power_rated_kw: pv_rated_kw,
            derating_factor: 1.0,
            investment_price: 1200.0,
            om_price: 20.0,
            lifetime_y: 25.0,
            irradiance,
            ..Photovoltaic::default()
        },
        wind: WindPower::default(),
    }
}

/// Wind plant with the given rating, a constant capacity factor, and
/// the default island economics.
pub fn wind(rated_kw: f64, capacity_factor: f64, steps: usize) -> WindPower {
    WindPower {
        power_rated_kw: rated_kw,
        capacity_factor: vec![capacity_factor; steps],
        investment_price: 3000.0,
        om_price: 60.0,
        lifetime_y: 25.0,
        ..WindPower::default()
    }
}
