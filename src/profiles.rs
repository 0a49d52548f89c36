//! Synthetic load and irradiance profile generation.
//!
//! Used by the built-in presets and by scenarios without a CSV time
//! series. All profiles are seeded, so a given configuration always
//! produces the same series.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Gaussian noise via the Box-Muller transform.
///
/// Returns a draw from N(0, `std_dev`²), or 0.0 when `std_dev <= 0`.
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}

/// Synthetic daily load profile: baseline plus a sinusoidal daily
/// pattern plus Gaussian noise, clamped non-negative.
///
/// # Arguments
///
/// * `base_kw` - Baseline consumption (kW)
/// * `amp_kw` - Sinusoidal amplitude (kW)
/// * `phase_rad` - Phase offset (radians)
/// * `noise_std` - Gaussian noise standard deviation (kW)
/// * `steps_per_day` - Steps per simulated day (must be > 0)
/// * `steps` - Total series length
/// * `seed` - RNG seed
pub fn synthetic_load_kw(
    base_kw: f64,
    amp_kw: f64,
    phase_rad: f64,
    noise_std: f64,
    steps_per_day: usize,
    steps: usize,
    seed: u64,
) -> Vec<f64> {
    let spd = steps_per_day.max(1);
    let mut rng = StdRng::seed_from_u64(seed);
    (0..steps)
        .map(|k| {
            let day_pos = (k % spd) as f64 / spd as f64;
            let angle = 2.0 * std::f64::consts::PI * day_pos + phase_rad;
            let kw = base_kw + amp_kw * angle.sin() + gaussian_noise(&mut rng, noise_std);
            kw.max(0.0)
        })
        .collect()
}

/// Synthetic normalized irradiance profile (kW/kWp): half-sine daylight
/// window between sunrise and sunset with multiplicative noise, zero at
/// night, clamped to [0, 1].
///
/// # Arguments
///
/// * `sunrise_idx` - Daylight window start within the day (inclusive)
/// * `sunset_idx` - Daylight window end within the day (exclusive)
/// * `noise_std` - Multiplicative noise standard deviation
/// * `steps_per_day` - Steps per simulated day (must be > 0)
/// * `steps` - Total series length
/// * `seed` - RNG seed
pub fn synthetic_irradiance(
    sunrise_idx: usize,
    sunset_idx: usize,
    noise_std: f64,
    steps_per_day: usize,
    steps: usize,
    seed: u64,
) -> Vec<f64> {
    let spd = steps_per_day.max(1);
    let mut rng = StdRng::seed_from_u64(seed);
    (0..steps)
        .map(|k| {
            let day_idx = k % spd;
            let frac = daylight_frac(day_idx, sunrise_idx, sunset_idx);
            if frac <= 0.0 {
                return 0.0;
            }
            let noisy = frac * (1.0 + gaussian_noise(&mut rng, noise_std));
            noisy.clamp(0.0, 1.0)
        })
        .collect()
}

/// Synthetic wind speed profile (m/s): mean speed plus an AR(1)
/// fluctuation so that wind fronts persist across steps, clamped
/// non-negative.
///
/// The fluctuation evolves as `x(k) = persistence * x(k-1) + epsilon`
/// with Gaussian innovations; `persistence` is clamped to [0, 1].
///
/// # Arguments
///
/// * `mean_mps` - Mean wind speed (m/s)
/// * `std_mps` - Innovation standard deviation (m/s)
/// * `persistence` - AR(1) coefficient (0.0 = uncorrelated)
/// * `steps` - Total series length
/// * `seed` - RNG seed
pub fn synthetic_wind_speed(
    mean_mps: f64,
    std_mps: f64,
    persistence: f64,
    steps: usize,
    seed: u64,
) -> Vec<f64> {
    let persistence = persistence.clamp(0.0, 1.0);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut fluctuation = 0.0_f64;
    (0..steps)
        .map(|_| {
            fluctuation = persistence * fluctuation + gaussian_noise(&mut rng, std_mps);
            (mean_mps + fluctuation).max(0.0)
        })
        .collect()
}

/// Half-sine daylight fraction for one step within the day: 0.0 at the
/// window edges, 1.0 at solar noon, 0.0 outside the window.
pub fn daylight_frac(day_idx: usize, sunrise_idx: usize, sunset_idx: usize) -> f64 {
    if sunrise_idx >= sunset_idx || day_idx < sunrise_idx || day_idx >= sunset_idx {
        return 0.0;
    }
    let span = (sunset_idx - sunrise_idx) as f64;
    let pos = (day_idx - sunrise_idx) as f64 + 0.5;
    (std::f64::consts::PI * pos / span).sin().max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn load_profile_is_non_negative_and_seeded() {
        let a = synthetic_load_kw(1.0, 0.8, 0.0, 0.3, 24, 48, 7);
        let b = synthetic_load_kw(1.0, 0.8, 0.0, 0.3, 24, 48, 7);
        assert_eq!(a.len(), 48);
        assert_eq!(a, b);
        assert!(a.iter().all(|&kw| kw >= 0.0));
    }

    #[test]
    fn load_profile_without_noise_is_a_pure_sinusoid() {
        let p = synthetic_load_kw(10.0, 2.0, 0.0, 0.0, 4, 4, 0);
        assert_relative_eq!(p[0], 10.0);
        assert_relative_eq!(p[1], 12.0);
        assert_relative_eq!(p[2], 10.0, epsilon = 1e-9);
        assert_relative_eq!(p[3], 8.0);
    }

    #[test]
    fn irradiance_is_zero_at_night() {
        let g = synthetic_irradiance(6, 18, 0.0, 24, 24, 0);
        for (k, &v) in g.iter().enumerate() {
            if !(6..18).contains(&k) {
                assert_eq!(v, 0.0, "expected night at k={k}");
            } else {
                assert!(v > 0.0, "expected daylight at k={k}");
            }
        }
    }

    #[test]
    fn irradiance_peaks_at_solar_noon() {
        let g = synthetic_irradiance(6, 18, 0.0, 24, 24, 0);
        let noon = daylight_frac(12, 6, 18);
        assert!(noon > 0.96);
        // symmetric around the middle of the window
        assert_relative_eq!(g[8], g[15], epsilon = 1e-9);
    }

    #[test]
    fn irradiance_stays_normalized_with_noise() {
        let g = synthetic_irradiance(5, 19, 0.4, 24, 24 * 30, 3);
        assert!(g.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn wind_speed_is_seeded_and_non_negative() {
        let a = synthetic_wind_speed(8.0, 2.0, 0.7, 24 * 7, 5);
        let b = synthetic_wind_speed(8.0, 2.0, 0.7, 24 * 7, 5);
        assert_eq!(a, b);
        assert!(a.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn wind_speed_without_noise_is_the_mean() {
        let v = synthetic_wind_speed(8.0, 0.0, 0.7, 24, 0);
        assert!(v.iter().all(|&s| s == 8.0));
    }

    #[test]
    fn zero_std_noise_is_zero() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(gaussian_noise(&mut rng, 0.0), 0.0);
        assert_eq!(gaussian_noise(&mut rng, -1.0), 0.0);
    }
}
