//! Seeded synthetic weekly dataset.
//!
//! Three years of weekly observations with two media channels, a trend,
//! yearly seasonality and a one-off event. The outcome is built from the
//! transformed media so a correctly specified model recovers the configured
//! coefficients. Used as a fixture by tests, examples and benches.

use mmm_api::{MediaChannelConfig, ModelConfig, SyntheticDataConfig};
use mmm_spi::{MmmError, ObservationTable, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

use crate::transforms::{geometric_adstock, saturation};

/// Week index of the one-off event (the ninth of June in the first year).
const EVENT_WEEK: usize = 22;
/// Day of year of the first observation (the first Monday of the year).
const FIRST_DAY_OF_YEAR: usize = 6;

/// Generate the dataset described by `config`.
///
/// Columns: `day_of_year`, `x1`, `x2`, `x1_media_cost`, `x2_media_cost`,
/// `trend`, `seasonality`, `event_1`, `y`.
pub fn generate(config: &SyntheticDataConfig) -> Result<ObservationTable> {
    let n = config.n_weeks;
    if n == 0 {
        return Err(MmmError::invalid_argument("n_weeks", "must be positive"));
    }
    if !(config.noise_std.is_finite() && config.noise_std >= 0.0) {
        return Err(MmmError::invalid_argument(
            "noise_std",
            "must be finite and non-negative",
        ));
    }
    let cost_dist = normal("media_cost", 1.0, 0.5)?;
    let noise_dist = normal("noise_std", 0.0, config.noise_std)?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let x1: Vec<f64> = (0..n)
        .map(|_| {
            let u: f64 = rng.gen();
            if u > 0.9 {
                u
            } else {
                u / 2.0
            }
        })
        .collect();
    let x2: Vec<f64> = (0..n)
        .map(|_| {
            let u: f64 = rng.gen();
            if u > 0.8 {
                u
            } else {
                0.0
            }
        })
        .collect();
    let x1_cost: Vec<f64> = (0..n).map(|_| cost_dist.sample(&mut rng)).collect();
    let x2_cost: Vec<f64> = (0..n).map(|_| cost_dist.sample(&mut rng)).collect();
    let epsilon: Vec<f64> = (0..n).map(|_| noise_dist.sample(&mut rng)).collect();

    let x1_sat = saturation(
        &geometric_adstock(&x1, config.x1_adstock.alpha)?,
        config.x1_saturation.lambda,
    );
    let x2_sat = saturation(
        &geometric_adstock(&x2, config.x2_adstock.alpha)?,
        config.x2_saturation.lambda,
    );

    let day_of_year: Vec<f64> = (0..n)
        .map(|i| ((FIRST_DAY_OF_YEAR - 1 + 7 * i) % 365 + 1) as f64)
        .collect();
    let step = if n > 1 { 50.0 / (n - 1) as f64 } else { 0.0 };
    let trend: Vec<f64> = (0..n)
        .map(|i| (step * i as f64 + 10.0).powf(0.25) - 1.0)
        .collect();
    let seasonality: Vec<f64> = day_of_year
        .iter()
        .map(|doy| {
            let cs = -(2.0 * 2.0 * PI * doy / 365.5).sin();
            let cc = (2.0 * PI * doy / 365.5).cos();
            0.5 * (cs + cc)
        })
        .collect();
    let event: Vec<f64> = (0..n).map(|i| if i == EVENT_WEEK { 1.0 } else { 0.0 }).collect();

    let y: Vec<f64> = (0..n)
        .map(|i| {
            config.intercept
                + trend[i]
                + seasonality[i]
                + config.beta_event * event[i]
                + config.beta_1 * x1_sat[i]
                + config.beta_2 * x2_sat[i]
                + epsilon[i]
        })
        .collect();

    ObservationTable::from_columns(vec![
        ("day_of_year", day_of_year),
        ("x1", x1),
        ("x2", x2),
        ("x1_media_cost", x1_cost),
        ("x2_media_cost", x2_cost),
        ("trend", trend),
        ("seasonality", seasonality),
        ("event_1", event),
        ("y", y),
    ])
}

/// Model specification matching the generating process of `config`.
pub fn model_config(config: &SyntheticDataConfig) -> ModelConfig {
    ModelConfig::new("y")
        .with_media(
            MediaChannelConfig::new("x1_sat", "x1")
                .with_adstock(config.x1_adstock.alpha)
                .with_saturation(config.x1_saturation.lambda)
                .with_cost_column("x1_media_cost"),
        )
        .with_media(
            MediaChannelConfig::new("x2_sat", "x2")
                .with_adstock(config.x2_adstock.alpha)
                .with_saturation(config.x2_saturation.lambda)
                .with_cost_column("x2_media_cost"),
        )
        .with_control("trend")
        .with_control("seasonality")
        .with_control("event_1")
}

fn normal(name: &str, mean: f64, std_dev: f64) -> Result<Normal<f64>> {
    Normal::new(mean, std_dev).map_err(|e| MmmError::invalid_argument(name, e.to_string()))
}
