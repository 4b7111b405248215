//! Synthetic temperature log generation.
//!
//! Each core follows a mean-reverting random walk around a shared base
//! temperature, with a per-core offset and Gaussian noise. Readings are
//! clamped to `[MIN_TEMP, MAX_TEMP]` and rounded to 0.1°C, like a real sensor.
//! The same seed always produces the same log.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::error::AppError;
use crate::io::ingest::{TemperatureLog, reading_time};

const MIN_TEMP: f64 = 20.0;
const MAX_TEMP: f64 = 105.0;

/// Pull toward the base temperature per step.
const REVERSION: f64 = 0.15;

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub readings: usize,
    pub cores: usize,
    pub seed: u64,
    pub base_temp: f64,
    /// Standard deviation of the per-step noise (°C).
    pub volatility: f64,
    pub step_seconds: i64,
}

/// Generate a synthetic log.
pub fn generate_log(config: &SampleConfig) -> Result<TemperatureLog, AppError> {
    if config.readings == 0 || config.cores == 0 {
        return Err(AppError::new(2, "Sample readings and cores must be > 0."));
    }
    if !(config.base_temp.is_finite() && (MIN_TEMP..=MAX_TEMP).contains(&config.base_temp)) {
        return Err(AppError::new(
            2,
            format!("Base temperature must be within [{MIN_TEMP}, {MAX_TEMP}]°C."),
        ));
    }
    if config.step_seconds <= 0 {
        return Err(AppError::new(2, "Sample step must be > 0 seconds."));
    }

    let normal = Normal::new(0.0, config.volatility)
        .map_err(|e| AppError::new(2, format!("Noise distribution error: {e}")))?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let cores: Vec<Vec<f64>> = (0..config.cores)
        .map(|_| {
            let offset = rng.gen_range(-4.0..4.0);
            let target = config.base_temp + offset;
            let mut temp = target;
            (0..config.readings)
                .map(|_| {
                    temp += REVERSION * (target - temp) + normal.sample(&mut rng);
                    temp = temp.clamp(MIN_TEMP, MAX_TEMP);
                    (temp * 10.0).round() / 10.0
                })
                .collect::<Vec<f64>>()
        })
        .collect();
    let times = (0..config.readings)
        .map(|i| reading_time(i, config.step_seconds))
        .collect::<Result<Vec<i64>, AppError>>()?;

    Ok(TemperatureLog {
        step_seconds: config.step_seconds,
        times,
        cores,
        row_errors: Vec::new(),
        rows_read: config.readings,
        rows_used: config.readings,
    })
}

/// Render a log in the raw sensor format (`+61.0°C +63.0°C ...`, one line per reading).
pub fn render_raw_log(log: &TemperatureLog) -> String {
    let mut out = String::new();
    for i in 0..log.n_readings() {
        let line: Vec<String> = log.cores.iter().map(|c| format!("{:+.1}°C", c[i])).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}
