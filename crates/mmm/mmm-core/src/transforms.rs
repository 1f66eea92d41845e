//! Media response transforms
//!
//! Carryover (geometric adstock), diminishing returns (saturation) and
//! mean-centring. These are applied to raw activity columns before the
//! regression is fitted.

use mmm_api::MediaChannelConfig;
use mmm_spi::{MmmError, ObservationTable, Result};
use tracing::debug;

/// Suffix of columns produced by [`mean_scaling`].
pub const SCALED_SUFFIX: &str = "_scaled";

/// Geometric adstock.
///
/// `out[0] = series[0]`, `out[i] = alpha * out[i-1] + series[i]`.
///
/// `alpha` in `[0, 1)` models decaying memory. Larger values are accepted
/// but grow without bound.
pub fn geometric_adstock(series: &[f64], alpha: f64) -> Result<Vec<f64>> {
    if series.is_empty() {
        return Err(MmmError::invalid_argument("series", "must not be empty"));
    }

    let mut out = Vec::with_capacity(series.len());
    let mut carry = 0.0;
    for (i, &x) in series.iter().enumerate() {
        carry = if i == 0 { x } else { alpha * carry + x };
        out.push(carry);
    }
    Ok(out)
}

/// Saturation curve for a single value: `(1 - e^{-λx}) / (1 + e^{-λx})`.
///
/// Evaluated as `tanh(λx / 2)`, which is the same function and stays finite
/// for large `|λx|`.
pub fn saturation_value(x: f64, lambda: f64) -> f64 {
    (0.5 * lambda * x).tanh()
}

/// Elementwise saturation.
///
/// Results lie in `(-1, 1)` and `saturation(0, λ) == 0`. Non-positive
/// `lambda` flattens or inverts the curve; that is left to the caller.
pub fn saturation(x: &[f64], lambda: f64) -> Vec<f64> {
    x.iter().map(|&v| saturation_value(v, lambda)).collect()
}

/// Centre each named column on its mean.
///
/// Returns a new table with one extra column `<name>_scaled` per input name.
/// The source table is left untouched.
pub fn mean_scaling(table: &ObservationTable, variable_names: &[&str]) -> Result<ObservationTable> {
    table.require_columns(variable_names.iter().copied())?;

    let mut scaled = table.clone();
    for name in variable_names {
        let mean = table.mean(name)?;
        let centred: Vec<f64> = table.column(name)?.iter().map(|v| v - mean).collect();
        scaled = scaled.with_column(format!("{}{}", name, SCALED_SUFFIX), centred)?;
    }
    Ok(scaled)
}

/// Adstock then saturate one channel's source column.
pub fn transform_channel(table: &ObservationTable, channel: &MediaChannelConfig) -> Result<Vec<f64>> {
    let source = table.column(&channel.source_column)?;
    let adstocked = geometric_adstock(source, channel.adstock.alpha)?;
    Ok(saturation(&adstocked, channel.saturation.lambda))
}

/// Append the transformed column of every channel to a copy of the table.
pub fn apply_media_transforms(
    table: &ObservationTable,
    channels: &[MediaChannelConfig],
) -> Result<ObservationTable> {
    table.require_columns(channels.iter().map(|c| c.source_column.as_str()))?;

    let mut transformed = table.clone();
    for channel in channels {
        let values = transform_channel(table, channel)?;
        debug!(
            channel = %channel.name,
            alpha = channel.adstock.alpha,
            lambda = channel.saturation.lambda,
            "applied media transforms"
        );
        transformed = transformed.with_column(channel.name.clone(), values)?;
    }
    Ok(transformed)
}
