//! Approximate significance testing.

use std::f64::consts::PI;

use mmm_spi::{MmmError, Result};

/// Normal-style approximation to the Student-t CDF.
///
/// `0.5 * (1 + sign(t) * sqrt(1 - exp(-2 t^2 / pi)))`. Only meaningful when
/// `degrees_of_freedom > min_degrees_of_freedom`; below that the call fails
/// with [`MmmError::NotSupported`].
pub fn t_cdf_approx(t: f64, degrees_of_freedom: usize, min_degrees_of_freedom: usize) -> Result<f64> {
    check_degrees_of_freedom(degrees_of_freedom, min_degrees_of_freedom)?;
    Ok(cdf(t))
}

/// Two-sided p-value `2 * (1 - F(|t|))`, clamped to `[0, 1]`.
pub fn two_sided_p_value(t: f64, degrees_of_freedom: usize, min_degrees_of_freedom: usize) -> Result<f64> {
    check_degrees_of_freedom(degrees_of_freedom, min_degrees_of_freedom)?;
    Ok((2.0 * (1.0 - cdf(t.abs()))).clamp(0.0, 1.0))
}

pub(crate) fn check_degrees_of_freedom(degrees_of_freedom: usize, minimum: usize) -> Result<()> {
    if degrees_of_freedom <= minimum {
        return Err(MmmError::NotSupported {
            degrees_of_freedom,
            minimum,
        });
    }
    Ok(())
}

fn cdf(t: f64) -> f64 {
    if t == 0.0 {
        return 0.5;
    }
    let tail = (1.0 - (-2.0 * t * t / PI).exp()).sqrt();
    0.5 * (1.0 + t.signum() * tail)
}
