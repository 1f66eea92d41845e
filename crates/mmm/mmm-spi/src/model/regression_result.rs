//! Fitted regression output.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::variable_map::CoefficientMap;

/// Reserved variable name of the constant term.
pub const INTERCEPT: &str = "intercept";

/// Estimate and inference statistics for one variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientEstimate {
    pub name: String,
    pub estimate: f64,
    pub std_error: f64,
    pub t_value: f64,
    pub p_value: f64,
}

/// Result of an ordinary least squares fit.
///
/// `estimates` lists the predictors in declared order followed by the
/// intercept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub estimates: Vec<CoefficientEstimate>,
    /// Residual degrees of freedom (observations - predictors - 1).
    pub degrees_of_freedom: usize,
    pub n_observations: usize,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Mean squared residual.
    pub mse: f64,
    pub fitted_values: Vec<f64>,
    pub residuals: Vec<f64>,
}

impl RegressionResult {
    /// Variable names in output order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.estimates.iter().map(|e| e.name.as_str())
    }

    /// Estimate record for a variable.
    pub fn estimate(&self, name: &str) -> Option<&CoefficientEstimate> {
        self.estimates.iter().find(|e| e.name == name)
    }

    /// Point estimates keyed by variable name.
    pub fn coefficients(&self) -> CoefficientMap {
        self.estimates
            .iter()
            .map(|e| (e.name.clone(), e.estimate))
            .collect()
    }
}

/// Fixed six decimals, or scientific with a signed two-digit exponent
/// (`5.28e-04`) below 0.001.
fn format_p_value(p: f64) -> String {
    if p >= 0.001 || p.is_nan() {
        return format!("{:.6}", p);
    }
    let formatted = format!("{:.2e}", p);
    match formatted
        .split_once('e')
        .and_then(|(mantissa, exp)| exp.parse::<i32>().ok().map(|exp| (mantissa, exp)))
    {
        Some((mantissa, exp)) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        None => formatted,
    }
}

impl fmt::Display for RegressionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy = "=".repeat(80);
        let light = "-".repeat(80);

        writeln!(f, "Linear Regression Results:")?;
        writeln!(f, "{}", heavy)?;
        writeln!(
            f,
            "{:<15} {:<12} {:<12} {:<10} {:<10}",
            "Variable", "Coefficient", "Std Error", "t-value", "p-value"
        )?;
        writeln!(f, "{}", light)?;
        for e in &self.estimates {
            writeln!(
                f,
                "{:<15} {:<12.6} {:<12.6} {:<10.6} {:<10}",
                e.name,
                e.estimate,
                e.std_error,
                e.t_value,
                format_p_value(e.p_value)
            )?;
        }
        writeln!(f, "{}", heavy)?;
        writeln!(f, "Degrees of Freedom: {}", self.degrees_of_freedom)?;
        write!(f, "Number of Observations: {}", self.n_observations)
    }
}
