//! Ordinary least squares regression with approximate inference
//!
//! Coefficients come from the normal equations `β = (XᵀX)⁻¹ Xᵀy` where `X`
//! holds the predictors in declared order plus a trailing column of ones
//! for the intercept. Standard errors, t-statistics and two-sided p-values
//! are derived from the same inverse.
//!
//! ## Example
//!
//! ```rust
//! use mmm_core::regression::LinearRegression;
//! use mmm_spi::{ObservationTable, Regressor};
//!
//! let x: Vec<f64> = (0..40).map(|i| i as f64).collect();
//! let y: Vec<f64> = x.iter().map(|v| 1.0 + 2.0 * v + (v * 0.7).sin() * 0.01).collect();
//! let table = ObservationTable::from_columns(vec![("x", x), ("y", y)]).unwrap();
//!
//! let mut model = LinearRegression::new(&table, "y", ["x"]).unwrap();
//! model.fit().unwrap();
//! let coefficients = model.get_coefficients().unwrap();
//! assert!((coefficients.get("x").unwrap() - 2.0).abs() < 1e-2);
//! ```

use std::iter;

use mmm_api::InferenceConfig;
use mmm_spi::{
    CoefficientEstimate, CoefficientMap, MmmError, ObservationTable, RegressionResult, Regressor,
    Result, INTERCEPT,
};
use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::inference::{check_degrees_of_freedom, two_sided_p_value};

/// Reciprocal condition number of `XᵀX` below which it is treated as singular.
const SINGULARITY_TOLERANCE: f64 = 1e-12;

/// Linear regression bound to an observation table.
///
/// Fits `target ~ predictors + intercept`. The table is borrowed and never
/// modified.
#[derive(Debug, Clone)]
pub struct LinearRegression<'a> {
    table: &'a ObservationTable,
    target: String,
    predictors: Vec<String>,
    inference: InferenceConfig,
    result: Option<RegressionResult>,
}

impl<'a> LinearRegression<'a> {
    /// Create an unfitted model.
    ///
    /// Predictor order is preserved and defines output order. Duplicate
    /// predictors and a predictor named `intercept` are rejected.
    pub fn new<I, S>(table: &'a ObservationTable, target: impl Into<String>, predictors: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let predictors: Vec<String> = predictors.into_iter().map(Into::into).collect();
        for (i, name) in predictors.iter().enumerate() {
            if name == INTERCEPT {
                return Err(MmmError::invalid_argument(
                    "predictors",
                    format!("'{}' is reserved for the constant term", INTERCEPT),
                ));
            }
            if predictors[..i].contains(name) {
                return Err(MmmError::invalid_argument(
                    "predictors",
                    format!("duplicate predictor '{}'", name),
                ));
            }
        }

        Ok(Self {
            table,
            target: target.into(),
            predictors,
            inference: InferenceConfig::default(),
            result: None,
        })
    }

    /// Use a stricter degrees-of-freedom bound for p-values.
    pub fn with_inference(mut self, inference: InferenceConfig) -> Result<Self> {
        inference.validate()?;
        self.inference = inference;
        Ok(self)
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn predictors(&self) -> &[String] {
        &self.predictors
    }

    /// Coefficient estimates keyed by variable name, `intercept` last.
    pub fn get_coefficients(&self) -> Result<CoefficientMap> {
        Ok(self.result()?.coefficients())
    }

    fn estimate(&self) -> Result<RegressionResult> {
        let missing = self
            .table
            .missing_columns(iter::once(self.target.as_str()).chain(self.predictors.iter().map(String::as_str)));
        if !missing.is_empty() {
            return Err(MmmError::MissingColumn(missing));
        }

        let n = self.table.n_rows();
        let k = self.predictors.len();
        if n < k + 1 {
            return Err(MmmError::InsufficientData {
                required: k + 1,
                actual: n,
            });
        }
        let degrees_of_freedom = n - k - 1;

        let columns = self
            .predictors
            .iter()
            .map(|name| self.table.column(name))
            .collect::<Result<Vec<_>>>()?;
        let x = DMatrix::from_fn(n, k + 1, |i, j| if j < k { columns[j][i] } else { 1.0 });
        let y = DVector::from_column_slice(self.table.column(&self.target)?);

        let (beta, xtx_inv_diag) = solve_normal_equations(&x, &y)?;

        let fitted = &x * &beta;
        let residuals = &y - &fitted;
        let mse = residuals.norm_squared() / n as f64;

        check_degrees_of_freedom(degrees_of_freedom, self.inference.min_degrees_of_freedom)?;

        let names = self.predictors.iter().map(String::as_str).chain(iter::once(INTERCEPT));
        let estimates = names
            .enumerate()
            .map(|(j, name)| -> Result<CoefficientEstimate> {
                let estimate = beta[j];
                let std_error = (mse * xtx_inv_diag[j]).max(0.0).sqrt();
                let t_value = t_statistic(estimate, std_error);
                let p_value =
                    two_sided_p_value(t_value, degrees_of_freedom, self.inference.min_degrees_of_freedom)?;
                Ok(CoefficientEstimate {
                    name: name.to_string(),
                    estimate,
                    std_error,
                    t_value,
                    p_value,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RegressionResult {
            estimates,
            degrees_of_freedom,
            n_observations: n,
            r_squared: r_squared(y.as_slice(), residuals.as_slice()),
            mse,
            fitted_values: fitted.as_slice().to_vec(),
            residuals: residuals.as_slice().to_vec(),
        })
    }
}

impl Regressor for LinearRegression<'_> {
    fn fit(&mut self) -> Result<&RegressionResult> {
        debug!(
            outcome = %self.target,
            predictors = self.predictors.len(),
            rows = self.table.n_rows(),
            "fitting linear regression"
        );
        let result = self.estimate()?;
        debug!(
            degrees_of_freedom = result.degrees_of_freedom,
            r_squared = result.r_squared,
            "linear regression fitted"
        );
        Ok(self.result.insert(result))
    }

    fn result(&self) -> Result<&RegressionResult> {
        self.result.as_ref().ok_or(MmmError::NotFitted)
    }

    fn coefficients(&self) -> Result<CoefficientMap> {
        self.get_coefficients()
    }

    fn summary(&self) -> Result<String> {
        let text = self.result()?.to_string();
        debug!("\n{}", text);
        Ok(text)
    }

    fn is_fitted(&self) -> bool {
        self.result.is_some()
    }
}

/// Solve the normal equations on a column-equilibrated design.
///
/// Each column of `x` is divided by its Euclidean norm before `XᵀX` is
/// formed, so the conditioning check sees collinearity rather than unit
/// scale. Returns `β` and the diagonal of `(XᵀX)⁻¹`, both in the original
/// units.
fn solve_normal_equations(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<(DVector<f64>, DVector<f64>)> {
    let norms = DVector::from_iterator(x.ncols(), x.column_iter().map(|c| c.norm()));
    if norms.iter().any(|norm| !(norm.is_finite() && *norm > 0.0)) {
        return Err(MmmError::SingularMatrix);
    }

    let mut scaled = x.clone();
    for (mut column, norm) in scaled.column_iter_mut().zip(norms.iter()) {
        column /= *norm;
    }

    let xtx_inv = invert_normal_matrix(scaled.tr_mul(&scaled))?;
    let beta = (&xtx_inv * scaled.tr_mul(y)).component_div(&norms);
    let diag = xtx_inv.diagonal().component_div(&norms.component_mul(&norms));
    Ok((beta, diag))
}

/// Invert `XᵀX`, rejecting singular and badly conditioned matrices.
fn invert_normal_matrix(xtx: DMatrix<f64>) -> Result<DMatrix<f64>> {
    let singular_values = xtx.clone().svd(false, false).singular_values;
    let max = singular_values.iter().cloned().fold(0.0, f64::max);
    let min = singular_values.iter().cloned().fold(f64::INFINITY, f64::min);
    let rcond = min / max;
    if max <= 0.0 || rcond.is_nan() || rcond < SINGULARITY_TOLERANCE {
        return Err(MmmError::SingularMatrix);
    }

    let inverse = xtx.try_inverse().ok_or(MmmError::SingularMatrix)?;
    if inverse.iter().any(|v| !v.is_finite()) {
        return Err(MmmError::SingularMatrix);
    }
    Ok(inverse)
}

fn t_statistic(estimate: f64, std_error: f64) -> f64 {
    if std_error > 0.0 {
        estimate / std_error
    } else if estimate == 0.0 {
        0.0
    } else {
        // Exact fit: zero standard error, infinitely significant.
        estimate.signum() * f64::INFINITY
    }
}

fn r_squared(y: &[f64], residuals: &[f64]) -> f64 {
    let mean = y.iter().sum::<f64>() / y.len() as f64;
    let ss_tot: f64 = y.iter().map(|v| (v - mean).powi(2)).sum();
    let ss_res: f64 = residuals.iter().map(|r| r * r).sum();
    if ss_tot > 1e-12 {
        1.0 - ss_res / ss_tot
    } else {
        1.0
    }
}
