//! Regression model trait.

use crate::error::Result;
use crate::model::{CoefficientMap, RegressionResult};

/// A regression model bound to its observation table.
///
/// The model starts unfitted; a successful [`fit`](Regressor::fit) moves it
/// to the fitted state. A failed fit leaves the previous state unchanged.
pub trait Regressor: Send + Sync {
    /// Estimate the model and store the result.
    fn fit(&mut self) -> Result<&RegressionResult>;

    /// Stored fit result.
    fn result(&self) -> Result<&RegressionResult>;

    /// Coefficient estimates keyed by variable name, `intercept` included.
    fn coefficients(&self) -> Result<CoefficientMap>;

    /// Fixed-width report of estimates and inference statistics.
    fn summary(&self) -> Result<String>;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool;
}
