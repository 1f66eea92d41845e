//! Output of a complete attribution run.

use serde::{Deserialize, Serialize};

use super::regression_result::RegressionResult;
use super::variable_map::{CoefficientMap, ContributionMap, Decomposition};

/// Everything an attribution run produces, ready for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionReport {
    pub regression: RegressionResult,
    pub coefficients: CoefficientMap,
    pub decomposition: Decomposition,
    pub contribution_to_volume: ContributionMap,
    /// Share of each media variable in the signed media total.
    pub relative_contribution: ContributionMap,
    /// Contribution per unit cost; `None` when no channel declares a cost.
    pub roi: Option<ContributionMap>,
}

impl AttributionReport {
    /// Sum of all contributions, equal to the sum of fitted values.
    pub fn total_contribution(&self) -> f64 {
        self.contribution_to_volume.total()
    }
}
