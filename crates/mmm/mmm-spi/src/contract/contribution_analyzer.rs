//! Contribution attribution trait.

use crate::error::Result;
use crate::model::{ContributionMap, CostMap, Decomposition};

/// Turns fitted coefficients back into per-variable contributions.
pub trait ContributionAnalyzer: Send + Sync {
    /// Coefficient-scaled series for every coefficient key.
    fn decomposition(&self) -> Result<Decomposition>;

    /// Time-sum of each decomposition series.
    fn contribution_to_volume(&self, decomposition: &Decomposition) -> ContributionMap;

    /// Share of each media variable in the signed media total.
    fn rel_contribution_to_volume(
        &self,
        media_variables: &[&str],
        contribution: &ContributionMap,
    ) -> Result<ContributionMap>;

    /// Contribution per unit cost for each media variable.
    fn roi(
        &self,
        contribution: &ContributionMap,
        media_variables: &[&str],
        costs: &CostMap,
    ) -> Result<ContributionMap>;
}
