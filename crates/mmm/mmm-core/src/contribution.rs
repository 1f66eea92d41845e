//! Contribution decomposition and attribution metrics.

use mmm_api::MediaChannelConfig;
use mmm_spi::{
    CoefficientMap, ContributionAnalyzer, ContributionMap, CostMap, Decomposition, MmmError,
    ObservationTable, Result, INTERCEPT,
};

/// Attribution engine over a fitted coefficient set.
///
/// Every operation is a pure function of the table and the coefficients,
/// which are owned and never change after construction.
#[derive(Debug, Clone)]
pub struct Contributions<'a> {
    table: &'a ObservationTable,
    coefficients: CoefficientMap,
}

impl<'a> Contributions<'a> {
    pub fn new(table: &'a ObservationTable, coefficients: CoefficientMap) -> Self {
        Self {
            table,
            coefficients,
        }
    }

    pub fn coefficients(&self) -> &CoefficientMap {
        &self.coefficients
    }

    fn media_contribution(contribution: &ContributionMap, name: &str) -> Result<f64> {
        contribution
            .get(name)
            .copied()
            .ok_or_else(|| MmmError::missing_column(name))
    }

    fn require_media(contribution: &ContributionMap, media_variables: &[&str]) -> Result<()> {
        let missing: Vec<String> = media_variables
            .iter()
            .filter(|name| !contribution.contains_key(name))
            .map(|name| name.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MmmError::MissingColumn(missing))
        }
    }
}

impl ContributionAnalyzer for Contributions<'_> {
    /// The intercept is a constant series equal to its coefficient; every
    /// other key needs a same-named column.
    fn decomposition(&self) -> Result<Decomposition> {
        self.table.require_columns(self.coefficients.keys().filter(|name| *name != INTERCEPT))?;

        let n = self.table.n_rows();
        let mut decomposition = Decomposition::with_capacity(self.coefficients.len());
        for (name, &coefficient) in self.coefficients.iter() {
            let series = if name == INTERCEPT {
                vec![coefficient; n]
            } else {
                self.table.column(name)?.iter().map(|v| coefficient * v).collect()
            };
            decomposition.insert(name, series);
        }
        Ok(decomposition)
    }

    fn contribution_to_volume(&self, decomposition: &Decomposition) -> ContributionMap {
        decomposition
            .iter()
            .map(|(name, series)| (name, series.iter().sum::<f64>()))
            .collect()
    }

    fn rel_contribution_to_volume(
        &self,
        media_variables: &[&str],
        contribution: &ContributionMap,
    ) -> Result<ContributionMap> {
        Self::require_media(contribution, media_variables)?;

        // Signed total: negative contributions offset positive ones.
        let total: f64 = media_variables
            .iter()
            .map(|name| Self::media_contribution(contribution, name))
            .sum::<Result<f64>>()?;
        if total == 0.0 {
            return Err(MmmError::DegenerateAggregate(
                "total media contribution is zero".to_string(),
            ));
        }

        let mut shares = ContributionMap::with_capacity(media_variables.len());
        for name in media_variables {
            shares.insert(*name, Self::media_contribution(contribution, name)? / total);
        }
        Ok(shares)
    }

    fn roi(
        &self,
        contribution: &ContributionMap,
        media_variables: &[&str],
        costs: &CostMap,
    ) -> Result<ContributionMap> {
        let mut roi = ContributionMap::with_capacity(media_variables.len());
        for name in media_variables {
            let cost = *costs
                .get(name)
                .ok_or_else(|| MmmError::MissingCost(name.to_string()))?;
            if cost == 0.0 {
                return Err(MmmError::ZeroCost(name.to_string()));
            }
            roi.insert(*name, Self::media_contribution(contribution, name)? / cost);
        }
        Ok(roi)
    }
}

/// Total cost per channel, summed from each channel's cost column.
///
/// Channels without a cost column are skipped.
pub fn costs_from_spend_columns(table: &ObservationTable, channels: &[MediaChannelConfig]) -> Result<CostMap> {
    table.require_columns(channels.iter().filter_map(|c| c.cost_column.as_deref()))?;

    let mut costs = CostMap::with_capacity(channels.len());
    for channel in channels {
        if let Some(column) = &channel.cost_column {
            costs.insert(channel.name.clone(), table.sum(column)?);
        }
    }
    Ok(costs)
}
