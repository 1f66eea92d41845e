//! Config-driven attribution run.
//!
//! Applies the media transforms and mean scaling declared in a
//! [`ModelConfig`], fits the regression and derives every attribution
//! metric in one pass. Any stage failure aborts the run.

use mmm_api::ModelConfig;
use mmm_spi::{AttributionReport, ContributionAnalyzer, ObservationTable, Regressor, Result};
use tracing::{debug, info};

use crate::contribution::{costs_from_spend_columns, Contributions};
use crate::regression::LinearRegression;
use crate::transforms::{apply_media_transforms, mean_scaling};

/// Attribution pipeline for one model specification.
#[derive(Debug, Clone)]
pub struct AttributionPipeline {
    config: ModelConfig,
}

impl AttributionPipeline {
    /// Create a pipeline, validating the configuration up front.
    pub fn new(config: ModelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Copy of `table` with transformed media and mean-scaled columns added.
    pub fn prepare(&self, table: &ObservationTable) -> Result<ObservationTable> {
        let transformed = apply_media_transforms(table, &self.config.media)?;
        if self.config.mean_scale.is_empty() {
            return Ok(transformed);
        }
        let names: Vec<&str> = self.config.mean_scale.iter().map(String::as_str).collect();
        mean_scaling(&transformed, &names)
    }

    /// Fit the model on `table` and compute all attribution metrics.
    pub fn run(&self, table: &ObservationTable) -> Result<AttributionReport> {
        let prepared = self.prepare(table)?;
        debug!(columns = prepared.n_columns(), rows = prepared.n_rows(), "prepared observation table");

        let mut model = LinearRegression::new(&prepared, self.config.target.as_str(), self.config.predictors())?
            .with_inference(self.config.inference)?;
        let regression = model.fit()?.clone();
        let coefficients = regression.coefficients();

        let engine = Contributions::new(&prepared, coefficients.clone());
        let decomposition = engine.decomposition()?;
        let contribution_to_volume = engine.contribution_to_volume(&decomposition);

        let media = self.config.media_names();
        let relative_contribution = engine.rel_contribution_to_volume(&media, &contribution_to_volume)?;

        let costs = costs_from_spend_columns(table, &self.config.media)?;
        let roi = if costs.is_empty() {
            None
        } else {
            Some(engine.roi(&contribution_to_volume, &media, &costs)?)
        };

        info!(
            outcome = %self.config.target,
            media = media.len(),
            r_squared = regression.r_squared,
            "attribution run complete"
        );

        Ok(AttributionReport {
            regression,
            coefficients,
            decomposition,
            contribution_to_volume,
            relative_contribution,
            roi,
        })
    }
}
