//! Marketing Mix Model API
//!
//! Configuration types for media transforms, model specification,
//! inference and synthetic fixtures.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use mmm_spi::{
    AttributionReport, CoefficientEstimate, CoefficientMap, ContributionMap, CostMap,
    Decomposition, MmmError, ObservationTable, RegressionResult, Result, VariableMap, INTERCEPT,
};

/// Smallest residual degrees of freedom for which the p-value approximation
/// is accepted (exclusive bound).
pub const MIN_DEGREES_OF_FREEDOM: usize = 30;

// ============================================================================
// Media Transform Configuration
// ============================================================================

/// Geometric adstock configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdstockConfig {
    /// Carryover rate; values in `[0, 1)` give decaying memory.
    pub alpha: f64,
}

impl AdstockConfig {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }
}

impl Default for AdstockConfig {
    fn default() -> Self {
        Self { alpha: 0.5 }
    }
}

/// Saturation curve configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaturationConfig {
    /// Curve steepness; non-positive values flatten or invert the curve.
    pub lambda: f64,
}

impl SaturationConfig {
    pub fn new(lambda: f64) -> Self {
        Self { lambda }
    }
}

impl Default for SaturationConfig {
    fn default() -> Self {
        Self { lambda: 1.0 }
    }
}

/// One media channel: raw spend column in, transformed predictor column out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaChannelConfig {
    /// Name of the transformed column and of the model predictor.
    pub name: String,
    /// Raw activity column the transforms are applied to.
    pub source_column: String,
    #[serde(default)]
    pub adstock: AdstockConfig,
    #[serde(default)]
    pub saturation: SaturationConfig,
    /// Column whose sum is the channel's total cost.
    #[serde(default)]
    pub cost_column: Option<String>,
}

impl MediaChannelConfig {
    pub fn new(name: impl Into<String>, source_column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_column: source_column.into(),
            adstock: AdstockConfig::default(),
            saturation: SaturationConfig::default(),
            cost_column: None,
        }
    }

    pub fn with_adstock(mut self, alpha: f64) -> Self {
        self.adstock = AdstockConfig::new(alpha);
        self
    }

    pub fn with_saturation(mut self, lambda: f64) -> Self {
        self.saturation = SaturationConfig::new(lambda);
        self
    }

    pub fn with_cost_column(mut self, cost_column: impl Into<String>) -> Self {
        self.cost_column = Some(cost_column.into());
        self
    }
}

// ============================================================================
// Model Configuration
// ============================================================================

/// Statistical inference configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Degrees of freedom must exceed this value for p-values to be computed.
    pub min_degrees_of_freedom: usize,
}

impl InferenceConfig {
    pub fn new(min_degrees_of_freedom: usize) -> Self {
        Self {
            min_degrees_of_freedom,
        }
    }

    /// The approximation is only valid above 30 degrees of freedom, so a
    /// lower bound is rejected.
    pub fn validate(&self) -> Result<()> {
        if self.min_degrees_of_freedom < MIN_DEGREES_OF_FREEDOM {
            return Err(MmmError::invalid_argument(
                "min_degrees_of_freedom",
                format!("must be at least {}", MIN_DEGREES_OF_FREEDOM),
            ));
        }
        Ok(())
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            min_degrees_of_freedom: MIN_DEGREES_OF_FREEDOM,
        }
    }
}

/// Full model specification for an attribution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Outcome column.
    pub target: String,
    /// Media channels, in predictor order.
    #[serde(default)]
    pub media: Vec<MediaChannelConfig>,
    /// Non-media predictors (trend, seasonality, events), after the media.
    #[serde(default)]
    pub controls: Vec<String>,
    /// Columns to mean-centre before fitting (adds `<name>_scaled` columns).
    #[serde(default)]
    pub mean_scale: Vec<String>,
    #[serde(default)]
    pub inference: InferenceConfig,
}

impl ModelConfig {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            media: Vec::new(),
            controls: Vec::new(),
            mean_scale: Vec::new(),
            inference: InferenceConfig::default(),
        }
    }

    pub fn with_media(mut self, channel: MediaChannelConfig) -> Self {
        self.media.push(channel);
        self
    }

    pub fn with_control(mut self, name: impl Into<String>) -> Self {
        self.controls.push(name.into());
        self
    }

    pub fn with_mean_scaling(mut self, name: impl Into<String>) -> Self {
        self.mean_scale.push(name.into());
        self
    }

    /// Media channel names.
    pub fn media_names(&self) -> Vec<&str> {
        self.media.iter().map(|m| m.name.as_str()).collect()
    }

    /// Regression predictors: media channels followed by controls.
    pub fn predictors(&self) -> Vec<String> {
        self.media
            .iter()
            .map(|m| m.name.clone())
            .chain(self.controls.iter().cloned())
            .collect()
    }

    /// Check structural consistency before any data is touched.
    pub fn validate(&self) -> Result<()> {
        if self.target.is_empty() {
            return Err(MmmError::invalid_argument("target", "must not be empty"));
        }
        if self.media.is_empty() {
            return Err(MmmError::invalid_argument(
                "media",
                "at least one media channel is required",
            ));
        }
        let predictors = self.predictors();
        for (i, name) in predictors.iter().enumerate() {
            if predictors[..i].contains(name) {
                return Err(MmmError::invalid_argument(
                    "predictors",
                    format!("duplicate predictor '{}'", name),
                ));
            }
        }
        self.inference.validate()
    }
}

// ============================================================================
// Synthetic Fixture Configuration
// ============================================================================

/// Parameters of the seeded weekly synthetic dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticDataConfig {
    pub seed: u64,
    pub n_weeks: usize,
    pub intercept: f64,
    pub beta_1: f64,
    pub beta_2: f64,
    pub beta_event: f64,
    /// Standard deviation of the outcome noise; zero gives an exact model.
    pub noise_std: f64,
    pub x1_adstock: AdstockConfig,
    pub x2_adstock: AdstockConfig,
    pub x1_saturation: SaturationConfig,
    pub x2_saturation: SaturationConfig,
}

impl SyntheticDataConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn with_noise(mut self, noise_std: f64) -> Self {
        self.noise_std = noise_std;
        self
    }
}

impl Default for SyntheticDataConfig {
    fn default() -> Self {
        Self {
            seed: 73815,
            n_weeks: 156,
            intercept: 2.0,
            beta_1: 3.0,
            beta_2: 2.0,
            beta_event: 1.5,
            noise_std: 1.0,
            x1_adstock: AdstockConfig::new(0.4),
            x2_adstock: AdstockConfig::new(0.2),
            x1_saturation: SaturationConfig::new(2.0),
            x2_saturation: SaturationConfig::new(5.0),
        }
    }
}
