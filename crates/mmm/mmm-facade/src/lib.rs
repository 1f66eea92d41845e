//! Marketing Mix Model Facade
//!
//! Unified re-exports for the mmm stack:
//! - `transforms` - geometric adstock, saturation, mean scaling
//! - `regression` - OLS with standard errors, t-statistics and p-values
//! - `contribution` - decomposition, contribution-to-volume, relative share, ROI
//! - `pipeline` - config-driven attribution run
//! - `synthetic` - seeded weekly fixture dataset

// Re-export everything from SPI (traits, errors, types)
pub use mmm_spi::*;

// Re-export everything from API (configs)
pub use mmm_api::*;

// Re-export everything from Core (implementations)
pub use mmm_core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use mmm_api::{
        AdstockConfig, InferenceConfig, MediaChannelConfig, ModelConfig, SaturationConfig,
        SyntheticDataConfig,
    };
    pub use mmm_core::{
        geometric_adstock, mean_scaling, saturation, AttributionPipeline, Contributions,
        LinearRegression,
    };
    pub use mmm_spi::{
        AttributionReport, CoefficientMap, ContributionAnalyzer, ContributionMap, CostMap,
        Decomposition, MmmError, ObservationTable, RegressionResult, Regressor, Result,
        VariableMap, INTERCEPT,
    };
}
