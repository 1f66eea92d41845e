//! Marketing Mix Model Core
//!
//! Implementations of the media transforms, the ordinary least squares
//! engine with approximate inference, and the contribution/attribution
//! engine.
//!
//! ## Example
//!
//! ```rust
//! use mmm_core::{synthetic, AttributionPipeline};
//! use mmm_api::SyntheticDataConfig;
//!
//! let data = SyntheticDataConfig::default();
//! let table = synthetic::generate(&data).unwrap();
//! let pipeline = AttributionPipeline::new(synthetic::model_config(&data)).unwrap();
//! let report = pipeline.run(&table).unwrap();
//! assert_eq!(report.relative_contribution.len(), 2);
//! ```

pub mod contribution;
pub mod inference;
pub mod pipeline;
pub mod regression;
pub mod synthetic;
pub mod transforms;

pub use contribution::{costs_from_spend_columns, Contributions};
pub use inference::{t_cdf_approx, two_sided_p_value};
pub use pipeline::AttributionPipeline;
pub use regression::LinearRegression;
pub use transforms::{
    apply_media_transforms, geometric_adstock, mean_scaling, saturation, saturation_value,
    transform_channel, SCALED_SUFFIX,
};
