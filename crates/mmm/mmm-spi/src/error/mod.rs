//! Error types for marketing mix model operations
//!
//! This module provides the [`MmmError`] enum and [`Result`] type alias
//! used by every transform, regression and attribution operation.

mod mmm_error;

pub use mmm_error::{MmmError, Result};
