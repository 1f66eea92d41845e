//! Trait contracts for model fitting and attribution.

mod contribution_analyzer;
mod regressor;

pub use contribution_analyzer::*;
pub use regressor::*;
