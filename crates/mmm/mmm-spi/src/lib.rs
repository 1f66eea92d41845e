//! Marketing Mix Model Service Provider Interface
//!
//! Defines the error type, data model and trait contracts shared by the
//! transform library, the regression engine and the contribution engine.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::*;
pub use error::*;
pub use model::*;
