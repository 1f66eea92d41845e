//! Data model types.

mod attribution_report;
mod observation_table;
mod regression_result;
mod variable_map;

pub use attribution_report::*;
pub use observation_table::*;
pub use regression_result::*;
pub use variable_map::*;
