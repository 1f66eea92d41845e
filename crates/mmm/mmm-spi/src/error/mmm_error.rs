//! Marketing mix model error types.

use thiserror::Error;

/// Result type alias for marketing mix model operations.
pub type Result<T> = std::result::Result<T, MmmError>;

/// Errors raised by transforms, model fitting and attribution.
///
/// Every variant is a local validation failure: the call is rejected and
/// no engine state is modified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MmmError {
    /// One or more referenced variables are absent from the table.
    #[error("Missing column(s): {}", .0.join(", "))]
    MissingColumn(Vec<String>),

    /// Fewer observations than parameters to estimate.
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// The design matrix is not invertible.
    #[error("Singular matrix: predictors are perfectly or nearly collinear")]
    SingularMatrix,

    /// The normal approximation to the Student-t CDF is outside its valid domain.
    #[error(
        "Not supported: p-value approximation needs more than {minimum} degrees of freedom, got {degrees_of_freedom}"
    )]
    NotSupported {
        degrees_of_freedom: usize,
        minimum: usize,
    },

    /// The model must be fitted first.
    #[error("Model must be fitted before this operation")]
    NotFitted,

    /// A normalisation denominator is exactly zero.
    #[error("Degenerate aggregate: {0}")]
    DegenerateAggregate(String),

    /// No cost entry for a media variable.
    #[error("Missing cost for media variable '{0}'")]
    MissingCost(String),

    /// The cost entry for a media variable is zero.
    #[error("Cost for media variable '{0}' is zero, cannot compute ROI")]
    ZeroCost(String),

    /// Invalid argument value.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Malformed observation data.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl MmmError {
    /// Shorthand for a single missing column.
    pub fn missing_column(name: impl Into<String>) -> Self {
        MmmError::MissingColumn(vec![name.into()])
    }

    /// Shorthand for [`MmmError::InvalidArgument`].
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        MmmError::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_display_lists_all_names() {
        let error = MmmError::MissingColumn(vec!["tv".to_string(), "radio".to_string()]);
        assert_eq!(error.to_string(), "Missing column(s): tv, radio");
    }

    #[test]
    fn test_missing_column_shorthand() {
        let error = MmmError::missing_column("x1");
        assert_eq!(error, MmmError::MissingColumn(vec!["x1".to_string()]));
    }

    #[test]
    fn test_insufficient_data_display() {
        let error = MmmError::InsufficientData {
            required: 4,
            actual: 3,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient data: need at least 4 observations, got 3"
        );
    }

    #[test]
    fn test_not_supported_display() {
        let error = MmmError::NotSupported {
            degrees_of_freedom: 12,
            minimum: 30,
        };
        assert_eq!(
            error.to_string(),
            "Not supported: p-value approximation needs more than 30 degrees of freedom, got 12"
        );
    }

    #[test]
    fn test_cost_errors_name_the_variable() {
        assert!(MmmError::MissingCost("tv".to_string()).to_string().contains("'tv'"));
        assert!(MmmError::ZeroCost("radio".to_string()).to_string().contains("'radio'"));
    }

    #[test]
    fn test_invalid_argument_display() {
        let error = MmmError::invalid_argument("series", "must not be empty");
        assert_eq!(error.to_string(), "Invalid argument 'series': must not be empty");
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(MmmError::SingularMatrix);
        assert!(!error.to_string().is_empty());
    }

    #[test]
    fn test_all_error_variants_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MmmError>();
    }

    #[test]
    fn test_result_type_err() {
        let result: Result<()> = Err(MmmError::NotFitted);
        assert!(matches!(result.unwrap_err(), MmmError::NotFitted));
    }
}
