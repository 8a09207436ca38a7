//! Error types for dataset validation, tuning and reporting.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Errors returned while loading, clustering or reporting.
#[derive(Error, Debug)]
pub enum ClusterError {
    /// Dataset has no entities or no features.
    #[error("dataset must have at least one entity and one feature")]
    EmptyDataset,

    /// Number of labels differs from the number of feature rows.
    #[error("label count ({labels}) does not match feature row count ({rows})")]
    LabelCountMismatch { labels: usize, rows: usize },

    /// A feature vector has a different length than the first one.
    #[error("feature row {row} has {found} values, expected {expected}")]
    RaggedFeatures {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A feature value is NaN or infinite.
    #[error("feature value at row {row}, column {column} is not finite")]
    NonFiniteFeature { row: usize, column: usize },

    /// Target cluster count is zero or exceeds the number of entities.
    #[error("cannot form {requested} clusters from {n_entities} entities")]
    InvalidTargetCount { requested: usize, n_entities: usize },

    /// A tuning parameter is out of range.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        name: &'static str,
        message: String,
    },

    /// The iteration cap was reached before the target count was detected.
    #[error(
        "no convergence to {target} clusters after {iterations} iterations (closest count: {closest})"
    )]
    ConvergenceFailure {
        iterations: usize,
        target: usize,
        closest: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convergence_failure_message() {
        let err = ClusterError::ConvergenceFailure {
            iterations: 200,
            target: 4,
            closest: 2,
        };
        assert_eq!(
            err.to_string(),
            "no convergence to 4 clusters after 200 iterations (closest count: 2)"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ClusterError = io.into();
        assert!(matches!(err, ClusterError::Io(_)));
    }
}
