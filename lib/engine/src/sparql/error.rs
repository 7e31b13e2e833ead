use crate::error::StorageError;
use rdf_algebra_logical::{SseParseError, ValidationError};
use rdf_algebra_model::EvalError;

/// An error that aborts the execution of a query or an update. There are no partial results.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum QueryEvaluationError {
    /// The operator tree is invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The textual form of the operator tree could not be parsed.
    #[error(transparent)]
    Parsing(#[from] SseParseError),
    /// An error from the store.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// An expression that is evaluated outside of a pattern failed.
    #[error(transparent)]
    Expression(#[from] EvalError),
    /// The operator tree is nested deeper than the configured limit.
    #[error("The evaluation exceeded the maximum depth of {0}")]
    DepthLimitExceeded(usize),
}
