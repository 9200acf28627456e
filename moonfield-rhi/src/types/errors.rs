use thiserror::Error;

/// Error type for parsing Feature from string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid feature string")]
pub struct FeatureParseError;

/// Result codes returned by every fallible core operation.
///
/// The core never panics on caller-supplied input; every failure mode that
/// can arise from bad arguments, resource exhaustion, or a collaborator
/// (Slang, a backend) reporting trouble is represented here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RhiError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("feature not available: {0}")]
    NotAvailable(String),

    #[error("out of memory")]
    OutOfMemory,

    #[error("shader compilation failed: {0}")]
    CompilationFailure(String),

    #[error("object already finalized")]
    AlreadyFinalized,

    #[error("backend error: {0}")]
    BackendError(String),

    #[error("operation timed out")]
    Timeout,

    #[error("resource not found")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<FeatureParseError> for RhiError {
    fn from(_: FeatureParseError) -> Self {
        RhiError::InvalidArgument("unrecognized feature name".into())
    }
}
