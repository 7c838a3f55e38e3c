//! Error types for the generation engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, GenerateError>;

/// Errors that can occur while generating infrastructure code.
///
/// Every error is terminal for the request: the engine either returns a
/// complete, internally consistent file map or no file map at all.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported cloud provider: {0}")]
    UnsupportedProvider(String),

    #[error("Internal generation failure: {0}")]
    Internal(String),
}
