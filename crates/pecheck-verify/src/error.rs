//! Error types for equivalence checking.

use pecheck_dd::DdError;
use pecheck_ir::IrError;
use thiserror::Error;

/// Errors that can occur while checking two circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VerifyError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// Error from the decision-diagram engine.
    #[error("Decision diagram error: {0}")]
    Dd(#[from] DdError),

    /// The circuits cannot be compared as given.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for verification operations.
pub type VerifyResult<T> = Result<T, VerifyError>;
