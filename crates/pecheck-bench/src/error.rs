//! Error types for benchmark generation.

use pecheck_ir::IrError;
use thiserror::Error;

/// Errors that can occur while generating benchmarks.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BenchError {
    /// Requested qubit counts are inconsistent.
    #[error("Invalid benchmark parameters: {0}")]
    InvalidParameters(String),

    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for benchmark generation.
pub type BenchResult<T> = Result<T, BenchError>;
