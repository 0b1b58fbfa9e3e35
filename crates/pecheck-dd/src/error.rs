//! Error types for the decision-diagram engine.

use thiserror::Error;

/// Errors that can occur while building or comparing diagrams.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DdError {
    /// A gate operand lies outside the diagram width.
    #[error("Qubit {qubit} is outside the {width}-qubit diagram")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Number of levels of the diagram.
        width: usize,
    },

    /// Requested build width is smaller than the circuit.
    #[error("Cannot build a {circuit}-qubit circuit into a {width}-qubit diagram")]
    WidthTooSmall {
        /// Qubit count of the circuit.
        circuit: usize,
        /// Requested diagram width.
        width: usize,
    },

    /// Two diagrams that must span the same levels do not.
    #[error("Diagram widths differ: {left} vs {right}")]
    WidthMismatch {
        /// Width of the first diagram.
        left: usize,
        /// Width of the second diagram.
        right: usize,
    },

    /// Data or measured qubit count exceeds the diagram width.
    #[error("Invalid qubit partition: {data} data and {measured} measured qubits on {width} levels")]
    InvalidPartition {
        /// Number of data qubits.
        data: usize,
        /// Number of measured qubits.
        measured: usize,
        /// Diagram width.
        width: usize,
    },

    /// Dense export requested for a diagram that is too wide.
    #[error("Diagram with {width} qubits is too large for a dense matrix (max {max})")]
    TooLarge {
        /// Diagram width.
        width: usize,
        /// Largest width accepted.
        max: usize,
    },
}

/// Result type for decision-diagram operations.
pub type DdResult<T> = Result<T, DdError>;
