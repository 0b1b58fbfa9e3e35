//! Partial equivalence checking of quantum circuits.
//!
//! Two circuits are partially equivalent when, for every input on their
//! data qubits (ancillae start in |0⟩), they produce the same state on the
//! measured qubits. Whatever ends up on the garbage qubits is ignored.
//!
//! [`partial_equivalence_check`] picks one of two strategies:
//!
//! - Without ancillae, [`zero_ancilla_partial_equivalence_check`] composes
//!   one circuit with the inverse of the other and tests the product for
//!   closeness to identity on the measured qubits.
//! - With ancillae, [`align_qubits`] first moves every measured output onto
//!   the indices `[0, m)` in both circuits, then both unitaries are built and
//!   compared by the decision-diagram engine.
//!
//! # Example
//!
//! ```rust
//! use pecheck_dd::Package;
//! use pecheck_ir::{Circuit, QubitId};
//! use pecheck_verify::partial_equivalence_check;
//!
//! let mut reference = Circuit::with_size("reference", 2);
//! reference.set_garbage(QubitId(1), true).unwrap();
//! reference.h(QubitId(0)).unwrap();
//!
//! // Same measured behaviour, extra scratch work on the garbage qubit.
//! let mut optimized = reference.clone();
//! optimized.x(QubitId(1)).unwrap();
//!
//! let mut package = Package::default();
//! assert!(partial_equivalence_check(reference, optimized, &mut package).unwrap());
//! ```

pub mod align;
pub mod check;
pub mod error;
pub mod scanner;
pub mod zero_ancilla;

pub use align::align_qubits;
pub use check::{
    CheckOutcome, CheckPath, partial_equivalence_check, partial_equivalence_check_with_report,
};
pub use error::{VerifyError, VerifyResult};
pub use scanner::next_garbage;
pub use zero_ancilla::{IDENTITY_TOLERANCE, zero_ancilla_partial_equivalence_check};
