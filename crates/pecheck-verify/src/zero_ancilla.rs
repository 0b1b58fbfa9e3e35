//! Equivalence of circuits without ancillae.

use pecheck_dd::{BuildOptions, Package};
use pecheck_ir::Circuit;
use tracing::debug;

use crate::error::{VerifyError, VerifyResult};

/// Absolute tolerance for the closeness-to-identity test.
pub const IDENTITY_TOLERANCE: f64 = 1e-10;

/// Check two equally sized circuits with identical garbage masks.
///
/// Builds the unitary of `c2⁻¹` followed by `c1` and accepts when it is the
/// identity on every measured qubit, up to global phase and an arbitrary
/// unitary on the garbage qubits. Both inputs are left untouched.
pub fn zero_ancilla_partial_equivalence_check(
    c1: &Circuit,
    c2: &Circuit,
    package: &mut Package,
) -> VerifyResult<bool> {
    if c1.num_qubits() != c2.num_qubits() {
        return Err(VerifyError::InvalidInput(format!(
            "circuits have {} and {} qubits",
            c1.num_qubits(),
            c2.num_qubits()
        )));
    }
    if c1.garbage() != c2.garbage() {
        return Err(VerifyError::InvalidInput(
            "circuits have different garbage qubits".into(),
        ));
    }

    let mut composite = c2.to_inverse();
    composite.append(c1)?;

    let u = package.build_functionality(&composite, BuildOptions::default())?;
    let equivalent = package.is_close_to_identity(u, IDENTITY_TOLERANCE, c1.garbage());

    debug!(
        qubits = c1.num_qubits(),
        garbage = c1.num_garbage(),
        equivalent,
        "zero-ancilla check"
    );
    Ok(equivalent)
}
