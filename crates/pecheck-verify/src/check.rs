//! The partial equivalence check.

use pecheck_dd::{BuildOptions, Package};
use pecheck_ir::Circuit;
use tracing::debug;

use crate::align::align_qubits;
use crate::error::{VerifyError, VerifyResult};
use crate::zero_ancilla::zero_ancilla_partial_equivalence_check;

/// Which branch of the check produced the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckPath {
    /// Data or measured qubit counts differ; rejected without building.
    DimensionMismatch,
    /// Neither circuit has ancillae; composed with the inverse.
    ZeroAncilla,
    /// Measured qubits were aligned, then both unitaries compared.
    Aligned {
        /// Swaps inserted into each circuit.
        swaps: usize,
    },
}

impl std::fmt::Display for CheckPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckPath::DimensionMismatch => write!(f, "dimension mismatch"),
            CheckPath::ZeroAncilla => write!(f, "zero-ancilla"),
            CheckPath::Aligned { swaps } => write!(f, "aligned ({swaps} swaps)"),
        }
    }
}

/// Verdict of a check together with the path that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Whether the circuits are partially equivalent.
    pub equivalent: bool,
    /// How the verdict was reached.
    pub path: CheckPath,
}

/// Check whether two circuits agree on every measured output for every
/// input, ignoring garbage outputs.
///
/// The circuits are consumed; pass clones to keep the originals.
pub fn partial_equivalence_check(
    c1: Circuit,
    c2: Circuit,
    package: &mut Package,
) -> VerifyResult<bool> {
    partial_equivalence_check_with_report(c1, c2, package).map(|outcome| outcome.equivalent)
}

/// Like [`partial_equivalence_check`], also reporting the path taken.
///
/// # Errors
///
/// Returns [`VerifyError::InvalidInput`] when neither circuit has ancillae
/// but their garbage masks differ, or when a circuit with ancillae does not
/// keep them on the trailing indices `[d, n)`.
pub fn partial_equivalence_check_with_report(
    mut c1: Circuit,
    mut c2: Circuit,
    package: &mut Package,
) -> VerifyResult<CheckOutcome> {
    let (d1, d2) = (
        c1.num_qubits_without_ancillae(),
        c2.num_qubits_without_ancillae(),
    );
    let (m1, m2) = (c1.num_measured_qubits(), c2.num_measured_qubits());

    if d1 != d2 || m1 != m2 {
        debug!(d1, d2, m1, m2, "data or measured qubit counts differ");
        return Ok(CheckOutcome {
            equivalent: false,
            path: CheckPath::DimensionMismatch,
        });
    }

    let (n1, n2) = (c1.num_qubits(), c2.num_qubits());
    if d1 == n1 && d2 == n2 {
        let equivalent = zero_ancilla_partial_equivalence_check(&c1, &c2, package)?;
        return Ok(CheckOutcome {
            equivalent,
            path: CheckPath::ZeroAncilla,
        });
    }

    check_ancilla_layout(&c1, "first")?;
    check_ancilla_layout(&c2, "second")?;

    let garbage = c1.garbage().to_vec();
    let shared = n1.min(n2);
    if let Some(qubit) = (shared..n1).find(|&i| !garbage[i]) {
        return Err(VerifyError::InvalidInput(format!(
            "measured qubit {qubit} of the first circuit lies beyond the {shared} qubits both circuits share"
        )));
    }

    let swaps = align_qubits(&mut c1, &mut c2, &garbage, m1)?;
    debug!(swaps, n1, n2, d = d1, m = m1, "aligned measured qubits");

    let options = BuildOptions::with_width(n1.max(n2));
    let u1 = package.build_functionality(&c1, options)?;
    let u2 = package.build_functionality(&c2, options)?;
    let equivalent = package.partial_equivalence_check(u1, u2, d1, m1)?;

    Ok(CheckOutcome {
        equivalent,
        path: CheckPath::Aligned { swaps },
    })
}

/// Ancillae must occupy exactly the indices `[d, n)`.
fn check_ancilla_layout(circuit: &Circuit, which: &str) -> VerifyResult<()> {
    let d = circuit.num_qubits_without_ancillae();
    let misplaced = circuit
        .ancillary()
        .iter()
        .enumerate()
        .find(|&(i, &ancilla)| ancilla != (i >= d));

    match misplaced {
        Some((qubit, _)) => Err(VerifyError::InvalidInput(format!(
            "{which} circuit: ancillae must occupy qubits {d}..{}, but qubit {qubit} breaks this",
            circuit.num_qubits()
        ))),
        None => Ok(()),
    }
}
