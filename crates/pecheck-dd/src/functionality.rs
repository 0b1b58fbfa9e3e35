//! Building the unitary of a circuit.

use pecheck_ir::{Circuit, QubitId, StandardGate};
use tracing::debug;

use crate::edge::Edge;
use crate::error::{DdError, DdResult};
use crate::matrix::GateMatrix;
use crate::package::Package;

/// Options for [`Package::build_functionality`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Build into a diagram this wide instead of the circuit's own width.
    /// Extra high qubits carry the identity.
    pub width: Option<usize>,
}

impl BuildOptions {
    /// Options padding the diagram to `width` qubits.
    pub fn with_width(width: usize) -> Self {
        Self { width: Some(width) }
    }
}

/// A single-target gate with zero or more |1⟩ controls.
#[derive(Debug, Clone, PartialEq)]
struct ControlledOp {
    matrix: GateMatrix,
    controls: Vec<usize>,
    target: usize,
}

impl ControlledOp {
    fn single(matrix: GateMatrix, target: QubitId) -> Self {
        Self {
            matrix,
            controls: vec![],
            target: target.index(),
        }
    }

    fn controlled(matrix: GateMatrix, controls: &[QubitId], target: QubitId) -> Self {
        Self {
            matrix,
            controls: controls.iter().map(|q| q.index()).collect(),
            target: target.index(),
        }
    }

    fn cx(control: QubitId, target: QubitId) -> Self {
        Self::controlled(GateMatrix::x(), &[control], target)
    }
}

/// Lower a gate to single-target controlled operations in application order.
///
/// `qubits` lists controls first and the target last, with the arity the
/// circuit builder already checked.
fn decompose(gate: &StandardGate, qubits: &[QubitId]) -> Vec<ControlledOp> {
    let single = |matrix| vec![ControlledOp::single(matrix, qubits[0])];
    let controlled = |matrix| vec![ControlledOp::controlled(matrix, &qubits[..1], qubits[1])];

    match *gate {
        StandardGate::I => single(GateMatrix::identity()),
        StandardGate::X => single(GateMatrix::x()),
        StandardGate::Y => single(GateMatrix::y()),
        StandardGate::Z => single(GateMatrix::z()),
        StandardGate::H => single(GateMatrix::h()),
        StandardGate::S => single(GateMatrix::s()),
        StandardGate::Sdg => single(GateMatrix::sdg()),
        StandardGate::T => single(GateMatrix::t()),
        StandardGate::Tdg => single(GateMatrix::tdg()),
        StandardGate::SX => single(GateMatrix::sx()),
        StandardGate::SXdg => single(GateMatrix::sxdg()),
        StandardGate::Rx(theta) => single(GateMatrix::rx(theta)),
        StandardGate::Ry(theta) => single(GateMatrix::ry(theta)),
        StandardGate::Rz(theta) => single(GateMatrix::rz(theta)),
        StandardGate::P(lambda) => single(GateMatrix::p(lambda)),
        StandardGate::U(theta, phi, lambda) => single(GateMatrix::u(theta, phi, lambda)),

        StandardGate::CX => controlled(GateMatrix::x()),
        StandardGate::CY => controlled(GateMatrix::y()),
        StandardGate::CZ => controlled(GateMatrix::z()),
        StandardGate::CH => controlled(GateMatrix::h()),
        StandardGate::CRx(theta) => controlled(GateMatrix::rx(theta)),
        StandardGate::CRy(theta) => controlled(GateMatrix::ry(theta)),
        StandardGate::CRz(theta) => controlled(GateMatrix::rz(theta)),
        StandardGate::CP(lambda) => controlled(GateMatrix::p(lambda)),
        StandardGate::Swap => {
            let (a, b) = (qubits[0], qubits[1]);
            vec![
                ControlledOp::cx(a, b),
                ControlledOp::cx(b, a),
                ControlledOp::cx(a, b),
            ]
        }

        StandardGate::CCX => vec![ControlledOp::controlled(
            GateMatrix::x(),
            &qubits[..2],
            qubits[2],
        )],
        StandardGate::CSwap => {
            let (c, t1, t2) = (qubits[0], qubits[1], qubits[2]);
            vec![
                ControlledOp::cx(t2, t1),
                ControlledOp::controlled(GateMatrix::x(), &[c, t1], t2),
                ControlledOp::cx(t2, t1),
            ]
        }
    }
}

impl Package {
    /// Build the unitary `U = G_k ⋯ G_1` of a circuit.
    ///
    /// Barriers are skipped. Construction is exact: no gate is dropped or
    /// approximated.
    pub fn build_functionality(
        &mut self,
        circuit: &Circuit,
        options: BuildOptions,
    ) -> DdResult<Edge> {
        let n = circuit.num_qubits();
        let width = options.width.unwrap_or(n);
        if width < n {
            return Err(DdError::WidthTooSmall { circuit: n, width });
        }

        let mut unitary = self.identity(width);
        for inst in circuit {
            let Some(gate) = inst.as_gate() else {
                continue;
            };
            for op in decompose(gate, &inst.qubits) {
                let gate_dd = self.make_gate_dd(op.matrix, &op.controls, op.target, width)?;
                unitary = self.multiply(gate_dd, unitary);
            }
        }

        debug!(
            circuit = circuit.name(),
            gates = circuit.num_gates(),
            width,
            nodes = self.node_count(),
            "built functionality"
        );
        Ok(unitary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_arity() {
        let q = [QubitId(0), QubitId(1), QubitId(2)];
        assert_eq!(decompose(&StandardGate::H, &q[..1]).len(), 1);
        assert_eq!(decompose(&StandardGate::Swap, &q[..2]).len(), 3);
        assert_eq!(decompose(&StandardGate::CSwap, &q).len(), 3);

        let ccx = decompose(&StandardGate::CCX, &q);
        assert_eq!(ccx[0].controls, vec![0, 1]);
        assert_eq!(ccx[0].target, 2);
    }

    #[test]
    fn test_empty_circuit_is_identity() {
        let mut package = Package::default();
        let circuit = Circuit::with_size("empty", 3);
        let u = package
            .build_functionality(&circuit, BuildOptions::default())
            .unwrap();
        assert_eq!(u, package.identity(3));
    }

    #[test]
    fn test_padding() {
        let mut package = Package::default();
        let mut circuit = Circuit::with_size("x", 1);
        circuit.x(QubitId(0)).unwrap();

        let u = package
            .build_functionality(&circuit, BuildOptions::with_width(3))
            .unwrap();
        assert_eq!(package.num_levels(u), 3);

        assert!(matches!(
            package.build_functionality(&Circuit::with_size("wide", 4), BuildOptions::with_width(2)),
            Err(DdError::WidthTooSmall { circuit: 4, width: 2 })
        ));
    }

    #[test]
    fn test_barrier_is_ignored() {
        let mut package = Package::default();
        let mut circuit = Circuit::with_size("b", 2);
        circuit.barrier([QubitId(0), QubitId(1)]).unwrap();
        let u = package
            .build_functionality(&circuit, BuildOptions::default())
            .unwrap();
        assert_eq!(u, package.identity(2));
    }
}
