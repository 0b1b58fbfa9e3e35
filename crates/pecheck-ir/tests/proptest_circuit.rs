//! Property-based tests for circuit inversion and JSON persistence.

use pecheck_ir::{Circuit, QubitId, StandardGate};
use proptest::prelude::*;

/// Generate a random circuit with 1-5 qubits, 0-12 gates and random
/// garbage/ancilla flags.
fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (1_u32..=5).prop_flat_map(|num_qubits| {
        (
            Just(num_qubits),
            prop::collection::vec(arb_gate_op(num_qubits), 0..=12),
            prop::collection::vec(any::<bool>(), num_qubits as usize),
            prop::collection::vec(any::<bool>(), num_qubits as usize),
        )
            .prop_map(|(nq, ops, garbage, ancillary)| {
                let mut circuit = Circuit::with_size("prop", nq);
                for op in ops {
                    op.apply(&mut circuit);
                }
                for (i, (&g, &a)) in garbage.iter().zip(&ancillary).enumerate() {
                    let q = QubitId(i as u32);
                    let _ = circuit.set_garbage(q, g);
                    let _ = circuit.set_ancillary(q, a);
                }
                circuit
            })
    })
}

#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    S(u32),
    T(u32),
    Rz(f64, u32),
    U(f64, f64, f64, u32),
    CX(u32, u32),
    CP(f64, u32, u32),
}

impl GateOp {
    fn apply(self, circuit: &mut Circuit) {
        // Operand clashes are rejected by the builder; ignore them here.
        match self {
            GateOp::H(q) => {
                let _ = circuit.h(QubitId(q));
            }
            GateOp::S(q) => {
                let _ = circuit.s(QubitId(q));
            }
            GateOp::T(q) => {
                let _ = circuit.t(QubitId(q));
            }
            GateOp::Rz(theta, q) => {
                let _ = circuit.rz(theta, QubitId(q));
            }
            GateOp::U(theta, phi, lambda, q) => {
                let _ = circuit.u(theta, phi, lambda, QubitId(q));
            }
            GateOp::CX(c, t) => {
                let _ = circuit.cx(QubitId(c), QubitId(t));
            }
            GateOp::CP(theta, c, t) => {
                let _ = circuit.cp(theta, QubitId(c), QubitId(t));
            }
        }
    }
}

fn arb_gate_op(num_qubits: u32) -> impl Strategy<Value = GateOp> {
    let angle = -3.2_f64..3.2;
    prop_oneof![
        (0..num_qubits).prop_map(GateOp::H),
        (0..num_qubits).prop_map(GateOp::S),
        (0..num_qubits).prop_map(GateOp::T),
        (angle.clone(), 0..num_qubits).prop_map(|(a, q)| GateOp::Rz(a, q)),
        (angle.clone(), angle.clone(), angle.clone(), 0..num_qubits)
            .prop_map(|(a, b, c, q)| GateOp::U(a, b, c, q)),
        (0..num_qubits, 0..num_qubits).prop_map(|(c, t)| GateOp::CX(c, t)),
        (angle, 0..num_qubits, 0..num_qubits).prop_map(|(a, c, t)| GateOp::CP(a, c, t)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Inverting twice gives back the original circuit.
    #[test]
    fn invert_is_involution(circuit in arb_circuit()) {
        let mut twice = circuit.clone();
        twice.invert();
        twice.invert();
        prop_assert_eq!(twice, circuit);
    }

    /// Inversion keeps the gate count and both role masks.
    #[test]
    fn invert_preserves_shape(circuit in arb_circuit()) {
        let inverse = circuit.to_inverse();
        prop_assert_eq!(inverse.num_gates(), circuit.num_gates());
        prop_assert_eq!(inverse.garbage(), circuit.garbage());
        prop_assert_eq!(inverse.ancillary(), circuit.ancillary());
        prop_assert_eq!(inverse.depth(), circuit.depth());
    }

    /// The inverse lists the inverted gates in reverse order.
    #[test]
    fn invert_reverses_gates(circuit in arb_circuit()) {
        let inverse = circuit.to_inverse();
        let forward: Vec<StandardGate> =
            circuit.iter().filter_map(|i| i.as_gate().copied()).collect();
        let backward: Vec<StandardGate> =
            inverse.iter().rev().filter_map(|i| i.as_gate().map(StandardGate::inverse)).collect();
        prop_assert_eq!(forward, backward);
    }

    /// JSON export then import reproduces the circuit exactly.
    #[test]
    fn json_preserves_circuit(circuit in arb_circuit()) {
        let json = circuit.to_json().unwrap();
        let decoded = Circuit::from_json(&json).unwrap();
        prop_assert_eq!(decoded, circuit);
    }
}
