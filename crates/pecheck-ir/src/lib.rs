//! Pecheck Circuit Intermediate Representation
//!
//! This crate provides the circuit model shared by the decision-diagram
//! engine, the verification core and the benchmark generator.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addressing a qubit (and its diagram level)
//! - **Gates**: [`StandardGate`] for the built-in unitary gate set
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] builder with per-qubit garbage and ancilla flags
//!
//! # Example: Marking Qubit Roles
//!
//! ```rust
//! use pecheck_ir::{Circuit, QubitId};
//!
//! // Two data qubits and one ancilla
//! let mut circuit = Circuit::with_size("adder", 3);
//! circuit.set_ancillary(QubitId(2), true).unwrap();
//! circuit.set_garbage(QubitId(2), true).unwrap();
//!
//! circuit.h(QubitId(0)).unwrap();
//! circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();
//!
//! assert_eq!(circuit.num_qubits_without_ancillae(), 2);
//! assert_eq!(circuit.num_measured_qubits(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | Phase gates |
//! | `SX`, `SXdg` | 1 | sqrt(X) and its inverse |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotation and phase gates |
//! | `U` | 1 | Universal single-qubit gate U(θ,φ,λ) |
//! | `CX`, `CY`, `CZ`, `CH` | 2 | Controlled Paulis and Hadamard |
//! | `CRx`, `CRy`, `CRz`, `CP` | 2 | Controlled rotations |
//! | `Swap` | 2 | SWAP gate |
//! | `CCX`, `CSwap` | 3 | Toffoli and Fredkin gates |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::{Circuit, MAX_QUBITS};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::QubitId;
