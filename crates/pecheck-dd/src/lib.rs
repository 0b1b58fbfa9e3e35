//! Matrix decision diagrams for circuit verification.
//!
//! A [`Package`] owns every node it creates and hands out [`Edge`]s as
//! handles. Diagrams are quasi-reduced: qubit `v` is level `v`, the root sits
//! at level `n - 1`, and every node has four children `[00, 01, 10, 11]`
//! indexed by the row and column bit of its qubit.
//!
//! # Example
//!
//! ```rust
//! use pecheck_dd::{BuildOptions, Package};
//! use pecheck_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let mut package = Package::default();
//! let u = package.build_functionality(&circuit, BuildOptions::default()).unwrap();
//! let u_dag = package.conjugate_transpose(u);
//! let product = package.multiply(u_dag, u);
//! assert!(package.is_close_to_identity(product, 1e-10, &[]));
//! ```

pub mod compare;
pub mod edge;
pub mod error;
pub mod functionality;
pub mod matrix;
pub mod package;

pub use compare::MAX_DENSE_QUBITS;
pub use edge::{Edge, NodeId};
pub use error::{DdError, DdResult};
pub use functionality::BuildOptions;
pub use matrix::GateMatrix;
pub use package::{Package, PackageConfig};
