//! Approximate comparisons between diagrams.

use ndarray::Array2;
use num_complex::Complex64;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::edge::{Edge, NodeId};
use crate::error::{DdError, DdResult};
use crate::package::Package;

/// Widest diagram [`Package::to_matrix`] will expand.
pub const MAX_DENSE_QUBITS: usize = 12;

const ONE: Complex64 = Complex64::new(1.0, 0.0);

type RatioMemo = FxHashMap<(NodeId, NodeId), Option<Complex64>>;
type ChoiMemo = FxHashMap<(NodeId, NodeId), Edge>;

/// Data and measured qubit counts of a comparison.
#[derive(Debug, Clone, Copy)]
struct Partition {
    data: usize,
    measured: usize,
}

impl Package {
    /// Whether two edges over the same levels denote matrices that agree
    /// element-wise within `tol`.
    ///
    /// Nodes are normalized so their largest entry has magnitude one, which
    /// makes the edge weight an upper bound for every entry.
    pub fn edges_close(&self, a: Edge, b: Edge, tol: f64) -> bool {
        if a.is_zero() || b.is_zero() {
            return a.weight.norm() <= tol && b.weight.norm() <= tol;
        }
        if a.node == b.node {
            return (a.weight - b.weight).norm() <= tol;
        }
        let mut memo = RatioMemo::default();
        match self.node_ratio(a.node, b.node, tol, &mut memo) {
            Some(ratio) => (a.weight * ratio - b.weight).norm() <= tol,
            None => false,
        }
    }

    /// Scalar `r` with `M(a) ≈ r · M(b)`, if one exists.
    fn node_ratio(
        &self,
        a: NodeId,
        b: NodeId,
        tol: f64,
        memo: &mut RatioMemo,
    ) -> Option<Complex64> {
        if a == b {
            return Some(ONE);
        }
        if a.is_terminal() || b.is_terminal() {
            return None;
        }
        if let Some(&cached) = memo.get(&(a, b)) {
            return cached;
        }

        let (left, right) = (self.node(a), self.node(b));
        let result = if left.level == right.level {
            self.children_ratio(&left.children, &right.children, tol, memo)
        } else {
            None
        };
        memo.insert((a, b), result);
        result
    }

    fn children_ratio(
        &self,
        left: &[Edge; 4],
        right: &[Edge; 4],
        tol: f64,
        memo: &mut RatioMemo,
    ) -> Option<Complex64> {
        // The largest child of `right` has weight one after normalization.
        let pivot = (0..4).max_by(|&i, &j| {
            right[i]
                .weight
                .norm()
                .total_cmp(&right[j].weight.norm())
        })?;
        let (x, y) = (left[pivot], right[pivot]);
        if x.is_zero() || y.is_zero() {
            return None;
        }
        let ratio = x.weight * self.node_ratio(x.node, y.node, tol, memo)? / y.weight;

        for i in (0..4).filter(|&i| i != pivot) {
            let (x, y) = (left[i], right[i]);
            if x.weight.norm() <= tol && (ratio * y.weight).norm() <= tol {
                continue;
            }
            if x.is_zero() || y.is_zero() {
                return None;
            }
            let r = self.node_ratio(x.node, y.node, tol, memo)?;
            if (x.weight * r - ratio * y.weight).norm() > tol {
                return None;
            }
        }
        Some(ratio)
    }

    /// Whether `u ≈ c · (I ⊗ W)` for a non-zero scalar `c`, where `I` acts on
    /// every qubit not flagged in `garbage` and `W` is arbitrary on the
    /// flagged ones.
    ///
    /// Levels beyond `garbage.len()` count as non-garbage.
    pub fn is_close_to_identity(&self, u: Edge, tol: f64, garbage: &[bool]) -> bool {
        if u.is_zero() {
            return false;
        }
        let mut memo = FxHashMap::default();
        self.identity_like(u.node, tol, garbage, &mut memo)
    }

    fn identity_like(
        &self,
        id: NodeId,
        tol: f64,
        garbage: &[bool],
        memo: &mut FxHashMap<NodeId, bool>,
    ) -> bool {
        if id.is_terminal() {
            return true;
        }
        if let Some(&cached) = memo.get(&id) {
            return cached;
        }

        let node = self.node(id);
        let [c00, c01, c10, c11] = node.children;
        let result = if garbage.get(node.level as usize).copied().unwrap_or(false) {
            node.children
                .iter()
                .filter(|c| c.weight.norm() > tol)
                .all(|c| self.identity_like(c.node, tol, garbage, memo))
        } else {
            c01.weight.norm() <= tol
                && c10.weight.norm() <= tol
                && !c00.is_zero()
                && self.edges_close(c00, c11, tol)
                && self.identity_like(c00.node, tol, garbage, memo)
        };

        memo.insert(id, result);
        result
    }

    /// Compare two unitaries for partial equivalence.
    ///
    /// Qubits `[0, d)` are data inputs and `[d, n)` ancillae that start in
    /// |0⟩; qubits `[0, m)` are measured and `[m, n)` garbage. The circuits
    /// agree when the channels from data inputs to measured outputs match,
    /// i.e. when their reduced Choi matrices
    ///
    /// `J[(b, a), (b', a')] = Σ_e V[(b, e), a] · conj(V[(b', e), a'])`
    ///
    /// are equal, where `V` is `U` restricted to ancilla inputs |0⟩ and `e`
    /// runs over the garbage outputs. Both reductions are computed in one
    /// pass over each diagram and compared once.
    pub fn partial_equivalence_check(
        &mut self,
        u1: Edge,
        u2: Edge,
        d: usize,
        m: usize,
    ) -> DdResult<bool> {
        if m == 0 {
            return Ok(true);
        }

        let n = self.num_levels(u1);
        let other = self.num_levels(u2);
        if n != other {
            return Err(DdError::WidthMismatch {
                left: n,
                right: other,
            });
        }
        if d > n || m > n {
            return Err(DdError::InvalidPartition {
                data: d,
                measured: m,
                width: n,
            });
        }

        let tol = self.config().tolerance;
        if u1.node == u2.node && (u1.weight.norm() - u2.weight.norm()).abs() <= tol {
            debug!(n, d, m, "identical diagrams");
            return Ok(true);
        }

        self.clear_compute_tables();
        let partition = Partition {
            data: d,
            measured: m,
        };
        let mut memo = ChoiMemo::default();
        let j1 = self.reduced_choi(u1, u1, partition, &mut memo);
        let j2 = self.reduced_choi(u2, u2, partition, &mut memo);
        let equivalent = self.edges_close(j1, j2, tol);

        debug!(
            n,
            d,
            m,
            pairs = memo.len(),
            nodes = self.node_count(),
            equivalent,
            "compared reduced channels"
        );
        self.clear_compute_tables();
        Ok(equivalent)
    }

    /// `Σ_e X[(b, e), a] · conj(Y[(b', e), a'])` as a diagram over the
    /// measured output and data input bits.
    ///
    /// A qubit `v` contributes an output level if `v < m` and an input level
    /// if `v < d`; ancilla columns are fixed to |0⟩ and garbage rows summed.
    fn reduced_choi(
        &mut self,
        x: Edge,
        y: Edge,
        partition: Partition,
        memo: &mut ChoiMemo,
    ) -> Edge {
        if x.is_zero() || y.is_zero() {
            return Edge::ZERO;
        }
        let scale = x.weight * y.weight.conj();
        if x.node.is_terminal() || y.node.is_terminal() {
            return Edge::scalar(scale);
        }
        self.reduced_choi_nodes(x.node, y.node, partition, memo)
            .scaled(scale)
    }

    fn reduced_choi_nodes(
        &mut self,
        a: NodeId,
        b: NodeId,
        partition: Partition,
        memo: &mut ChoiMemo,
    ) -> Edge {
        if let Some(&cached) = memo.get(&(a, b)) {
            return cached;
        }

        let (x, y) = (self.node(a).children, self.node(b).children);
        let v = self.node(a).level as usize;
        let measured = v < partition.measured;
        let data = v < partition.data;
        let base = (v.min(partition.measured) + v.min(partition.data)) as u32;
        // Child at (output bit, input bit).
        let at = |children: &[Edge; 4], row: usize, col: usize| children[2 * row + col];

        let result = match (measured, data) {
            (true, true) => {
                let mut outer = [Edge::ZERO; 4];
                for (i, slot) in outer.iter_mut().enumerate() {
                    let (row, row_prime) = (i >> 1, i & 1);
                    let mut inner = [Edge::ZERO; 4];
                    for (k, entry) in inner.iter_mut().enumerate() {
                        let (col, col_prime) = (k >> 1, k & 1);
                        *entry = self.reduced_choi(
                            at(&x, row, col),
                            at(&y, row_prime, col_prime),
                            partition,
                            memo,
                        );
                    }
                    *slot = self.make_node(base, inner);
                }
                self.make_node(base + 1, outer)
            }
            (false, true) => {
                let mut children = [Edge::ZERO; 4];
                for (k, entry) in children.iter_mut().enumerate() {
                    let (col, col_prime) = (k >> 1, k & 1);
                    let zero =
                        self.reduced_choi(at(&x, 0, col), at(&y, 0, col_prime), partition, memo);
                    let one =
                        self.reduced_choi(at(&x, 1, col), at(&y, 1, col_prime), partition, memo);
                    *entry = self.add(zero, one);
                }
                self.make_node(base, children)
            }
            (true, false) => {
                let mut children = [Edge::ZERO; 4];
                for (i, entry) in children.iter_mut().enumerate() {
                    let (row, row_prime) = (i >> 1, i & 1);
                    *entry =
                        self.reduced_choi(at(&x, row, 0), at(&y, row_prime, 0), partition, memo);
                }
                self.make_node(base, children)
            }
            (false, false) => {
                let zero = self.reduced_choi(at(&x, 0, 0), at(&y, 0, 0), partition, memo);
                let one = self.reduced_choi(at(&x, 1, 0), at(&y, 1, 0), partition, memo);
                self.add(zero, one)
            }
        };

        memo.insert((a, b), result);
        result
    }

    /// Expand an edge into a dense matrix. Qubit `v` is bit `v` of the
    /// row and column index.
    pub fn to_matrix(&self, edge: Edge) -> DdResult<Array2<Complex64>> {
        let n = self.num_levels(edge);
        if n > MAX_DENSE_QUBITS {
            return Err(DdError::TooLarge {
                width: n,
                max: MAX_DENSE_QUBITS,
            });
        }

        let dim = 1usize << n;
        let mut out = Array2::zeros((dim, dim));
        self.fill_dense(edge, ONE, 0, 0, &mut out);
        Ok(out)
    }

    fn fill_dense(
        &self,
        edge: Edge,
        factor: Complex64,
        row: usize,
        col: usize,
        out: &mut Array2<Complex64>,
    ) {
        if edge.is_zero() {
            return;
        }
        let weight = factor * edge.weight;
        if edge.node.is_terminal() {
            out[[row, col]] += weight;
            return;
        }

        let node = self.node(edge.node);
        let bit = 1usize << node.level;
        for (i, child) in node.children.iter().enumerate() {
            let r = if i & 2 == 0 { row } else { row + bit };
            let c = if i & 1 == 0 { col } else { col + bit };
            self.fill_dense(*child, weight, r, c, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::GateMatrix;

    const TOL: f64 = 1e-10;

    #[test]
    fn test_edges_close_global_scale() {
        let mut package = Package::default();
        let h = package.make_gate_dd(GateMatrix::h(), &[], 0, 2).unwrap();
        let nudged = h.scaled(Complex64::new(1.0 + 1e-12, 0.0));
        let phased = h.scaled(Complex64::new(0.0, 1.0));

        assert!(package.edges_close(h, nudged, TOL));
        assert!(!package.edges_close(h, phased, TOL));
        assert!(!package.edges_close(h, Edge::ZERO, TOL));
    }

    #[test]
    fn test_edges_close_structurally_different_nodes() {
        let mut package = Package::default();
        let x = package.make_gate_dd(GateMatrix::x(), &[], 0, 1).unwrap();
        let z = package.make_gate_dd(GateMatrix::z(), &[], 0, 1).unwrap();
        let h = package.make_gate_dd(GateMatrix::h(), &[], 0, 1).unwrap();

        // H Z H = X, computed through a different node path
        let hz = package.multiply(z, h);
        let hzh = package.multiply(h, hz);
        assert!(package.edges_close(hzh, x, TOL));
        assert!(!package.edges_close(hzh, z, TOL));
    }

    #[test]
    fn test_identity_up_to_phase() {
        let mut package = Package::default();
        let id = package.identity(3);
        let phased = id.scaled(Complex64::from_polar(1.0, 0.7));
        assert!(package.is_close_to_identity(phased, TOL, &[]));
        assert!(!package.is_close_to_identity(Edge::ZERO, TOL, &[]));
    }

    #[test]
    fn test_identity_ignores_garbage() {
        let mut package = Package::default();
        let x1 = package.make_gate_dd(GateMatrix::x(), &[], 1, 2).unwrap();

        assert!(!package.is_close_to_identity(x1, TOL, &[false, false]));
        assert!(!package.is_close_to_identity(x1, TOL, &[true, false]));
        assert!(package.is_close_to_identity(x1, TOL, &[false, true]));
    }

    #[test]
    fn test_identity_rejects_entangling_garbage() {
        let mut package = Package::default();
        // CX with the control on the measured qubit changes the garbage
        // depending on the measured value: not of the form I ⊗ W.
        let cx = package
            .make_gate_dd(GateMatrix::x(), &[0], 1, 2)
            .unwrap();
        assert!(!package.is_close_to_identity(cx, TOL, &[false, true]));

        // With the control on the garbage qubit the measured qubit flips.
        let cx_rev = package
            .make_gate_dd(GateMatrix::x(), &[1], 0, 2)
            .unwrap();
        assert!(!package.is_close_to_identity(cx_rev, TOL, &[false, true]));
    }

    #[test]
    fn test_to_matrix_bit_order() {
        let mut package = Package::default();
        // X on qubit 0 maps |00⟩ (index 0) to |01⟩ (index 1)
        let x0 = package.make_gate_dd(GateMatrix::x(), &[], 0, 2).unwrap();
        let dense = package.to_matrix(x0).unwrap();
        assert_eq!(dense[[1, 0]], ONE);
        assert_eq!(dense[[0, 1]], ONE);
        assert_eq!(dense[[3, 2]], ONE);
        assert_eq!(dense[[2, 0]], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_to_matrix_too_large() {
        let mut package = Package::default();
        let id = package.identity(MAX_DENSE_QUBITS + 1);
        assert!(matches!(
            package.to_matrix(id),
            Err(DdError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_partial_check_ignores_garbage_output() {
        let mut package = Package::default();
        let id = package.identity(2);
        let x1 = package.make_gate_dd(GateMatrix::x(), &[], 1, 2).unwrap();
        let x0 = package.make_gate_dd(GateMatrix::x(), &[], 0, 2).unwrap();

        assert!(package.partial_equivalence_check(id, x1, 2, 1).unwrap());
        assert!(!package.partial_equivalence_check(id, x0, 2, 1).unwrap());
        assert!(package.partial_equivalence_check(id, x0, 2, 0).unwrap());
    }

    #[test]
    fn test_partial_check_ignores_ancilla_input() {
        let mut package = Package::default();
        // CX controlled by the ancilla (qubit 1) never fires on |0⟩.
        let id = package.identity(2);
        let cx = package
            .make_gate_dd(GateMatrix::x(), &[1], 0, 2)
            .unwrap();

        assert!(package.partial_equivalence_check(id, cx, 1, 1).unwrap());
        assert!(!package.partial_equivalence_check(id, cx, 2, 1).unwrap());
    }

    #[test]
    fn test_partial_check_width_mismatch() {
        let mut package = Package::default();
        let a = package.identity(2);
        let b = package.identity(3);
        assert!(matches!(
            package.partial_equivalence_check(a, b, 1, 1),
            Err(DdError::WidthMismatch { left: 2, right: 3 })
        ));
        assert!(matches!(
            package.partial_equivalence_check(a, a, 3, 1),
            Err(DdError::InvalidPartition { .. })
        ));
    }

    #[test]
    fn test_partial_check_detects_decohered_output() {
        let mut package = Package::default();
        let id = package.identity(2);
        // Copying qubit 0 into the garbage dephases the measured output.
        let cx = package
            .make_gate_dd(GateMatrix::x(), &[0], 1, 2)
            .unwrap();

        assert!(!package.partial_equivalence_check(id, cx, 2, 1).unwrap());
        assert!(!package.partial_equivalence_check(id, cx, 1, 1).unwrap());
        assert!(!package.partial_equivalence_check(id, cx, 2, 2).unwrap());
    }

    #[test]
    fn test_partial_check_ignores_garbage_after_entangling() {
        let mut package = Package::default();
        let cx = package
            .make_gate_dd(GateMatrix::x(), &[0], 1, 2)
            .unwrap();
        let h1 = package.make_gate_dd(GateMatrix::h(), &[], 1, 2).unwrap();
        let tail = package.multiply(h1, cx);

        assert!(package.partial_equivalence_check(cx, tail, 2, 1).unwrap());
        assert!(package.partial_equivalence_check(cx, tail, 1, 1).unwrap());
        assert!(!package.partial_equivalence_check(cx, tail, 2, 2).unwrap());
    }

    #[test]
    fn test_partial_check_same_diagram_up_to_phase() {
        let mut package = Package::default();
        let h = package.make_gate_dd(GateMatrix::h(), &[0], 1, 3).unwrap();
        let phased = h.scaled(Complex64::from_polar(1.0, 1.3));

        assert!(package.partial_equivalence_check(h, phased, 3, 3).unwrap());
        assert!(package.partial_equivalence_check(h, phased, 1, 2).unwrap());
    }

    #[test]
    fn test_partial_check_clears_compute_tables() {
        let mut package = Package::default();
        let id = package.identity(3);
        let cx = package
            .make_gate_dd(GateMatrix::x(), &[0], 2, 3)
            .unwrap();
        let _ = package.multiply(cx, cx);

        assert!(!package.partial_equivalence_check(id, cx, 3, 1).unwrap());
        assert_eq!(package.compute_table_entries(), 0);
    }
}
