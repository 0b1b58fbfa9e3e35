//! The diagram package: node arena, unique table and compute tables.

use std::hash::Hash;

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::edge::{Edge, Node, NodeId};
use crate::error::{DdError, DdResult};
use crate::matrix::GateMatrix;

/// Weights at or below this magnitude are flushed to exact zero.
pub(crate) const WEIGHT_EPSILON: f64 = 1e-13;

/// Grid used to quantize weights for unique-table keys.
const WEIGHT_QUANTUM: f64 = 1e-13;

const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Tunables of a [`Package`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackageConfig {
    /// Absolute tolerance used by [`Package::partial_equivalence_check`].
    pub tolerance: f64,
    /// Entries a compute table may hold before it is flushed.
    pub max_table_entries: usize,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_table_entries: 1 << 20,
        }
    }
}

type WeightKey = (i64, i64);
type UniqueKey = (u32, [(NodeId, WeightKey); 4]);
type AddKey = (NodeId, NodeId, WeightKey);

/// A decision-diagram engine context.
///
/// Every [`Edge`] handed out by a package refers to nodes stored inside it,
/// so edges must only be passed back to the package that created them.
/// Dropping the package releases all of its diagrams.
#[derive(Debug)]
pub struct Package {
    config: PackageConfig,
    nodes: Vec<Node>,
    unique: FxHashMap<UniqueKey, NodeId>,
    multiply_table: FxHashMap<(NodeId, NodeId), Edge>,
    add_table: FxHashMap<AddKey, Edge>,
    transpose_table: FxHashMap<NodeId, Edge>,
}

impl Default for Package {
    fn default() -> Self {
        Self::new(PackageConfig::default())
    }
}

impl Package {
    /// Create an empty package.
    pub fn new(config: PackageConfig) -> Self {
        let terminal = Node {
            level: u32::MAX,
            children: [Edge::ZERO; 4],
        };
        Self {
            config,
            nodes: vec![terminal],
            unique: FxHashMap::default(),
            multiply_table: FxHashMap::default(),
            add_table: FxHashMap::default(),
            transpose_table: FxHashMap::default(),
        }
    }

    /// The package configuration.
    pub fn config(&self) -> &PackageConfig {
        &self.config
    }

    /// Number of non-terminal nodes created so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Number of cached operation results across all compute tables.
    pub fn compute_table_entries(&self) -> usize {
        self.multiply_table.len() + self.add_table.len() + self.transpose_table.len()
    }

    /// Drop all cached operation results. Nodes stay valid.
    pub fn clear_compute_tables(&mut self) {
        trace!(
            multiply = self.multiply_table.len(),
            add = self.add_table.len(),
            transpose = self.transpose_table.len(),
            "clearing compute tables"
        );
        self.multiply_table.clear();
        self.add_table.clear();
        self.transpose_table.clear();
    }

    /// Number of qubits (levels) spanned by an edge.
    pub fn num_levels(&self, edge: Edge) -> usize {
        if edge.node.is_terminal() {
            0
        } else {
            self.node(edge.node).level as usize + 1
        }
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> Node {
        self.nodes[id.index()]
    }

    /// Create (or find) the node with the given children and return a
    /// normalized edge to it.
    pub(crate) fn make_node(&mut self, level: u32, children: [Edge; 4]) -> Edge {
        let mut children = children.map(|e| {
            if e.weight.norm() <= WEIGHT_EPSILON {
                Edge::ZERO
            } else {
                e
            }
        });

        let max = children
            .iter()
            .map(|c| c.weight.norm())
            .fold(0.0_f64, f64::max);
        if max == 0.0 {
            return Edge::ZERO;
        }
        let pivot = children
            .iter()
            .position(|c| c.weight.norm() >= max - WEIGHT_EPSILON)
            .unwrap_or(0);

        let norm = children[pivot].weight;
        for child in &mut children {
            if !child.is_zero() {
                child.weight /= norm;
            }
        }
        children[pivot].weight = ONE;

        let key = (level, children.map(|c| (c.node, quantize(c.weight))));
        let id = match self.unique.get(&key) {
            Some(&id) => id,
            None => {
                let id = NodeId(self.nodes.len() as u32);
                self.nodes.push(Node { level, children });
                self.unique.insert(key, id);
                id
            }
        };

        Edge { node: id, weight: norm }
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// Matrix product `a * b`.
    pub fn multiply(&mut self, a: Edge, b: Edge) -> Edge {
        if a.is_zero() || b.is_zero() {
            return Edge::ZERO;
        }
        if a.node.is_terminal() {
            return b.scaled(a.weight);
        }
        if b.node.is_terminal() {
            return a.scaled(b.weight);
        }
        self.multiply_nodes(a.node, b.node)
            .scaled(a.weight * b.weight)
    }

    fn multiply_nodes(&mut self, a: NodeId, b: NodeId) -> Edge {
        if let Some(&cached) = self.multiply_table.get(&(a, b)) {
            return cached;
        }

        let (left, right) = (self.node(a), self.node(b));
        let mut children = [Edge::ZERO; 4];
        for row in 0..2 {
            for col in 0..2 {
                let first = self.multiply(left.children[2 * row], right.children[col]);
                let second = self.multiply(left.children[2 * row + 1], right.children[2 + col]);
                children[2 * row + col] = self.add(first, second);
            }
        }

        let result = self.make_node(left.level, children);
        let limit = self.config.max_table_entries;
        insert_bounded(&mut self.multiply_table, limit, (a, b), result);
        result
    }

    /// Matrix sum `a + b`.
    pub fn add(&mut self, a: Edge, b: Edge) -> Edge {
        if a.is_zero() {
            return b;
        }
        if b.is_zero() {
            return a;
        }
        if a.node == b.node {
            let weight = a.weight + b.weight;
            if weight.norm() <= WEIGHT_EPSILON {
                return Edge::ZERO;
            }
            return Edge {
                node: a.node,
                weight,
            };
        }

        // a + b = a.w · (A + r·B) with |r| <= 1, so the key stays on the grid.
        let (a, b) = if b.weight.norm() > a.weight.norm() {
            (b, a)
        } else {
            (a, b)
        };
        let ratio = b.weight / a.weight;
        let key = (a.node, b.node, quantize(ratio));
        if let Some(&cached) = self.add_table.get(&key) {
            return cached.scaled(a.weight);
        }

        let (left, right) = (self.node(a.node), self.node(b.node));
        let mut children = [Edge::ZERO; 4];
        for (i, child) in children.iter_mut().enumerate() {
            *child = self.add(left.children[i], right.children[i].scaled(ratio));
        }

        let result = self.make_node(left.level, children);
        let limit = self.config.max_table_entries;
        insert_bounded(&mut self.add_table, limit, key, result);
        result.scaled(a.weight)
    }

    /// Conjugate transpose `a†`.
    pub fn conjugate_transpose(&mut self, a: Edge) -> Edge {
        if a.is_zero() {
            return Edge::ZERO;
        }
        if a.node.is_terminal() {
            return Edge::scalar(a.weight.conj());
        }
        self.transpose_node(a.node).scaled(a.weight.conj())
    }

    fn transpose_node(&mut self, id: NodeId) -> Edge {
        if let Some(&cached) = self.transpose_table.get(&id) {
            return cached;
        }

        let node = self.node(id);
        let [c00, c01, c10, c11] = node.children;
        let children = [
            self.conjugate_transpose(c00),
            self.conjugate_transpose(c10),
            self.conjugate_transpose(c01),
            self.conjugate_transpose(c11),
        ];

        let result = self.make_node(node.level, children);
        let limit = self.config.max_table_entries;
        insert_bounded(&mut self.transpose_table, limit, id, result);
        result
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Tensor product of per-level factors; `factors[v]` acts on qubit `v`.
    pub fn kron_chain(&mut self, factors: &[GateMatrix]) -> Edge {
        let mut edge = Edge::ONE;
        for (level, factor) in factors.iter().enumerate() {
            let children = factor.data.map(|w| edge.scaled(w));
            edge = self.make_node(level as u32, children);
        }
        edge
    }

    /// Identity on `n` qubits.
    pub fn identity(&mut self, n: usize) -> Edge {
        self.kron_chain(&vec![GateMatrix::identity(); n])
    }

    /// Diagram of a (multi-)controlled single-target gate on `n` qubits.
    ///
    /// Built as `I + |1..1⟩⟨1..1|_controls ⊗ (G - I)_target`.
    pub fn make_gate_dd(
        &mut self,
        matrix: GateMatrix,
        controls: &[usize],
        target: usize,
        n: usize,
    ) -> DdResult<Edge> {
        for &qubit in controls.iter().chain(std::iter::once(&target)) {
            if qubit >= n {
                return Err(DdError::QubitOutOfRange { qubit, width: n });
            }
        }

        let mut factors = vec![GateMatrix::identity(); n];
        if controls.is_empty() {
            factors[target] = matrix;
            return Ok(self.kron_chain(&factors));
        }

        for &control in controls {
            factors[control] = GateMatrix::one_projector();
        }
        factors[target] = matrix.minus_identity();
        let controlled = self.kron_chain(&factors);
        let identity = self.identity(n);
        Ok(self.add(identity, controlled))
    }
}

fn quantize(weight: Complex64) -> WeightKey {
    (
        (weight.re / WEIGHT_QUANTUM).round() as i64,
        (weight.im / WEIGHT_QUANTUM).round() as i64,
    )
}

/// Insert into a compute table, flushing it first when it is full.
fn insert_bounded<K: Hash + Eq, V>(
    table: &mut FxHashMap<K, V>,
    limit: usize,
    key: K,
    value: V,
) {
    if table.len() >= limit {
        trace!(entries = table.len(), "compute table full, flushing");
        table.clear();
    }
    table.insert(key, value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_only_package() {
        let package = Package::default();
        assert_eq!(package.node_count(), 0);
        assert_eq!(package.config().tolerance, 1e-10);
    }

    #[test]
    fn test_identity_is_shared() {
        let mut package = Package::default();
        let a = package.identity(3);
        let count = package.node_count();
        let b = package.identity(3);

        assert_eq!(a, b);
        assert_eq!(package.node_count(), count);
        assert_eq!(package.num_levels(a), 3);
    }

    #[test]
    fn test_make_node_flushes_zero() {
        let mut package = Package::default();
        let tiny = Edge::scalar(Complex64::new(1e-16, 0.0));
        assert!(package.make_node(0, [tiny; 4]).is_zero());
    }

    #[test]
    fn test_make_node_normalizes() {
        let mut package = Package::default();
        let half = Edge::scalar(Complex64::new(0.5, 0.0));
        let edge = package.make_node(0, [half, Edge::ZERO, Edge::ZERO, half]);

        assert!((edge.weight - Complex64::new(0.5, 0.0)).norm() < 1e-15);
        let node = package.node(edge.node);
        assert_eq!(node.children[0].weight, ONE);
        assert_eq!(node.children[3].weight, ONE);
    }

    #[test]
    fn test_multiply_identity() {
        let mut package = Package::default();
        let h = package.make_gate_dd(GateMatrix::h(), &[], 1, 2).unwrap();
        let id = package.identity(2);
        assert_eq!(package.multiply(h, id), h);
        assert_eq!(package.multiply(id, h), h);
    }

    #[test]
    fn test_add_to_zero() {
        let mut package = Package::default();
        let x = package.make_gate_dd(GateMatrix::x(), &[], 0, 1).unwrap();
        let minus_x = x.scaled(Complex64::new(-1.0, 0.0));
        assert!(package.add(x, minus_x).is_zero());
    }

    #[test]
    fn test_gate_out_of_range() {
        let mut package = Package::default();
        assert!(matches!(
            package.make_gate_dd(GateMatrix::x(), &[3], 0, 2),
            Err(DdError::QubitOutOfRange { qubit: 3, width: 2 })
        ));
    }

    #[test]
    fn test_clear_compute_tables_keeps_results() {
        let mut package = Package::default();
        let cx = package
            .make_gate_dd(GateMatrix::x(), &[0], 1, 2)
            .unwrap();
        let before = package.multiply(cx, cx);
        assert!(package.compute_table_entries() > 0);
        package.clear_compute_tables();
        assert_eq!(package.compute_table_entries(), 0);
        let after = package.multiply(cx, cx);
        assert_eq!(before, after);
        assert_eq!(before, package.identity(2));
    }

    #[test]
    fn test_add_reuses_scaled_sums() {
        let mut package = Package::default();
        let x = package.make_gate_dd(GateMatrix::x(), &[], 0, 2).unwrap();
        let z = package.make_gate_dd(GateMatrix::z(), &[], 1, 2).unwrap();

        let sum = package.add(x, z);
        let entries = package.add_table.len();
        let two = Complex64::new(2.0, 0.0);
        let doubled = package.add(x.scaled(two), z.scaled(two));

        assert_eq!(package.add_table.len(), entries);
        assert_eq!(doubled.node, sum.node);
        assert!((doubled.weight - sum.weight * two).norm() < 1e-15);
    }

    #[test]
    fn test_compute_tables_are_bounded() {
        let mut package = Package::new(PackageConfig {
            max_table_entries: 4,
            ..PackageConfig::default()
        });
        let mut u = package.identity(4);
        for q in 0..4 {
            let h = package.make_gate_dd(GateMatrix::h(), &[], q, 4).unwrap();
            u = package.multiply(h, u);
            let cx = package
                .make_gate_dd(GateMatrix::x(), &[q], (q + 1) % 4, 4)
                .unwrap();
            u = package.multiply(cx, u);
        }

        assert!(package.multiply_table.len() <= 4);
        assert!(package.add_table.len() <= 4);
        let u_dag = package.conjugate_transpose(u);
        assert!(package.transpose_table.len() <= 4);
        let product = package.multiply(u_dag, u);
        assert!(package.is_close_to_identity(product, 1e-10, &[]));
    }
}
