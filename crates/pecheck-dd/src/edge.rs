//! Diagram nodes and weighted edges.

use num_complex::Complex64;

/// Index of a node in a [`Package`](crate::Package) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The terminal node shared by every diagram.
    pub const TERMINAL: NodeId = NodeId(0);

    /// Whether this is the terminal node.
    #[inline]
    pub fn is_terminal(self) -> bool {
        self == Self::TERMINAL
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A weighted reference to a node: the handle for a matrix.
///
/// An edge is only meaningful together with the package that owns its
/// node. Edges are plain values; operations return new edges and never
/// mutate existing ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Target node.
    pub node: NodeId,
    /// Complex factor applied to the node's matrix.
    pub weight: Complex64,
}

impl Edge {
    /// The all-zero matrix of any size.
    pub const ZERO: Edge = Edge {
        node: NodeId::TERMINAL,
        weight: Complex64::new(0.0, 0.0),
    };

    /// The scalar one.
    pub const ONE: Edge = Edge {
        node: NodeId::TERMINAL,
        weight: Complex64::new(1.0, 0.0),
    };

    /// A scalar edge pointing at the terminal.
    pub fn scalar(weight: Complex64) -> Self {
        Self {
            node: NodeId::TERMINAL,
            weight,
        }
    }

    /// Whether the edge is exactly zero.
    ///
    /// Weights below the package's zero threshold are flushed to exact zero
    /// when nodes are created, so this test is exact.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.weight.re == 0.0 && self.weight.im == 0.0
    }

    /// The same node scaled by `factor`.
    #[must_use]
    #[inline]
    pub fn scaled(&self, factor: Complex64) -> Self {
        if self.is_zero() {
            return Edge::ZERO;
        }
        Self {
            node: self.node,
            weight: self.weight * factor,
        }
    }
}

/// A node of a quasi-reduced matrix diagram.
///
/// A node at level `v` stands for a `2^(v+1)`-square matrix split into four
/// quadrants by the row and column bit of qubit `v`. Children are ordered
/// `[00, 01, 10, 11]` and all live at level `v - 1` (or are the terminal
/// for `v == 0`, or are zero edges).
#[derive(Debug, Clone, Copy)]
pub(crate) struct Node {
    pub(crate) level: u32,
    pub(crate) children: [Edge; 4],
}
