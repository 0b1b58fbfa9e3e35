//! Random partially-equivalent circuit pairs.
//!
//! Both circuits of a pair share a random block over all qubits, which the
//! second circuit spells with different but equal gate sequences. Each
//! circuit then gets its own random gates acting on garbage qubits only, so
//! the pair differs exactly where the checker is told not to look.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

use pecheck_ir::{Circuit, QubitId};

use crate::error::{BenchError, BenchResult};

/// Where the garbage qubits sit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GarbageLayout {
    /// Garbage on `[m, n)`: measured qubits already on the low indices.
    #[default]
    Trailing,
    /// Garbage on `[0, n - m)`: measured qubits on the high indices.
    Leading,
}

impl std::fmt::Display for GarbageLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GarbageLayout::Trailing => write!(f, "trailing"),
            GarbageLayout::Leading => write!(f, "leading"),
        }
    }
}

/// Configuration for one generated pair.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Total qubits `n`.
    pub num_qubits: u32,
    /// Data qubits `d`; ancillae occupy `[d, n)`.
    pub num_data: u32,
    /// Measured qubits `m`.
    pub num_measured: u32,
    /// Gates in the shared block.
    pub shared_gates: usize,
    /// Gates on garbage qubits, per circuit.
    pub garbage_gates: usize,
    /// RNG seed.
    pub seed: u64,
    /// Garbage placement.
    pub layout: GarbageLayout,
}

impl BenchmarkConfig {
    /// Defaults for an `(n, d, m)` pair: `5n` shared and `2n` garbage gates,
    /// seed 42, trailing garbage.
    pub fn new(num_qubits: u32, num_data: u32, num_measured: u32) -> Self {
        Self {
            num_qubits,
            num_data,
            num_measured,
            shared_gates: 5 * num_qubits as usize,
            garbage_gates: 2 * num_qubits as usize,
            seed: 42,
            layout: GarbageLayout::Trailing,
        }
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the garbage layout.
    #[must_use]
    pub fn with_layout(mut self, layout: GarbageLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the shared and garbage gate counts.
    #[must_use]
    pub fn with_gates(mut self, shared: usize, garbage: usize) -> Self {
        self.shared_gates = shared;
        self.garbage_gates = garbage;
        self
    }

    /// Check `m <= d <= n`.
    pub fn validate(&self) -> BenchResult<()> {
        let (n, d, m) = (self.num_qubits, self.num_data, self.num_measured);
        if m > d || d > n {
            return Err(BenchError::InvalidParameters(format!(
                "need measured <= data <= qubits, got m={m}, d={d}, n={n}"
            )));
        }
        Ok(())
    }

    /// Indices of the garbage qubits under this layout.
    pub fn garbage_qubits(&self) -> Vec<u32> {
        let (n, m) = (self.num_qubits, self.num_measured);
        match self.layout {
            GarbageLayout::Trailing => (m..n).collect(),
            GarbageLayout::Leading => (0..n.saturating_sub(m)).collect(),
        }
    }

    /// Generate the pair.
    pub fn generate(&self) -> BenchResult<(Circuit, Circuit)> {
        self.validate()?;
        let (n, d, m) = (self.num_qubits, self.num_data, self.num_measured);
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut first = Circuit::with_size(format!("pec_{n}_{d}_{m}_a"), n);
        let mut second = Circuit::with_size(format!("pec_{n}_{d}_{m}_b"), n);
        let garbage = self.garbage_qubits();
        for circuit in [&mut first, &mut second] {
            for q in d..n {
                circuit.set_ancillary(QubitId(q), true)?;
            }
            for &q in &garbage {
                circuit.set_garbage(QubitId(q), true)?;
            }
        }

        if n > 0 {
            for _ in 0..self.shared_gates {
                shared_gate(&mut rng, n, &mut first, &mut second)?;
            }
        }
        for circuit in [&mut first, &mut second] {
            for _ in 0..self.garbage_gates {
                garbage_gate(&mut rng, &garbage, circuit)?;
            }
        }

        debug!(
            n,
            d,
            m,
            seed = self.seed,
            layout = %self.layout,
            gates_a = first.num_gates(),
            gates_b = second.num_gates(),
            "generated benchmark pair"
        );
        Ok((first, second))
    }
}

/// Generate a pair over `n` qubits with `d` data and `m` measured qubits,
/// seeded from OS entropy.
pub fn generate_random_benchmark(n: u32, d: u32, m: u32) -> BenchResult<(Circuit, Circuit)> {
    let seed: u64 = rand::random();
    BenchmarkConfig::new(n, d, m).with_seed(seed).generate()
}

/// Two distinct random qubits.
fn pair(rng: &mut SmallRng, qubits: &[u32]) -> (QubitId, QubitId) {
    let picked = rand::seq::index::sample(rng, qubits.len(), 2);
    (QubitId(qubits[picked.index(0)]), QubitId(qubits[picked.index(1)]))
}

/// Append one random gate to both circuits, spelled differently in the second.
fn shared_gate(
    rng: &mut SmallRng,
    n: u32,
    first: &mut Circuit,
    second: &mut Circuit,
) -> BenchResult<()> {
    let all: Vec<u32> = (0..n).collect();
    let kinds = match n {
        1 => 5,
        2 => 8,
        _ => 9,
    };
    let q = QubitId(rng.gen_range(0..n));

    match rng.gen_range(0..kinds) {
        0 => {
            first.h(q)?;
            second.h(q)?;
        }
        1 => {
            // X = H Z H
            first.x(q)?;
            second.h(q)?.z(q)?.h(q)?;
        }
        2 => {
            // S = T T
            first.s(q)?;
            second.t(q)?.t(q)?;
        }
        3 => {
            first.t(q)?;
            second.t(q)?;
        }
        4 => {
            let theta = rng.gen_range(0.0..2.0 * PI);
            first.rz(theta, q)?;
            second.rz(theta, q)?;
        }
        5 => {
            let (c, t) = pair(rng, &all);
            first.cx(c, t)?;
            second.cx(c, t)?;
        }
        6 => {
            // CZ = (I ⊗ H) CX (I ⊗ H)
            let (c, t) = pair(rng, &all);
            first.cz(c, t)?;
            second.h(t)?.cx(c, t)?.h(t)?;
        }
        7 => {
            let (a, b) = pair(rng, &all);
            first.swap(a, b)?;
            second.cx(a, b)?.cx(b, a)?.cx(a, b)?;
        }
        _ => {
            let picked = rand::seq::index::sample(rng, n as usize, 3);
            let [c1, c2, t] = [0, 1, 2].map(|i| QubitId(picked.index(i) as u32));
            first.ccx(c1, c2, t)?;
            second.ccx(c1, c2, t)?;
        }
    }
    Ok(())
}

/// Append one random gate acting only on garbage qubits.
fn garbage_gate(rng: &mut SmallRng, garbage: &[u32], circuit: &mut Circuit) -> BenchResult<()> {
    if garbage.is_empty() {
        return Ok(());
    }
    let kinds = if garbage.len() >= 2 { 5 } else { 4 };
    let q = QubitId(garbage[rng.gen_range(0..garbage.len())]);

    match rng.gen_range(0..kinds) {
        0 => {
            circuit.h(q)?;
        }
        1 => {
            circuit.t(q)?;
        }
        2 => {
            circuit.rx(rng.gen_range(0.0..2.0 * PI), q)?;
        }
        3 => {
            circuit.ry(rng.gen_range(0.0..2.0 * PI), q)?;
        }
        _ => {
            let (c, t) = pair(rng, garbage);
            circuit.cx(c, t)?;
        }
    }
    Ok(())
}
