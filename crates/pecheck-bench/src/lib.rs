//! Benchmark circuits for partial equivalence checking.
//!
//! [`generate_random_benchmark`] produces pairs of circuits that are
//! partially equivalent by construction, with a requested number of
//! qubits, data qubits and measured qubits. [`BenchmarkConfig`] exposes the
//! knobs (gate counts, seed, garbage placement) for reproducible sweeps.

pub mod error;
pub mod generator;

pub use error::{BenchError, BenchResult};
pub use generator::{BenchmarkConfig, GarbageLayout, generate_random_benchmark};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of a benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Name of the benchmark.
    pub name: String,
    /// Primary metric value.
    pub value: f64,
    /// Unit of the primary metric.
    pub unit: String,
    /// Total wall-clock time.
    pub duration: Duration,
    /// Additional metrics.
    pub metrics: serde_json::Map<String, serde_json::Value>,
}

impl BenchmarkResult {
    /// Create a new benchmark result.
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
            duration: Duration::ZERO,
            metrics: serde_json::Map::new(),
        }
    }

    /// Set the duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add a metric.
    #[must_use]
    pub fn with_metric(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metrics.insert(key.into(), value.into());
        self
    }
}
