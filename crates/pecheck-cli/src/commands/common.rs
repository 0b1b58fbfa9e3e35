//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use pecheck_bench::GarbageLayout;
use pecheck_ir::Circuit;

/// Load a circuit from a JSON file.
pub fn load_circuit(path: &str) -> Result<Circuit> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    let ext = path_obj.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext.to_lowercase().as_str() {
        "json" | "" => {
            Circuit::from_json(&source).with_context(|| format!("Failed to parse circuit: {path}"))
        }
        other => anyhow::bail!("Unsupported circuit format '.{other}' (expected .json)"),
    }
}

/// Write a circuit to a JSON file.
pub fn save_circuit(circuit: &Circuit, path: &str) -> Result<()> {
    let json = circuit
        .to_json()
        .with_context(|| format!("Failed to encode circuit '{}'", circuit.name()))?;
    fs::write(path, json).with_context(|| format!("Failed to write file: {path}"))
}

/// Parse a garbage layout name.
pub fn parse_layout(layout: &str) -> Result<GarbageLayout> {
    match layout.to_lowercase().as_str() {
        "trailing" | "t" => Ok(GarbageLayout::Trailing),
        "leading" | "l" => Ok(GarbageLayout::Leading),
        other => anyhow::bail!("Unknown layout: '{other}'. Available: trailing, leading"),
    }
}

/// One-line summary of a circuit's shape.
pub fn describe(circuit: &Circuit) -> String {
    format!(
        "{} qubits ({} data, {} measured), {} gates, depth {}",
        circuit.num_qubits(),
        circuit.num_qubits_without_ancillae(),
        circuit.num_measured_qubits(),
        circuit.num_gates(),
        circuit.depth()
    )
}
