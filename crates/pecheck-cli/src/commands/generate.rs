//! Generate command implementation.

use anyhow::Result;
use console::style;

use pecheck_bench::BenchmarkConfig;

use super::common::{describe, parse_layout, save_circuit};

/// Execute the generate command.
pub fn execute(
    qubits: u32,
    data: u32,
    measured: u32,
    seed: u64,
    layout: &str,
    output_prefix: &str,
) -> Result<()> {
    let layout = parse_layout(layout)?;
    println!(
        "{} Generating pair n={} d={} m={} (seed {}, {} garbage)",
        style("→").cyan().bold(),
        qubits,
        data,
        measured,
        seed,
        layout
    );

    let (first, second) = BenchmarkConfig::new(qubits, data, measured)
        .with_seed(seed)
        .with_layout(layout)
        .generate()?;

    let first_path = format!("{output_prefix}_1.json");
    let second_path = format!("{output_prefix}_2.json");
    save_circuit(&first, &first_path)?;
    save_circuit(&second, &second_path)?;

    println!("{} Pair written", style("✓").green().bold());
    println!("  {}: {}", style(&first_path).green(), describe(&first));
    println!("  {}: {}", style(&second_path).green(), describe(&second));

    Ok(())
}
