//! Check command implementation.

use std::time::Instant;

use anyhow::Result;
use console::style;

use pecheck_dd::Package;
use pecheck_verify::{
    CheckOutcome, CheckPath, partial_equivalence_check_with_report,
    zero_ancilla_partial_equivalence_check,
};

use super::common::{describe, load_circuit};

/// Execute the check command. Returns whether the circuits are equivalent.
pub fn execute(first: &str, second: &str, zero_ancilla: bool) -> Result<bool> {
    println!(
        "{} Checking {} against {}",
        style("→").cyan().bold(),
        style(first).green(),
        style(second).green()
    );

    let c1 = load_circuit(first)?;
    let c2 = load_circuit(second)?;
    println!("  First:  {}", describe(&c1));
    println!("  Second: {}", describe(&c2));

    let mut package = Package::default();
    let start = Instant::now();
    let outcome = if zero_ancilla {
        CheckOutcome {
            equivalent: zero_ancilla_partial_equivalence_check(&c1, &c2, &mut package)?,
            path: CheckPath::ZeroAncilla,
        }
    } else {
        partial_equivalence_check_with_report(c1, c2, &mut package)?
    };
    let elapsed = start.elapsed();

    if outcome.equivalent {
        println!("{} Partially equivalent", style("✓").green().bold());
    } else {
        println!("{} Not partially equivalent", style("✗").red().bold());
    }
    println!("  Path:  {}", style(outcome.path).yellow());
    println!("  Nodes: {}", package.node_count());
    println!("  Time:  {elapsed:.2?}");

    Ok(outcome.equivalent)
}
