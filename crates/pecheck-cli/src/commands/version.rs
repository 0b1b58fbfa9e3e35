//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - partial equivalence checking for quantum circuits",
        style("pecheck").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  pecheck-ir      Circuits with garbage and ancilla roles");
    println!("  pecheck-dd      Matrix decision diagrams");
    println!("  pecheck-verify  Alignment and partial equivalence checks");
    println!("  pecheck-bench   Random partially-equivalent circuit pairs");
    println!("  pecheck-cli     Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
