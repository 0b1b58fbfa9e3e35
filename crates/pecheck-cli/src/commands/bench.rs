//! Bench command implementation.

use std::fs;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use pecheck_bench::{BenchmarkConfig, BenchmarkResult};
use pecheck_dd::Package;
use pecheck_verify::partial_equivalence_check;

use super::common::parse_layout;

/// Execute the bench command.
///
/// Trial `i` uses seed `seed + i`, so a sweep is reproducible from its
/// first seed.
pub fn execute(
    qubits: u32,
    data: u32,
    measured: u32,
    trials: u32,
    seed: u64,
    layout: &str,
    export: Option<&str>,
) -> Result<()> {
    let layout = parse_layout(layout)?;
    let base = BenchmarkConfig::new(qubits, data, measured).with_layout(layout);
    base.validate()?;

    println!(
        "{} Benchmarking {} pairs n={} d={} m={} ({} garbage)",
        style("→").cyan().bold(),
        trials,
        qubits,
        data,
        measured,
        layout
    );

    let progress = ProgressBar::new(u64::from(trials));
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .context("invalid progress template")?
            .progress_chars("=>-"),
    );

    let mut passed = 0u32;
    let mut check_time = Duration::ZERO;
    let mut peak_nodes = 0usize;
    let start = Instant::now();

    for trial in 0..trials {
        let (first, second) = base
            .clone()
            .with_seed(seed.wrapping_add(u64::from(trial)))
            .generate()?;

        let mut package = Package::default();
        let t = Instant::now();
        let equivalent = partial_equivalence_check(first, second, &mut package)?;
        check_time += t.elapsed();
        peak_nodes = peak_nodes.max(package.node_count());

        if equivalent {
            passed += 1;
        } else {
            info!(trial, "generated pair reported non-equivalent");
        }
        progress.set_message(format!("{passed} equivalent"));
        progress.inc(1);
    }
    progress.finish_and_clear();

    let total = start.elapsed();
    let mean_ms = if trials == 0 {
        0.0
    } else {
        check_time.as_secs_f64() * 1e3 / f64::from(trials)
    };

    let result = BenchmarkResult::new(
        format!("pec_{qubits}_{data}_{measured}"),
        f64::from(passed),
        "equivalent",
    )
    .with_duration(total)
    .with_metric("trials", trials)
    .with_metric("seed", seed)
    .with_metric("layout", layout.to_string())
    .with_metric("mean_check_ms", mean_ms)
    .with_metric("peak_nodes", peak_nodes);

    if passed == trials {
        println!(
            "{} {}/{} pairs equivalent",
            style("✓").green().bold(),
            passed,
            trials
        );
    } else {
        println!(
            "{} {}/{} pairs equivalent",
            style("✗").red().bold(),
            passed,
            trials
        );
    }
    println!("  Mean check: {mean_ms:.3} ms");
    println!("  Total:      {total:.2?}");

    let json = serde_json::to_string_pretty(&result)?;
    match export {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write file: {path}"))?;
            println!("  Report: {}", style(path).green());
        }
        None => println!("{json}"),
    }

    Ok(())
}
