//! pecheck Command-Line Interface
//!
//! Checks whether two quantum circuits agree on their measured outputs,
//! ignoring garbage qubits, and generates random benchmark pairs.
//!
//! Exit status of `pecheck check`: 0 when the circuits are partially
//! equivalent, 2 when they are not, 1 on error.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{bench, check, generate, version};

/// Exit status when the circuits are not partially equivalent.
const EXIT_NOT_EQUIVALENT: i32 = 2;

/// pecheck - partial equivalence checking for quantum circuits
#[derive(Parser)]
#[command(name = "pecheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check two circuit files for partial equivalence
    Check {
        /// First circuit (JSON)
        #[arg(short, long)]
        first: String,

        /// Second circuit (JSON)
        #[arg(short, long)]
        second: String,

        /// Run the zero-ancilla check directly
        #[arg(long)]
        zero_ancilla: bool,
    },

    /// Check a sweep of random partially-equivalent pairs
    Bench {
        /// Total number of qubits
        #[arg(short = 'n', long)]
        qubits: u32,

        /// Number of data qubits
        #[arg(short, long)]
        data: u32,

        /// Number of measured qubits
        #[arg(short, long)]
        measured: u32,

        /// Number of pairs to check
        #[arg(short, long, default_value = "10")]
        trials: u32,

        /// Seed of the first pair
        #[arg(long, env = "PECHECK_SEED", default_value = "42")]
        seed: u64,

        /// Garbage placement (trailing, leading)
        #[arg(short, long, default_value = "trailing")]
        layout: String,

        /// Output file for JSON report (stdout if omitted)
        #[arg(short, long)]
        export: Option<String>,
    },

    /// Write one random partially-equivalent pair to disk
    Generate {
        /// Total number of qubits
        #[arg(short = 'n', long)]
        qubits: u32,

        /// Number of data qubits
        #[arg(short, long)]
        data: u32,

        /// Number of measured qubits
        #[arg(short, long)]
        measured: u32,

        /// RNG seed
        #[arg(long, env = "PECHECK_SEED", default_value = "42")]
        seed: u64,

        /// Garbage placement (trailing, leading)
        #[arg(short, long, default_value = "trailing")]
        layout: String,

        /// Output prefix; writes <PREFIX>_1.json and <PREFIX>_2.json
        #[arg(short, long)]
        output_prefix: String,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Check {
            first,
            second,
            zero_ancilla,
        } => check::execute(&first, &second, zero_ancilla).map(|equivalent| {
            if !equivalent {
                std::process::exit(EXIT_NOT_EQUIVALENT);
            }
        }),

        Commands::Bench {
            qubits,
            data,
            measured,
            trials,
            seed,
            layout,
            export,
        } => bench::execute(
            qubits,
            data,
            measured,
            trials,
            seed,
            &layout,
            export.as_deref(),
        ),

        Commands::Generate {
            qubits,
            data,
            measured,
            seed,
            layout,
            output_prefix,
        } => generate::execute(qubits, data, measured, seed, &layout, &output_prefix),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
