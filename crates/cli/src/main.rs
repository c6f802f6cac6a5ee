//! R10K out-of-order core simulator CLI.
//!
//! This binary drives the `r10k-core` library. It performs:
//! 1. **Input:** Loads a JSON program and an optional JSON configuration.
//! 2. **Run:** Steps the simulator to termination, collecting one snapshot per cycle.
//! 3. **Output:** Writes the snapshot array as JSON to a file or stdout, and optionally prints statistics.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use r10k_core::config::Config;
use r10k_core::sim::loader;
use r10k_core::{SimError, Simulator, Snapshot, Termination};

#[derive(Parser, Debug)]
#[command(
    name = "r10ksim",
    author,
    version,
    about = "Cycle-by-cycle MIPS R10000-style out-of-order core simulator",
    long_about = "Runs a JSON instruction stream through the out-of-order core and dumps the \
                  per-cycle structural state as JSON.\n\nExamples:\n  r10ksim run program.json\n  \
                  r10ksim run program.json --output trace.json --stats"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program to completion and dump the per-cycle trace.
    Run {
        /// JSON array of instruction strings, e.g. `["add x1, x2, x3"]`.
        program: PathBuf,

        /// Trace output file (stdout when omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON configuration file; missing fields take their defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the safety cycle limit.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Log every pipeline event (implies `RUST_LOG=trace`).
        #[arg(long)]
        trace: bool,

        /// Print statistics to stderr after the run.
        #[arg(long)]
        stats: bool,
    },
}

/// Failure modes of a CLI run.
#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("cannot serialize trace: {0}")]
    Json(#[from] serde_json::Error),
    #[error("program did not terminate within {0} cycles")]
    CycleLimit(u64),
}

impl RunError {
    /// Process exit status; a cycle-limit stop is distinguished from hard failures.
    fn exit_code(&self) -> ExitCode {
        match self {
            Self::CycleLimit(_) => ExitCode::from(2),
            Self::Sim(_) | Self::Io(_) | Self::Json(_) => ExitCode::FAILURE,
        }
    }
}

fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let Commands::Run {
        program,
        output,
        config,
        max_cycles,
        trace,
        stats,
    } = cli.command;

    init_logging(trace);

    match cmd_run(&program, output, config, max_cycles, trace, stats) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            e.exit_code()
        }
    }
}

/// Loads inputs, runs to termination, and writes the trace.
///
/// The trace holds the initial state followed by one snapshot per executed cycle.
fn cmd_run(
    program: &Path,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    max_cycles: Option<u64>,
    trace: bool,
    print_stats: bool,
) -> Result<(), RunError> {
    let mut config = match config {
        Some(path) => loader::load_config(path).map_err(SimError::from)?,
        None => Config::default(),
    };
    if let Some(limit) = max_cycles {
        config.general.max_cycles = limit;
    }
    config.general.trace_instructions |= trace;

    let program = loader::load_program(program).map_err(SimError::from)?;
    info!(instructions = program.len(), "program loaded");

    let mut sim = Simulator::new(program, config)?;
    let mut snapshots: Vec<Snapshot> = vec![sim.snapshot()];
    let outcome = loop {
        let before = sim.cycle();
        let step = sim.step()?;
        if sim.cycle() != before {
            snapshots.push(sim.snapshot());
        }
        if let Some(outcome) = step {
            break outcome;
        }
    };

    match &output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, &snapshots)?;
            writer.flush()?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &snapshots)?;
            writeln!(stdout)?;
        }
    }

    if print_stats {
        eprint!("{}", sim.stats());
    }

    match outcome {
        Termination::Completed => {
            info!(cycles = sim.cycle(), "all instructions committed");
            Ok(())
        }
        Termination::Excepted(record) => {
            warn!(
                pc = record.pc,
                cause = %record.cause,
                cycle = record.cycle,
                "program raised an exception"
            );
            Ok(())
        }
        Termination::CycleLimit { cycles } => Err(RunError::CycleLimit(cycles)),
    }
}
