use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, LogLevel, Verbosity};

use crate::solver::BackendKind;

/// Directory the visualizer writes into unless told otherwise.
pub const DEFAULT_OUT_DIR: &str = "performance_graphs";

/// Command line of the knapsack optimizer.
#[derive(Parser, Debug)]
#[command(author, version, about = "Pack pallets onto a truck with maximum profit")]
pub struct OptimizerArgs {
    /// CSV file holding the truck capacity
    pub truck: PathBuf,
    /// CSV file holding the pallets (id, weight, profit)
    pub pallets: PathBuf,
    /// Result file (profit, weight and selected pallet ids)
    pub output: PathBuf,
    /// ILP backend solving the knapsack program
    #[arg(short, long, value_enum, default_value_t)]
    pub backend: BackendKind,
    /// Fail instead of writing a result when the solver does not prove
    /// optimality
    #[arg(long)]
    pub require_optimal: bool,
    /// Also write a performance report for this run
    #[arg(short, long, value_name = "FILE")]
    pub report: Option<PathBuf>,
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

/// Validated optimizer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerConfig {
    /// Truck CSV.
    pub truck: PathBuf,
    /// Pallets CSV.
    pub pallets: PathBuf,
    /// Result file.
    pub output: PathBuf,
    /// Selected backend.
    pub backend: BackendKind,
    /// Whether a non-optimal status aborts the run.
    pub require_optimal: bool,
    /// Optional performance report destination.
    pub report: Option<PathBuf>,
}

impl OptimizerConfig {
    /// Fold the parsed arguments into a config, rejecting outputs that
    /// would overwrite an input.
    pub fn from_cli(args: &OptimizerArgs) -> Result<OptimizerConfig> {
        let outputs = std::iter::once(&args.output).chain(args.report.as_ref());
        for output in outputs {
            if output == &args.truck || output == &args.pallets {
                bail!("output {} would overwrite an input file", output.display());
            }
        }
        if args.report.as_ref() == Some(&args.output) {
            bail!("result file and report must differ");
        }
        Ok(OptimizerConfig {
            truck: args.truck.clone(),
            pallets: args.pallets.clone(),
            output: args.output.clone(),
            backend: args.backend,
            require_optimal: args.require_optimal,
            report: args.report.clone(),
        })
    }
}

/// Command line of the performance visualizer.
#[derive(Parser, Debug)]
#[command(author, version, about = "Plot a performance comparison of packing algorithms")]
pub struct VisualizerArgs {
    /// JSON performance report
    pub report: PathBuf,
    /// Label used in chart titles and file names
    pub dataset_label: String,
    /// Directory the charts are written to
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

/// Validated visualizer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizerConfig {
    /// JSON performance report.
    pub report: PathBuf,
    /// Label used in chart titles and file names.
    pub dataset_label: String,
    /// Output directory.
    pub out_dir: PathBuf,
}

impl VisualizerConfig {
    /// Fold the parsed arguments into a config. The label is used verbatim
    /// in file names, so it must not contain path separators.
    pub fn from_cli(args: &VisualizerArgs) -> Result<VisualizerConfig> {
        let label = &args.dataset_label;
        if label.contains(['/', '\\']) {
            bail!("dataset label {label:?} must not contain path separators");
        }
        Ok(VisualizerConfig {
            report: args.report.clone(),
            dataset_label: label.clone(),
            out_dir: args.out_dir.clone(),
        })
    }
}

/// Parse the command line of `T`.
///
/// Usage errors are printed and exit with status 1; `--help` and
/// `--version` exit with status 0.
pub fn parse_args<T: Parser>() -> T {
    T::try_parse().unwrap_or_else(|err| {
        let status = if err.use_stderr() { 1 } else { 0 };
        let _ = err.print();
        std::process::exit(status);
    })
}

/// Initialise `env_logger` at the level selected by `-v`/`-q`.
pub fn init_logging<L: LogLevel>(verbosity: &Verbosity<L>) {
    env_logger::Builder::new()
        .filter_level(verbosity.log_level_filter())
        .init();
}
