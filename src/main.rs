use anyhow::Result;
use log::{debug, info, warn};
use std::time::Instant;

use pallet_packing::config::{self, OptimizerArgs, OptimizerConfig};
use pallet_packing::csv_parser;
use pallet_packing::datastructures::*;
use pallet_packing::performance_report;
use pallet_packing::result_writer;
use pallet_packing::solver;

fn main() -> Result<()> {
    let args: OptimizerArgs = config::parse_args();
    config::init_logging(&args.verbosity);
    let config = OptimizerConfig::from_cli(&args)?;

    let dataset = csv_parser::load_dataset(&config.truck, &config.pallets)?;
    info!(
        "Loaded {} pallets with capacity {}",
        dataset.len(),
        dataset.capacity
    );
    debug!("{dataset}");

    let backend = config.backend.backend()?;
    info!("Solving knapsack problem using {}...", backend.name());
    let start = Instant::now();
    let solution = solver::solve(&dataset, backend.as_ref())?;
    let execution_time = start.elapsed().as_secs_f64() * 1000.0;

    info!("Solver status: {}", solution.status);
    if config.require_optimal {
        solver::require_optimal(&solution)?;
    } else if !solution.status.is_optimal() {
        warn!(
            "{} did not prove optimality, writing its assignment anyway",
            backend.name()
        );
    }
    info!("Selected {} pallets", solution.selected_pallets.len());
    info!(
        "Total profit: {}, Total weight: {}",
        solution.total_profit, solution.total_weight
    );

    result_writer::write_solution(&config.output, &solution)?;
    info!("Result written to {}", config.output.display());

    if let Some(report_path) = &config.report {
        let report = PerformanceReport {
            capacity: dataset.capacity as f64,
            algorithms: vec![AlgorithmRun {
                name: format!(
                    "ILP ({}) - Integer Linear Programming",
                    backend.name()
                ),
                execution_time,
                total_profit: solution.total_profit as f64,
                total_weight: solution.total_weight as f64,
            }],
            accuracy: Vec::new(),
        };
        performance_report::write_report(report_path, &report)?;
        info!("Performance report written to {}", report_path.display());
    }

    info!("Knapsack solving completed successfully!");
    Ok(())
}
