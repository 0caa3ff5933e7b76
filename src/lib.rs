#![warn(missing_docs)]
//! Load pallets onto a truck so that the total profit is maximal.
//!
//! The library models the 0/1 knapsack problem of choosing pallets
//! (id, weight, profit) for a truck of fixed capacity, hands it to an
//! integer linear programming backend and writes the selection back out.
//! A second part turns performance comparisons of packing algorithms into
//! charts.
//!
//! The default backend is the pure Rust `microlp` solver. Building with the
//! `gurobi` feature adds a backend using a local Gurobi installation
//! (9.0 or higher, with `GUROBI_HOME` set and a valid license).
//!
//! The crate ships 3 executables:
//! - `pallet_packing <truck_csv> <pallets_csv> <output_txt>` solves one dataset,
//! - `performance_visualizer <performance_json> <dataset_label>` renders the
//!   comparison charts into `performance_graphs/`,
//! - `dataset_generator --config <json>` writes synthetic datasets.
//!
//! Example
//! ```rust
//! use pallet_packing::csv_parser;
//! use pallet_packing::result_writer;
//! use pallet_packing::solver;
//! # use std::path::Path;
//! # use anyhow::Result;
//!
//! fn example() -> Result<()> {
//!     // truck csv: header "Capacity,Pallets", then e.g. "100,8"
//!     // pallet csv: header "Pallet,Weight,Profit", then one row per pallet
//!     let dataset = csv_parser::load_dataset(
//!         Path::new("truck.csv"),
//!         Path::new("pallets.csv"),
//!     )?;
//!
//!     let solution = solver::solve(&dataset, &solver::MicroLpBackend)?;
//!     if !solution.status.is_optimal() {
//!         // the assignment is still usable, but not proven optimal
//!         println!("status: {}", solution.status);
//!     }
//!
//!     // three lines: total profit, total weight, selected ids
//!     result_writer::write_solution(Path::new("output.txt"), &solution)?;
//!     Ok(())
//! }
//! ```

/// Chart composition and rendering for performance reports.
pub mod charts;

/// Command line arguments and validated settings of the executables.
pub mod config;

/// Reading truck and pallet csv files.
pub mod csv_parser;

/// Data structures shared by the optimizer and the visualizer.
pub mod datastructures;

/// Reading and writing performance reports.
pub mod performance_report;

/// Writing and reading result files.
pub mod result_writer;

/// The knapsack program and the ILP backends solving it.
pub mod solver;
