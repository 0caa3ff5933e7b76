use std::time::Instant;

use anyhow::Result;
use clap::ValueEnum;
use itertools::izip;
use log::{debug, info};
use ndarray::{Array1, Array2};
use thiserror::Error;

use crate::datastructures::{Dataset, Pallet, SolveStatus, Solution};

#[cfg(feature = "gurobi")]
mod gurobi;
mod microlp;

#[cfg(test)]
mod tests;

#[cfg(feature = "gurobi")]
pub use gurobi::GurobiBackend;
pub use microlp::MicroLpBackend;

/// Variables at or below this value count as "not selected".
const SELECTION_THRESHOLD: f64 = 0.5;

/// Errors the optimizer reports as distinct kinds.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The backend finished without proving optimality.
    #[error("solver finished with status {0}")]
    NotOptimal(SolveStatus),
    /// The requested backend was not compiled into this binary.
    #[error("backend {0} is not available, rebuild with `--features {0}`")]
    BackendUnavailable(&'static str),
}

/// A 0/1 program: maximise `objective · x` subject to
/// `constraints · x <= bounds` with every `x_j` binary.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryProgram {
    /// Model name handed to the backend.
    pub name: String,
    /// Objective coefficient per variable.
    pub objective: Array1<f64>,
    /// One row per constraint, one column per variable.
    pub constraints: Array2<f64>,
    /// Right hand side per constraint.
    pub bounds: Array1<f64>,
}

impl BinaryProgram {
    /// Number of decision variables.
    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }
}

/// Variable values and status returned by a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Value per decision variable, in program order.
    pub values: Array1<f64>,
    /// Status reported by the backend.
    pub status: SolveStatus,
}

impl Assignment {
    /// An all-zero assignment, used when the backend has no values.
    pub fn zeros(num_variables: usize, status: SolveStatus) -> Self {
        Self {
            values: Array1::zeros(num_variables),
            status,
        }
    }
}

/// An external solver able to handle [`BinaryProgram`]s.
pub trait IlpBackend {
    /// Short name used in logs and reports.
    fn name(&self) -> &str;

    /// Solve the program without printing solver output.
    fn solve(&self, program: &BinaryProgram) -> Result<Assignment>;
}

/// Backends selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BackendKind {
    /// Pure Rust branch and bound solver.
    #[default]
    Microlp,
    /// Gurobi, needs the `gurobi` feature and a license.
    Gurobi,
}

impl BackendKind {
    /// Instantiate the backend.
    pub fn backend(self) -> Result<Box<dyn IlpBackend>> {
        match self {
            BackendKind::Microlp => Ok(Box::new(MicroLpBackend)),
            #[cfg(feature = "gurobi")]
            BackendKind::Gurobi => Ok(Box::new(GurobiBackend)),
            #[cfg(not(feature = "gurobi"))]
            BackendKind::Gurobi => {
                Err(SolveError::BackendUnavailable("gurobi").into())
            }
        }
    }
}

/// Build the knapsack program for a dataset: one binary variable per pallet,
/// profits as objective and a single capacity row over the weights.
pub fn build_program(dataset: &Dataset) -> BinaryProgram {
    let n = dataset.pallets.len();
    let objective =
        Array1::from_iter(dataset.pallets.iter().map(|p| p.profit as f64));
    let constraints = Array2::from_shape_fn((1, n), |(_, j)| {
        dataset.pallets[j].weight as f64
    });
    BinaryProgram {
        name: "pallet_packing_knapsack".to_string(),
        objective,
        constraints,
        bounds: Array1::from_elem(1, dataset.capacity as f64),
    }
}

/// Turn backend values into a [`Solution`].
///
/// Values above one half count as selected, so solver noise around 0 and 1
/// is tolerated. The assignment is used as-is whatever the status.
pub fn extract_solution(pallets: &[Pallet], assignment: &Assignment) -> Solution {
    let selected = izip!(pallets, assignment.values.iter())
        .filter(|(_, &value)| value > SELECTION_THRESHOLD)
        .map(|(pallet, _)| pallet)
        .collect::<Vec<_>>();
    Solution {
        selected_pallets: selected.iter().map(|p| p.id).collect(),
        total_profit: selected.iter().map(|p| p.profit).sum(),
        total_weight: selected.iter().map(|p| p.weight).sum(),
        status: assignment.status,
    }
}

/// Solve the knapsack problem for `dataset` with `backend`.
pub fn solve(dataset: &Dataset, backend: &dyn IlpBackend) -> Result<Solution> {
    let program = build_program(dataset);
    debug!(
        "solving {} with {} variables using {}",
        program.name,
        program.num_variables(),
        backend.name()
    );
    let start = Instant::now();
    let assignment = backend.solve(&program)?;
    info!(
        "{} finished in {:.3} ms",
        backend.name(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(extract_solution(&dataset.pallets, &assignment))
}

/// Fail with [`SolveError::NotOptimal`] unless the status is optimal.
pub fn require_optimal(solution: &Solution) -> Result<(), SolveError> {
    if solution.status.is_optimal() {
        Ok(())
    } else {
        Err(SolveError::NotOptimal(solution.status))
    }
}
