use anyhow::Result;
use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables,
    ResolutionError, Solution as _, SolverModel, Variable,
};
use log::warn;
use ndarray::Array1;

use super::{Assignment, BinaryProgram, IlpBackend};
use crate::datastructures::SolveStatus;

/// Backend running the pure Rust `microlp` solver through `good_lp`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpBackend;

impl IlpBackend for MicroLpBackend {
    fn name(&self) -> &str {
        "microlp"
    }

    fn solve(&self, program: &BinaryProgram) -> Result<Assignment> {
        let n = program.num_variables();
        if n == 0 {
            return Ok(Assignment::zeros(0, SolveStatus::Optimal));
        }

        let mut vars = ProblemVariables::new();
        let x: Vec<Variable> = (0..n)
            .map(|j| vars.add(variable().binary().name(format!("x_{j}"))))
            .collect();

        let objective: Expression = x
            .iter()
            .zip(program.objective.iter())
            .map(|(&var, &coefficient)| var * coefficient)
            .sum();

        let model = program
            .constraints
            .rows()
            .into_iter()
            .zip(program.bounds.iter())
            .fold(vars.maximise(objective).using(microlp), |model, (row, &bound)| {
                let lhs: Expression = x
                    .iter()
                    .zip(row.iter())
                    .map(|(&var, &coefficient)| var * coefficient)
                    .sum();
                model.with(constraint!(lhs <= bound))
            });

        match model.solve() {
            Ok(solution) => Ok(Assignment {
                values: Array1::from_iter(x.iter().map(|&var| solution.value(var))),
                status: SolveStatus::Optimal,
            }),
            Err(ResolutionError::Infeasible) => {
                Ok(Assignment::zeros(n, SolveStatus::Infeasible))
            }
            Err(ResolutionError::Unbounded) => {
                Ok(Assignment::zeros(n, SolveStatus::Unbounded))
            }
            Err(err) => {
                warn!("microlp gave up on {}: {err}", program.name);
                Ok(Assignment::zeros(n, SolveStatus::NotSolved))
            }
        }
    }
}
