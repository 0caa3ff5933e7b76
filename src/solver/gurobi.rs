use anyhow::Result;
use grb::prelude::*;
use ndarray::Array1;

use super::{Assignment, BinaryProgram, IlpBackend};
use crate::datastructures::SolveStatus;

/// Backend handing the program to Gurobi.
///
/// Requires a Gurobi installation (9.0 or higher) with `GUROBI_HOME` set and a
/// valid [license](http://www.gurobi.com/downloads/licenses/license-center).
#[derive(Debug, Clone, Copy, Default)]
pub struct GurobiBackend;

fn status_from_gurobi(status: Status) -> SolveStatus {
    match status {
        Status::Optimal => SolveStatus::Optimal,
        Status::Infeasible => SolveStatus::Infeasible,
        Status::Unbounded | Status::InfOrUnbd => SolveStatus::Unbounded,
        Status::Loaded | Status::InProgress => SolveStatus::NotSolved,
        _ => SolveStatus::Undefined,
    }
}

impl IlpBackend for GurobiBackend {
    fn name(&self) -> &str {
        "gurobi"
    }

    fn solve(&self, program: &BinaryProgram) -> Result<Assignment> {
        let n = program.num_variables();
        let env = {
            let mut env = Env::empty()?;
            env.set(param::OutputFlag, 0)?;
            env.start()?
        };
        let mut model = Model::with_env(&program.name, &env)?;

        let x = (0..n)
            .map(|j| add_binvar!(model, name: format!("x_{j}").as_str()))
            .collect::<grb::Result<Vec<Var>>>()?;

        for (i, (row, &bound)) in program
            .constraints
            .rows()
            .into_iter()
            .zip(program.bounds.iter())
            .enumerate()
        {
            let lhs = x
                .iter()
                .zip(row.iter())
                .map(|(&var, &coefficient)| var * coefficient)
                .grb_sum();
            model.add_constr(format!("c_{i}").as_str(), c!(lhs <= bound))?;
        }

        let objective = x
            .iter()
            .zip(program.objective.iter())
            .map(|(&var, &coefficient)| var * coefficient)
            .grb_sum();
        model.set_objective(objective, ModelSense::Maximize)?;
        model.optimize()?;

        let status = status_from_gurobi(model.status()?);
        let values = if model.get_attr(attr::SolCount)? > 0 {
            Array1::from(model.get_obj_attr_batch(attr::X, x.iter())?)
        } else {
            Array1::zeros(n)
        };
        Ok(Assignment { values, status })
    }
}
