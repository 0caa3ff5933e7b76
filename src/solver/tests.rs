use anyhow::Result;
use ndarray::{arr1, arr2};

use super::*;
use crate::datastructures::{Dataset, Pallet, SolveStatus};

struct FixedBackend(Assignment);

impl IlpBackend for FixedBackend {
    fn name(&self) -> &str {
        "fixed"
    }

    fn solve(&self, program: &BinaryProgram) -> Result<Assignment> {
        assert_eq!(program.num_variables(), self.0.values.len());
        Ok(self.0.clone())
    }
}

fn small_dataset(capacity: u64) -> Dataset {
    Dataset::new(
        capacity,
        vec![
            Pallet::new(1, 5, 10),
            Pallet::new(2, 5, 10),
            Pallet::new(3, 4, 6),
        ],
    )
    .unwrap()
}

#[test]
fn test_build_program() {
    let program = build_program(&small_dataset(10));
    assert_eq!(program.objective, arr1(&[10.0, 10.0, 6.0]));
    assert_eq!(program.constraints, arr2(&[[5.0, 5.0, 4.0]]));
    assert_eq!(program.bounds, arr1(&[10.0]));
}

#[test]
fn test_simple_knapsack() {
    let solution = solve(&small_dataset(10), &MicroLpBackend).unwrap();
    assert_eq!(
        solution,
        Solution {
            selected_pallets: vec![1, 2],
            total_profit: 20,
            total_weight: 10,
            status: SolveStatus::Optimal,
        }
    );
}

#[test]
fn test_zero_capacity() {
    let solution = solve(&small_dataset(0), &MicroLpBackend).unwrap();
    assert!(solution.selected_pallets.is_empty());
    assert_eq!(solution.total_profit, 0);
    assert_eq!(solution.total_weight, 0);
    assert_eq!(solution.status, SolveStatus::Optimal);
}

#[test]
fn test_empty_dataset() {
    let dataset = Dataset::new(10, vec![]).unwrap();
    let solution = solve(&dataset, &MicroLpBackend).unwrap();
    assert!(solution.selected_pallets.is_empty());
    assert!(solution.status.is_optimal());
}

#[test]
fn test_extract_tolerates_solver_noise() {
    let pallets = small_dataset(10).pallets;
    let assignment = Assignment {
        values: arr1(&[0.999_999_8, 1e-9, 0.51]),
        status: SolveStatus::Optimal,
    };
    let solution = extract_solution(&pallets, &assignment);
    assert_eq!(solution.selected_pallets, vec![1, 3]);
    assert_eq!(solution.total_profit, 16);
    assert_eq!(solution.total_weight, 9);
}

#[test]
fn test_non_optimal_assignment_is_still_extracted() {
    let backend = FixedBackend(Assignment {
        values: arr1(&[1.0, 1.0, 1.0]),
        status: SolveStatus::Infeasible,
    });
    let solution = solve(&small_dataset(10), &backend).unwrap();
    assert_eq!(solution.selected_pallets, vec![1, 2, 3]);
    assert_eq!(solution.total_weight, 14);
    assert_eq!(solution.status.to_string(), "Infeasible");
    assert!(matches!(
        require_optimal(&solution),
        Err(SolveError::NotOptimal(SolveStatus::Infeasible))
    ));
}

#[test]
fn test_require_optimal_accepts_optimum() {
    let solution = solve(&small_dataset(10), &MicroLpBackend).unwrap();
    assert!(require_optimal(&solution).is_ok());
}

#[cfg(not(feature = "gurobi"))]
#[test]
fn test_gurobi_backend_unavailable() {
    let err = BackendKind::Gurobi.backend().err().unwrap();
    assert!(matches!(
        err.downcast_ref::<SolveError>(),
        Some(SolveError::BackendUnavailable("gurobi"))
    ));
}
