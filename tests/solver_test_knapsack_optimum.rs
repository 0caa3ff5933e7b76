use pallet_packing::{
    datastructures::SolveStatus,
    solver::{solve, MicroLpBackend},
};
mod common;
use common::*;
use test_case::test_case;

#[test]
fn test_knapsack_optimum() {
    let dataset = load_fixture("truck_medium.csv", "pallets_medium.csv");
    let solution = solve(&dataset, &MicroLpBackend).unwrap();
    assert_eq!(solution.status, SolveStatus::Optimal);
    assert_eq!(solution.total_profit, 450);
    assert_eq!(solution.total_weight, 100);
    assert_eq!(solution.selected_pallets, vec![1, 2, 4, 6, 8]);
}

#[test_case(10, &[1, 2], 20, 10 ; "fills the truck exactly")]
#[test_case(0, &[], 0, 0 ; "zero capacity")]
#[test_case(4, &[3], 6, 4 ; "only the light pallet fits")]
#[test_case(14, &[1, 2, 3], 26, 14 ; "everything fits")]
#[test_case(3, &[], 0, 0 ; "nothing fits")]
fn test_small_capacities(capacity: u64, ids: &[i64], profit: u64, weight: u64) {
    let dataset = dataset(capacity, &[(1, 5, 10), (2, 5, 10), (3, 4, 6)]);
    let solution = solve(&dataset, &MicroLpBackend).unwrap();
    assert_eq!(solution.status, SolveStatus::Optimal);
    assert_eq!(solution.selected_pallets, ids);
    assert_eq!(solution.total_profit, profit);
    assert_eq!(solution.total_weight, weight);
}

#[test_case(50, &[2, 6, 8], 230 ; "half capacity")]
#[test_case(60, &[1, 2, 6, 8], 290 ; "sixty")]
#[test_case(75, &[1, 2, 4, 8], 340 ; "three quarters")]
fn test_medium_capacities(capacity: u64, ids: &[i64], profit: u64) {
    let mut dataset = load_fixture("truck_medium.csv", "pallets_medium.csv");
    dataset.capacity = capacity;
    let solution = solve(&dataset, &MicroLpBackend).unwrap();
    assert_eq!(solution.selected_pallets, ids);
    assert_eq!(solution.total_profit, profit);
    assert_eq!(solution.total_weight, capacity);
}

#[test]
fn test_weightless_pallet_is_always_loaded() {
    let dataset = dataset(0, &[(4, 3, 9), (9, 0, 5)]);
    let solution = solve(&dataset, &MicroLpBackend).unwrap();
    assert_eq!(solution.selected_pallets, vec![9]);
    assert_eq!(solution.total_profit, 5);
    assert_eq!(solution.total_weight, 0);
}

#[test]
fn test_selection_keeps_input_order() {
    let dataset = dataset(100, &[(30, 1, 1), (-2, 1, 1), (7, 1, 1)]);
    let solution = solve(&dataset, &MicroLpBackend).unwrap();
    assert_eq!(solution.selected_pallets, vec![30, -2, 7]);
}
