#![allow(dead_code)]
use std::{
    fs,
    path::{Path, PathBuf},
};

use pallet_packing::{
    csv_parser,
    datastructures::{Dataset, Pallet},
};

/// Absolute path of a file in `data/test`.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("data/test")
        .join(name)
}

pub fn load_fixture(truck: &str, pallets: &str) -> Dataset {
    csv_parser::load_dataset(&fixture(truck), &fixture(pallets)).unwrap()
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

pub fn dataset(capacity: u64, pallets: &[(i64, u64, u64)]) -> Dataset {
    Dataset::new(
        capacity,
        pallets
            .iter()
            .map(|&(id, weight, profit)| Pallet::new(id, weight, profit))
            .collect(),
    )
    .unwrap()
}

/// Best reachable profit, by enumerating every subset.
pub fn brute_force_profit(dataset: &Dataset) -> u64 {
    let n = dataset.pallets.len();
    assert!(n < 20, "too many pallets for enumeration");
    (0u32..1 << n)
        .filter_map(|mask| {
            let chosen = dataset
                .pallets
                .iter()
                .enumerate()
                .filter(|(j, _)| mask & (1 << j) != 0)
                .map(|(_, p)| p);
            let (weight, profit) = chosen
                .fold((0, 0), |(w, p), pallet| (w + pallet.weight, p + pallet.profit));
            (weight <= dataset.capacity).then_some(profit)
        })
        .max()
        .unwrap_or(0)
}
