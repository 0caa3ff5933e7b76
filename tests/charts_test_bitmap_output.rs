use std::fs;

use pallet_packing::{
    charts::{generate_charts, BitmapSink},
    performance_report::read_report,
};
mod common;
use common::*;

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn png_names(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_four_charts_without_accuracy() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("performance_graphs");
    let report = read_report(&fixture("performance_two_runs.json")).unwrap();
    let paths = generate_charts(&report, "1", &BitmapSink::new(&out_dir)).unwrap();

    assert_eq!(paths.len(), 4);
    assert_eq!(
        png_names(&out_dir),
        [
            "execution_time_dataset_1.png",
            "performance_summary_dataset_1.png",
            "performance_tradeoff_dataset_1.png",
            "profit_comparison_dataset_1.png",
        ]
    );
    for path in paths {
        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes[..8], PNG_MAGIC);
    }
}

#[test]
fn test_five_charts_with_accuracy() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("graphs");
    let report = read_report(&fixture("performance_with_accuracy.json")).unwrap();
    let paths = generate_charts(&report, "7", &BitmapSink::new(&out_dir)).unwrap();

    assert_eq!(paths.len(), 5);
    assert!(out_dir.join("accuracy_comparison_dataset_7.png").is_file());
    assert_eq!(png_names(&out_dir).len(), 5);
}

#[test]
fn test_existing_files_are_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let stale = write_file(dir.path(), "profit_comparison_dataset_1.png", "stale");
    let report = read_report(&fixture("performance_two_runs.json")).unwrap();
    generate_charts(&report, "1", &BitmapSink::new(dir.path())).unwrap();
    assert_eq!(fs::read(stale).unwrap()[..8], PNG_MAGIC);
}
