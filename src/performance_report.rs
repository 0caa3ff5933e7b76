use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use log::debug;

use crate::datastructures::PerformanceReport;

/// Read a performance report from a json file.
pub fn read_report(path: &Path) -> Result<PerformanceReport> {
    let content = fs::read_to_string(path).with_context(|| {
        format!("performance data file {} not found", path.display())
    })?;
    let report: PerformanceReport = serde_json::from_str(&content)
        .with_context(|| format!("invalid json format in {}", path.display()))?;
    debug!(
        "read {} algorithm runs and {} accuracy entries from {}",
        report.algorithms.len(),
        report.accuracy.len(),
        path.display()
    );
    Ok(report)
}

/// Write a performance report as pretty printed json.
pub fn write_report(path: &Path, report: &PerformanceReport) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, report)
        .with_context(|| format!("failed to write {}", path.display()))?;
    out.flush()
        .with_context(|| format!("failed to write {}", path.display()))
}
