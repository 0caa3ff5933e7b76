use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::datastructures::Solution;

/// The three values stored in a result file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionSummary {
    /// First line.
    pub total_profit: u64,
    /// Second line.
    pub total_weight: u64,
    /// Third line, empty when nothing was selected.
    pub selected_pallets: Vec<i64>,
}

impl From<&Solution> for SolutionSummary {
    fn from(solution: &Solution) -> Self {
        Self {
            total_profit: solution.total_profit,
            total_weight: solution.total_weight,
            selected_pallets: solution.selected_pallets.clone(),
        }
    }
}

/// Write total profit, total weight and the space separated selected ids as
/// three lines.
pub fn write_solution(path: &Path, solution: &Solution) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "{}", solution.total_profit)?;
    writeln!(out, "{}", solution.total_weight)?;
    writeln!(out, "{}", solution.selected_pallets.iter().join(" "))?;
    out.flush()
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Parse a file produced by [`write_solution`].
pub fn read_solution(path: &Path) -> Result<SolutionSummary> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut lines = content.lines();
    let mut next_line = |what: &str| {
        lines
            .next()
            .with_context(|| format!("{} is missing the {what} line", path.display()))
    };
    let total_profit: u64 = next_line("profit")?
        .trim()
        .parse()
        .with_context(|| format!("invalid profit in {}", path.display()))?;
    let total_weight: u64 = next_line("weight")?
        .trim()
        .parse()
        .with_context(|| format!("invalid weight in {}", path.display()))?;
    let selected_pallets = next_line("selection")?
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<Vec<i64>, _>>()
        .with_context(|| format!("invalid pallet id in {}", path.display()))?;
    Ok(SolutionSummary {
        total_profit,
        total_weight,
        selected_pallets,
    })
}
