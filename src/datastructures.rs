use core::fmt;
use std::collections::HashSet;

use anyhow::{bail, Result};
use itertools::Itertools;
use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

/// Number of pallets shown in the dataset summary.
const SUMMARY_ROWS: usize = 5;

/// A pallet that can be loaded onto the truck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Pallet {
    /// Identifier, unique within a dataset.
    pub id: i64,
    /// Weight counted against the truck capacity.
    pub weight: u64,
    /// Profit gained when the pallet is loaded.
    pub profit: u64,
}

impl Pallet {
    /// Create a new pallet.
    pub fn new(id: i64, weight: u64, profit: u64) -> Self {
        Self { id, weight, profit }
    }

    /// Profit per unit of weight, infinite for weightless pallets.
    pub fn ratio(&self) -> f64 {
        self.profit as f64 / self.weight as f64
    }
}

/// Truck capacity and the pallets available for one packing run.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Maximum total weight the truck can carry.
    pub capacity: u64,
    /// Pallets in input order.
    pub pallets: Vec<Pallet>,
}

impl Dataset {
    /// Create a dataset, rejecting duplicate pallet ids.
    pub fn new(capacity: u64, pallets: Vec<Pallet>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(pallets.len());
        if let Some(duplicate) = pallets.iter().find(|p| !seen.insert(p.id)) {
            bail!("pallet id {} occurs more than once", duplicate.id);
        }
        Ok(Self { capacity, pallets })
    }

    /// Number of pallets.
    pub fn len(&self) -> usize {
        self.pallets.len()
    }

    /// Whether the dataset contains no pallets.
    pub fn is_empty(&self) -> bool {
        self.pallets.is_empty()
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Truck Capacity: {}", self.capacity)?;
        writeln!(f, "Number of Pallets: {}", self.pallets.len())?;
        writeln!(
            f,
            "{:<10}{:<10}{:<10}{:<15}",
            "ID", "Weight", "Profit", "Profit/Weight"
        )?;
        writeln!(f, "{}", "-".repeat(45))?;
        for pallet in self.pallets.iter().take(SUMMARY_ROWS) {
            writeln!(
                f,
                "{:<10}{:<10}{:<10}{:<15.4}",
                pallet.id,
                pallet.weight,
                pallet.profit,
                pallet.ratio()
            )?;
        }
        if self.pallets.len() > SUMMARY_ROWS {
            writeln!(
                f,
                "... and {} more pallets",
                self.pallets.len() - SUMMARY_ROWS
            )?;
        }
        Ok(())
    }
}

/// Outcome reported by an ILP backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// A provably optimal assignment was found.
    Optimal,
    /// The backend stopped before reaching a conclusion.
    NotSolved,
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The objective can grow without bound.
    Unbounded,
    /// The backend reported something else.
    Undefined,
}

impl SolveStatus {
    /// Whether the assignment is a proven optimum.
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SolveStatus::Optimal => "Optimal",
            SolveStatus::NotSolved => "Not Solved",
            SolveStatus::Infeasible => "Infeasible",
            SolveStatus::Unbounded => "Unbounded",
            SolveStatus::Undefined => "Undefined",
        };
        f.write_str(label)
    }
}

/// The pallets picked for the truck.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Ids of the loaded pallets, in input order.
    pub selected_pallets: Vec<i64>,
    /// Sum of the profits of the loaded pallets.
    pub total_profit: u64,
    /// Sum of the weights of the loaded pallets.
    pub total_weight: u64,
    /// Status the backend reported for the assignment.
    pub status: SolveStatus,
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Status: {}", self.status)?;
        writeln!(f, "Total Profit: {}", self.total_profit)?;
        writeln!(f, "Total Weight: {}", self.total_weight)?;
        write!(
            f,
            "Selected Pallets: {}",
            self.selected_pallets.iter().join(", ")
        )
    }
}

/// One algorithm execution in a performance comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmRun {
    /// Algorithm name, optionally followed by `" - "` and a complexity note.
    pub name: String,
    /// Wall clock time in milliseconds.
    pub execution_time: f64,
    /// Profit of the returned packing.
    pub total_profit: f64,
    /// Weight of the returned packing.
    pub total_weight: f64,
}

/// Performance comparison of several algorithms on one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Truck capacity of the dataset.
    #[serde(default = "default_capacity")]
    pub capacity: f64,
    /// Runs in the order they should be plotted.
    pub algorithms: Vec<AlgorithmRun>,
    /// Accuracy in percent of the optimal profit, keyed by algorithm name.
    #[serde(
        default,
        deserialize_with = "deserialize_accuracy",
        serialize_with = "serialize_accuracy",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub accuracy: Vec<(String, f64)>,
}

fn default_capacity() -> f64 {
    100.0
}

struct AccuracyVisitor;

impl<'de> Visitor<'de> for AccuracyVisitor {
    type Value = Vec<(String, f64)>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping from algorithm name to accuracy percentage")
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_some<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_map(self)
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut map: A,
    ) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<String, f64>()? {
            entries.push(entry);
        }
        Ok(entries)
    }
}

// Keeps the key order of the document, serde_json maps would sort it.
fn deserialize_accuracy<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<(String, f64)>, D::Error> {
    deserializer.deserialize_option(AccuracyVisitor)
}

fn serialize_accuracy<S: Serializer>(
    accuracy: &[(String, f64)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(accuracy.len()))?;
    for (name, value) in accuracy {
        map.serialize_entry(name, value)?;
    }
    map.end()
}
