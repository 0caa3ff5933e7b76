use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;

use crate::datastructures::{Dataset, Pallet};


fn reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))
}

/// Read the truck capacity from the first field of the first data row.
///
/// The header row is skipped and any further fields are ignored.
pub fn read_capacity(path: &Path) -> Result<u64> {
    let mut rdr = reader(path)?;
    let record = rdr
        .records()
        .next()
        .with_context(|| format!("{} has no data row", path.display()))?
        .with_context(|| format!("malformed row in {}", path.display()))?;
    let field = record
        .get(0)
        .with_context(|| format!("empty data row in {}", path.display()))?;
    let capacity = field.parse::<u64>().with_context(|| {
        format!("invalid capacity {field:?} in {}", path.display())
    })?;
    debug!("read capacity {capacity} from {}", path.display());
    Ok(capacity)
}

/// Read all `(id, weight, profit)` rows following the header row.
///
/// Fields after the third are ignored. A single malformed row fails the
/// whole read.
pub fn read_pallets(path: &Path) -> Result<Vec<Pallet>> {
    let mut rdr = reader(path)?;
    let pallets = rdr
        .records()
        .enumerate()
        .map(|(row, record)| {
            let context =
                || format!("invalid pallet in row {} of {}", row + 2, path.display());
            let fields: StringRecord =
                record.with_context(context)?.iter().take(3).collect();
            let (id, weight, profit) = fields
                .deserialize::<(i64, u64, u64)>(None)
                .with_context(context)?;
            Ok(Pallet::new(id, weight, profit))
        })
        .collect::<Result<Vec<_>>>()?;
    debug!("read {} pallets from {}", pallets.len(), path.display());
    Ok(pallets)
}

/// Load a truck file and a pallet file into a [`Dataset`].
pub fn load_dataset(truck_path: &Path, pallets_path: &Path) -> Result<Dataset> {
    let capacity = read_capacity(truck_path)?;
    let pallets = read_pallets(pallets_path)?;
    Dataset::new(capacity, pallets)
        .with_context(|| format!("invalid pallets in {}", pallets_path.display()))
}
