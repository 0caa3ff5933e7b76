use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::info;
use pallet_packing::{config, datastructures::Pallet};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
struct DatasetGeneratorConfig {
    capacity: u64,
    num_pallets: usize,
    /// Inclusive bounds of the uniform weight distribution
    weight_range: (u64, u64),
    /// Mean profit per unit of weight
    profit_ratio: f64,
    /// Standard deviation of the profit relative to its mean
    profit_std: f64,
    seed: u64,
    truck_out: PathBuf,
    pallets_out: PathBuf,
}

#[derive(Parser)]
#[command(author, version, about = "Generate random truck and pallet csv files")]
struct Args {
    /// Path to the json config
    #[arg(short, long)]
    pub config: PathBuf,
    /// Override the seed of the config
    #[arg(short, long)]
    pub seed: Option<u64>,
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

fn main() -> Result<()> {
    let args: Args = config::parse_args();
    config::init_logging(&args.verbosity);
    let mut config: DatasetGeneratorConfig = serde_json::from_str(
        &fs::read_to_string(&args.config)
            .with_context(|| format!("failed to read {}", args.config.display()))?,
    )
    .with_context(|| format!("invalid generator config {}", args.config.display()))?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let pallets = generate_pallets(&config)?;
    write_dataset(&config, &pallets)?;
    info!(
        "Wrote {} pallets to {} and capacity {} to {}",
        pallets.len(),
        config.pallets_out.display(),
        config.capacity,
        config.truck_out.display()
    );
    Ok(())
}

fn generate_pallets(config: &DatasetGeneratorConfig) -> Result<Vec<Pallet>> {
    let (lo, hi) = config.weight_range;
    if lo > hi {
        bail!("empty weight range [{lo}, {hi}]");
    }
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    (1..=config.num_pallets as i64)
        .map(|id| -> Result<Pallet> {
            let weight = rng.gen_range(lo..=hi);
            let mean = weight as f64 * config.profit_ratio;
            let distrib = Normal::new(mean, (mean * config.profit_std).abs())?;
            let profit = distrib.sample(&mut rng).round().max(1.0) as u64;
            Ok(Pallet::new(id, weight, profit))
        })
        .collect()
}

fn write_dataset(config: &DatasetGeneratorConfig, pallets: &[Pallet]) -> Result<()> {
    let mut truck = csv::Writer::from_path(&config.truck_out)
        .with_context(|| format!("failed to create {}", config.truck_out.display()))?;
    truck.write_record(["Capacity", "Pallets"])?;
    truck.serialize((config.capacity, pallets.len()))?;
    truck.flush()?;

    let mut out = csv::Writer::from_path(&config.pallets_out)
        .with_context(|| format!("failed to create {}", config.pallets_out.display()))?;
    out.write_record(["Pallet", "Weight", "Profit"])?;
    for pallet in pallets {
        out.serialize((pallet.id, pallet.weight, pallet.profit))?;
    }
    out.flush()?;
    Ok(())
}
