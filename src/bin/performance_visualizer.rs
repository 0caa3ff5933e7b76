use anyhow::Result;
use log::{info, warn};

use pallet_packing::charts::{self, BitmapSink};
use pallet_packing::config::{self, VisualizerArgs, VisualizerConfig};
use pallet_packing::performance_report;

fn main() -> Result<()> {
    let args: VisualizerArgs = config::parse_args();
    config::init_logging(&args.verbosity);
    let config = VisualizerConfig::from_cli(&args)?;

    let report = performance_report::read_report(&config.report)?;
    if report.algorithms.is_empty() {
        warn!("{} contains no algorithm runs", config.report.display());
    }
    info!(
        "Generating performance visualizations for Dataset {}...",
        config.dataset_label
    );
    let sink = BitmapSink::new(&config.out_dir);
    let files = charts::generate_charts(&report, &config.dataset_label, &sink)?;
    info!(
        "All visualizations generated successfully! Created {} files in {}",
        files.len(),
        sink.out_dir().display()
    );
    Ok(())
}
