//! Normalisation stage: reads `{collection}.csv` and writes the reference-centred
//! offsets (`{collection}-offsets.csv`) plus the columnar plotting file
//! (`{collection}-columns.csv`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use herd_core::offsets::{save_columns, save_offsets};
use herd_core::{AnalysisConfig, CollectionPaths, Dataset};

#[derive(Parser, Debug)]
#[command(
    name = "offsets",
    about = "Convert collection CSV files into reference-centred offset files"
)]
struct Args {
    /// Directory holding `{collection}.csv`; outputs are written beside it.
    #[arg(short, long, default_value = "data/out")]
    data_dir: PathBuf,

    /// Collection to convert (repeatable).
    #[arg(short, long, required = true)]
    collection: Vec<String>,

    /// JSON analysis config (column labels).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = AnalysisConfig::load_or_default(args.config.as_deref())?;

    for name in &args.collection {
        let paths = CollectionPaths::new(&args.data_dir, name);
        let dataset = Dataset::load_csv(name.as_str(), &paths.dataset)
            .with_context(|| format!("loading collection {name}"))?;
        let offsets = dataset.offsets();
        save_offsets(&paths.offsets, &offsets)?;
        save_columns(&paths.columns, &offsets, &config.column_labels)?;
        println!(
            "{name}: {} offsets -> {}, {}",
            offsets.len(),
            paths.offsets.display(),
            paths.columns.display()
        );
    }
    Ok(())
}
