//! Extraction stage: turns each collection directory of scenario entity
//! exports into `{collection}.csv` (one row per map: name, reference, satellites).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use herd_core::extract::extract_collection;
use herd_core::layout::collection_dir;
use herd_core::{AnalysisConfig, CollectionPaths, JsonEntitySource};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "extract",
    about = "Extract reference and satellite positions into per-collection CSV files"
)]
struct Args {
    /// Root directory holding one sub-directory of entity JSON files per collection.
    #[arg(short, long, default_value = "data/scenarios")]
    input_dir: PathBuf,

    /// Directory receiving `{collection}.csv`.
    #[arg(short, long, default_value = "data/out")]
    output_dir: PathBuf,

    /// Collection to process (repeatable). Defaults to every sub-directory of the input root.
    #[arg(short, long)]
    collection: Vec<String>,

    /// JSON analysis config (reference kind, satellite kinds, ...).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip maps without exactly one reference entity, or whose file name
    /// cannot be stored as a record name, instead of aborting.
    #[arg(long)]
    skip_invalid: bool,
}

// ── Collection discovery ──────────────────────────────────────────────────────

fn discover_collections(input_dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(input_dir)
        .with_context(|| format!("reading input_dir {}", input_dir.display()))?
    {
        let entry = entry?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = AnalysisConfig::load_or_default(args.config.as_deref())?;

    let collections = if args.collection.is_empty() {
        discover_collections(&args.input_dir)?
    } else {
        args.collection.clone()
    };
    if collections.is_empty() {
        bail!("no collections found under {}", args.input_dir.display());
    }

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;

    for name in &collections {
        let dir = collection_dir(&args.input_dir, name);
        let dataset = extract_collection(&dir, &JsonEntitySource, &config, args.skip_invalid)
            .with_context(|| format!("extracting collection {name}"))?;
        let paths = CollectionPaths::new(&args.output_dir, name);
        dataset.save_csv(&paths.dataset)?;
        println!(
            "{name}: {} maps, {} satellites -> {}",
            dataset.len(),
            dataset.satellite_count(),
            paths.dataset.display()
        );
    }
    Ok(())
}
