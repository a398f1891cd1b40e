//! Aggregation stage: distance histograms, min/max/avg per metric, and the
//! threshold survival sweep for each collection.
//!
//! Works from `{collection}.csv` by default because the survival count needs
//! per-map grouping. `--source offsets` or `--source columns` reads the
//! flattened files instead and reports the per-satellite statistics only.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use herd_core::offsets::{load_columns, load_offsets};
use herd_core::{AnalysisConfig, CollectionPaths, CollectionReport, Dataset};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "report",
    about = "Print distance statistics for one or more collections"
)]
struct Args {
    /// Directory holding the stage outputs of each collection.
    #[arg(short, long, default_value = "data/out")]
    data_dir: PathBuf,

    /// Collection to analyse (repeatable).
    #[arg(short, long, required = true)]
    collection: Vec<String>,

    /// Which stage output to read.
    #[arg(long, value_enum, default_value_t = Source::Dataset)]
    source: Source,

    /// JSON analysis config (survival range, far threshold).
    #[arg(long)]
    config: Option<PathBuf>,

    /// First survival threshold, overriding the config.
    #[arg(long)]
    survival_min: Option<u32>,

    /// Last survival threshold, overriding the config.
    #[arg(long)]
    survival_max: Option<u32>,

    /// Also write `{collection}-report.json`.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Source {
    /// `{collection}.csv`, with record boundaries.
    Dataset,
    /// `{collection}-offsets.csv`.
    Offsets,
    /// `{collection}-columns.csv`.
    Columns,
}

// ── Config ────────────────────────────────────────────────────────────────────

/// Config file (or defaults) with the command-line survival range applied.
fn resolve_config(args: &Args) -> Result<AnalysisConfig> {
    let mut config = AnalysisConfig::load_or_default(args.config.as_deref())?;
    if let Some(min) = args.survival_min {
        config.survival_min = min;
    }
    if let Some(max) = args.survival_max {
        config.survival_max = max;
    }
    config.validate()?;
    Ok(config)
}

fn build_report(
    source: Source,
    name: &str,
    paths: &CollectionPaths,
    config: &AnalysisConfig,
) -> Result<CollectionReport> {
    let context = |path: &Path| format!("loading {}", path.display());
    Ok(match source {
        Source::Dataset => {
            let dataset = Dataset::load_csv(name, &paths.dataset)
                .with_context(|| format!("loading collection {name}"))?;
            CollectionReport::build(&dataset, config)
        }
        Source::Offsets => {
            let offsets =
                load_offsets(&paths.offsets).with_context(|| context(&paths.offsets))?;
            CollectionReport::from_offsets(name, &offsets, config)
        }
        Source::Columns => {
            let offsets =
                load_columns(&paths.columns).with_context(|| context(&paths.columns))?;
            CollectionReport::from_offsets(name, &offsets, config)
        }
    })
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = resolve_config(&args)?;

    for (i, name) in args.collection.iter().enumerate() {
        let paths = CollectionPaths::new(&args.data_dir, name);
        let report = build_report(args.source, name, &paths, &config)?;
        if i > 0 {
            println!();
        }
        println!("{report}");
        if args.json {
            report.save_json(&paths.report)?;
            eprintln!("  -> {}", paths.report.display());
        }
    }
    Ok(())
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let base = ["report", "--collection", "og"];
        Args::try_parse_from(base.iter().chain(extra).copied()).unwrap()
    }

    #[test]
    fn survival_flags_override_defaults() {
        let flags = ["--survival-min", "5", "--survival-max", "8"];
        let config = resolve_config(&args(&flags)).unwrap();
        assert_eq!(config.survival_range(), 5..=8);
        assert_eq!(config.far_threshold, AnalysisConfig::default().far_threshold);
    }

    #[test]
    fn single_flag_keeps_the_other_bound() {
        let config = resolve_config(&args(&["--survival-max", "30"])).unwrap();
        assert_eq!(config.survival_range(), 12..=30);
    }

    #[test]
    fn inverted_range_from_flags_is_rejected() {
        assert!(resolve_config(&args(&["--survival-min", "50"])).is_err());
        let inverted = ["--survival-min", "9", "--survival-max", "3"];
        assert!(resolve_config(&args(&inverted)).is_err());
    }

    #[test]
    fn source_defaults_to_dataset() {
        assert_eq!(args(&[]).source, Source::Dataset);
        assert_eq!(args(&["--source", "columns"]).source, Source::Columns);
        assert!(Args::try_parse_from(["report", "-c", "og", "--source", "json"]).is_err());
    }
}
