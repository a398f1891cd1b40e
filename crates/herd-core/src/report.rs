//! Per-collection statistics report.
//! Text rendering follows the layout of the original study printouts;
//! the same data serialises to JSON for downstream tooling.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::codec::format_coord;
use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::error::{HerdError, Result};
use crate::point::{Metric, Point};
use crate::stats::{
    far_count, histogram, summarize, threshold_survival, DistanceSummary, Histogram,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub distance: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivalRow {
    pub threshold: u32,
    pub records: usize,
}

/// Statistics of one collection. `records` and `survival` need record
/// boundaries and are absent when the report is built from a flat offset file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionReport {
    pub collection: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
    pub satellites: usize,
    pub chess_histogram: Vec<HistogramBin>,
    pub euclid_histogram: Vec<HistogramBin>,
    pub chess: Option<DistanceSummary>,
    pub euclid: Option<DistanceSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub survival: Option<Vec<SurvivalRow>>,
    pub far_threshold: f64,
    pub far_satellites: usize,
}

fn bins(hist: Histogram) -> Vec<HistogramBin> {
    hist.into_iter()
        .map(|(distance, count)| HistogramBin {
            distance: distance.into_inner(),
            count,
        })
        .collect()
}

impl CollectionReport {
    pub fn build(dataset: &Dataset, config: &AnalysisConfig) -> Self {
        let survival = threshold_survival(&dataset.offset_rows(), config.survival_range())
            .into_iter()
            .map(|(threshold, records)| SurvivalRow { threshold, records })
            .collect();
        Self {
            records: Some(dataset.len()),
            survival: Some(survival),
            ..Self::from_offsets(&dataset.name, &dataset.offsets(), config)
        }
    }

    /// Report over an already flattened offset collection. Only the
    /// per-satellite statistics are available.
    pub fn from_offsets(collection: &str, offsets: &[Point], config: &AnalysisConfig) -> Self {
        Self {
            collection: collection.to_string(),
            records: None,
            satellites: offsets.len(),
            chess_histogram: bins(histogram(offsets, Metric::Chessboard)),
            euclid_histogram: bins(histogram(offsets, Metric::Euclidean)),
            chess: summarize(offsets, Metric::Chessboard),
            euclid: summarize(offsets, Metric::Euclidean),
            survival: None,
            far_threshold: config.far_threshold,
            far_satellites: far_count(offsets, Metric::Chessboard, config.far_threshold),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| HerdError::json(&self.collection, e))
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?).map_err(|e| HerdError::io(path, e))?;
        log::info!("wrote report for {} to {}", self.collection, path.display());
        Ok(())
    }
}

impl fmt::Display for CollectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.records {
            Some(records) => writeln!(
                f,
                "{} ({} records, {} satellites)",
                self.collection, records, self.satellites
            )?,
            None => writeln!(f, "{} ({} satellites)", self.collection, self.satellites)?,
        }
        writeln!(f, "{}", Metric::Chessboard.label())?;
        for bin in &self.chess_histogram {
            writeln!(f, "{}: {}", format_coord(bin.distance), bin.count)?;
        }
        // Euclidean keys are whole numbers.
        writeln!(f, "{}", Metric::Euclidean.label())?;
        for bin in &self.euclid_histogram {
            writeln!(f, "{}: {}", bin.distance, bin.count)?;
        }
        let summaries = [
            (Metric::Chessboard, &self.chess),
            (Metric::Euclidean, &self.euclid),
        ];
        for (metric, summary) in summaries {
            match summary {
                Some(s) => writeln!(
                    f,
                    "{} - min: {}, max: {}, avg: {}",
                    metric.label(),
                    format_coord(s.min),
                    format_coord(s.max),
                    format_coord(s.avg)
                )?,
                None => writeln!(f, "{} - no satellites", metric.label())?,
            }
        }
        if let Some(survival) = &self.survival {
            writeln!(f, "survival")?;
            for row in survival {
                writeln!(f, "{}: {}", row.threshold, row.records)?;
            }
        }
        write!(
            f,
            "far ({} >= {}): {}",
            Metric::Chessboard.label(),
            format_coord(self.far_threshold),
            self.far_satellites
        )
    }
}
