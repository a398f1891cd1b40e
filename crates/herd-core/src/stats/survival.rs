//! Threshold survival: how many maps keep every satellite at least `d` away.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use crate::point::{Metric, Point};

/// Threshold → number of surviving records, ascending by threshold.
pub type SurvivalTable = BTreeMap<u32, usize>;

/// For each integer threshold in `thresholds`, count the rows whose every
/// point has Euclidean distance `>= d`.
///
/// Each row is the offsets of one record; grouping matters, a record drops
/// out as soon as its nearest satellite is closer than `d`. A record without
/// satellites survives every threshold.
pub fn threshold_survival(rows: &[Vec<Point>], thresholds: RangeInclusive<u32>) -> SurvivalTable {
    let nearest: Vec<f64> = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|p| p.distance_to_origin(Metric::Euclidean))
                .fold(f64::INFINITY, f64::min)
        })
        .collect();
    thresholds
        .map(|d| {
            let survivors = nearest.iter().filter(|&&m| m >= d as f64).count();
            (d, survivors)
        })
        .collect()
}
