use serde::Serialize;

use crate::point::{Metric, Point};

/// Minimum, maximum, and mean distance of an offset collection under one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceSummary {
    pub metric: Metric,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// Single pass over `points`. The mean is folded online as
/// `avg' = (n·avg + d) / (n + 1)`. Returns `None` for an empty collection.
pub fn summarize(points: &[Point], metric: Metric) -> Option<DistanceSummary> {
    points
        .iter()
        .map(|p| p.distance_to_origin(metric))
        .enumerate()
        .fold(None, |acc: Option<DistanceSummary>, (n, d)| {
            Some(match acc {
                None => DistanceSummary {
                    metric,
                    count: 1,
                    min: d,
                    max: d,
                    avg: d,
                },
                Some(s) => DistanceSummary {
                    metric,
                    count: n + 1,
                    min: s.min.min(d),
                    max: s.max.max(d),
                    avg: (n as f64 * s.avg + d) / (n + 1) as f64,
                },
            })
        })
}
