//! Distance frequency histograms over an offset collection.
//!
//! Chessboard distances are bucketed at full precision. Euclidean distances
//! are rounded to the nearest integer first (ties to even), so the two
//! histograms are deliberately asymmetric.

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use crate::point::{Metric, Point};

/// Distance → number of points, iterated in ascending distance order.
pub type Histogram = BTreeMap<OrderedFloat<f64>, usize>;

/// Bucket key of a point under `metric`.
pub fn histogram_key(p: Point, metric: Metric) -> f64 {
    let d = p.distance_to_origin(metric);
    match metric {
        Metric::Chessboard => d,
        Metric::Euclidean => d.round_ties_even(),
    }
}

pub fn histogram(points: &[Point], metric: Metric) -> Histogram {
    points.iter().fold(Histogram::new(), |mut hist, &p| {
        *hist.entry(OrderedFloat(histogram_key(p, metric))).or_default() += 1;
        hist
    })
}

/// Number of points at distance `>= threshold` under `metric`.
pub fn far_count(points: &[Point], metric: Metric, threshold: f64) -> usize {
    points
        .iter()
        .filter(|p| p.distance_to_origin(metric) >= threshold)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn counts(hist: &Histogram) -> Vec<(f64, usize)> {
        hist.iter().map(|(k, &v)| (k.0, v)).collect()
    }

    #[test]
    fn euclidean_keys_are_rounded() {
        let pts = [Point::new(3, 4), Point::new(1, 1), Point::new(0, -10)];
        let hist = histogram(&pts, Metric::Euclidean);
        // |(1, 1)| = 1.414… → 1
        assert_eq!(counts(&hist), vec![(1.0, 1), (5.0, 1), (10.0, 1)]);
    }

    #[test]
    fn chessboard_keys_keep_fractions() {
        let pts = [Point::new(2.5, 1), Point::new(-2.5, 2), Point::new(0, 3)];
        let hist = histogram(&pts, Metric::Chessboard);
        assert_eq!(counts(&hist), vec![(2.5, 2), (3.0, 1)]);
    }

    #[test]
    fn euclidean_half_rounds_to_even() {
        assert_eq!(histogram_key(Point::new(2.5, 0), Metric::Euclidean), 2.0);
        assert_eq!(histogram_key(Point::new(3.5, 0), Metric::Euclidean), 4.0);
    }

    #[test]
    fn empty_collection_gives_empty_histogram() {
        assert!(histogram(&[], Metric::Chessboard).is_empty());
    }

    #[test]
    fn far_count_is_inclusive() {
        let pts = [Point::new(23, 0), Point::new(22.5, -22.5), Point::new(-30, 4)];
        assert_eq!(far_count(&pts, Metric::Chessboard, 23.0), 2);
        assert_eq!(far_count(&pts, Metric::Euclidean, 23.0), 3);
    }

    proptest! {
        #[test]
        fn histogram_counts_sum_to_len(
            coords in proptest::collection::vec((-60.0f64..60.0, -60.0f64..60.0), 0..200)
        ) {
            let pts: Vec<Point> = coords.into_iter().map(|(x, y)| Point::new(x, y)).collect();
            for metric in Metric::ALL {
                let total: usize = histogram(&pts, metric).values().sum();
                prop_assert_eq!(total, pts.len());
            }
        }
    }
}
