/// Planar point type and the two distance metrics used throughout the analysis.
/// Coordinates are tile units on the map grid, stored as f64.
use serde::{Deserialize, Serialize};

/// Distance metric measured from the origin of a reference-centred frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// max(|x|, |y|), the L∞ norm.
    Chessboard,
    /// sqrt(x² + y²), the L2 norm.
    Euclidean,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Chessboard, Metric::Euclidean];

    /// Short label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Chessboard => "chess",
            Metric::Euclidean => "euclid",
        }
    }
}

/// An immutable 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Build a point from any pair of values losslessly convertible to f64
    /// (all integer types up to 32 bits, f32 and f64).
    pub fn new(x: impl Into<f64>, y: impl Into<f64>) -> Self {
        Self { x: x.into(), y: y.into() }
    }

    pub fn distance_to_origin(self, metric: Metric) -> f64 {
        match metric {
            Metric::Chessboard => self.x.abs().max(self.y.abs()),
            Metric::Euclidean => self.x.hypot(self.y),
        }
    }

    /// This point expressed in a frame centred on `reference`.
    pub fn translate(self, reference: Point) -> Point {
        Point {
            x: self.x - reference.x,
            y: self.y - reference.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn accepts_integer_and_float_components() {
        assert_eq!(Point::new(3, -4), Point { x: 3.0, y: -4.0 });
        assert_eq!(Point::new(1.5f32, 2u8), Point { x: 1.5, y: 2.0 });
    }

    #[test]
    fn distances_of_three_four_point() {
        let p = Point::new(3, -4);
        assert_eq!(p.distance_to_origin(Metric::Chessboard), 4.0);
        assert_relative_eq!(p.distance_to_origin(Metric::Euclidean), 5.0);
    }

    #[test]
    fn origin_has_zero_distance() {
        for metric in Metric::ALL {
            assert_eq!(Point::ORIGIN.distance_to_origin(metric), 0.0);
        }
    }

    #[test]
    fn translate_subtracts_reference() {
        let p = Point::new(13, 14).translate(Point::new(10, 10));
        assert_eq!(p, Point::new(3, 4));
    }

    proptest! {
        #[test]
        fn translate_componentwise(
            px in -1e6f64..1e6, py in -1e6f64..1e6,
            rx in -1e6f64..1e6, ry in -1e6f64..1e6,
        ) {
            let p = Point::new(px, py);
            let r = Point::new(rx, ry);
            let t = p.translate(r);
            prop_assert_eq!(t.x, px - rx);
            prop_assert_eq!(t.y, py - ry);
            prop_assert_eq!(p.translate(p), Point::ORIGIN);
        }

        #[test]
        fn chessboard_never_exceeds_euclidean(x in -1e6f64..1e6, y in -1e6f64..1e6) {
            let p = Point::new(x, y);
            let chess = p.distance_to_origin(Metric::Chessboard);
            let euclid = p.distance_to_origin(Metric::Euclidean);
            prop_assert!(chess >= 0.0);
            prop_assert!(chess <= euclid);
        }
    }
}
