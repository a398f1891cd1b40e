//! Flat offset collections on disk.
//!
//! Offset file: one `(x, y)` per line, no header.
//! Columnar file: a two-label header (`a, b` by default) followed by bare
//! `x, y` pairs, the layout plotting tools read directly.

use std::path::Path;

use crate::codec::format_coord;
use crate::error::{HerdError, Result};
use crate::point::Point;

pub fn encode_offsets(points: &[Point]) -> String {
    points
        .iter()
        .map(Point::encode)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn decode_offsets(text: &str) -> Result<Vec<Point>> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(Point::decode)
        .collect()
}

pub fn encode_columns(points: &[Point], labels: &[String; 2]) -> String {
    std::iter::once(format!("{}, {}", labels[0], labels[1]))
        .chain(
            points
                .iter()
                .map(|p| format!("{}, {}", format_coord(p.x), format_coord(p.y))),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a columnar file. The first non-blank line is the header and is skipped.
pub fn decode_columns(text: &str) -> Result<Vec<Point>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .skip(1)
        .map(|(i, line)| {
            let row_err = |reason: &str| HerdError::MalformedRow {
                line: i + 1,
                reason: reason.to_string(),
            };
            let (x, y) = line
                .split_once(',')
                .ok_or_else(|| row_err("expected two comma-separated columns"))?;
            let parse = |s: &str| {
                s.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| row_err("column is not a finite number"))
            };
            Ok(Point::new(parse(x)?, parse(y)?))
        })
        .collect()
}

pub fn save_offsets(path: &Path, points: &[Point]) -> Result<()> {
    std::fs::write(path, encode_offsets(points)).map_err(|e| HerdError::io(path, e))?;
    log::info!("wrote {} offsets to {}", points.len(), path.display());
    Ok(())
}

pub fn load_offsets(path: &Path) -> Result<Vec<Point>> {
    let text = std::fs::read_to_string(path).map_err(|e| HerdError::io(path, e))?;
    decode_offsets(&text)
}

pub fn load_columns(path: &Path) -> Result<Vec<Point>> {
    let text = std::fs::read_to_string(path).map_err(|e| HerdError::io(path, e))?;
    decode_columns(&text)
}

pub fn save_columns(path: &Path, points: &[Point], labels: &[String; 2]) -> Result<()> {
    std::fs::write(path, encode_columns(points, labels)).map_err(|e| HerdError::io(path, e))?;
    log::info!("wrote {} column rows to {}", points.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> [String; 2] {
        ["a".into(), "b".into()]
    }

    #[test]
    fn offset_file_is_one_point_per_line() {
        let pts = vec![Point::new(3, 4), Point::new(0, -10)];
        assert_eq!(encode_offsets(&pts), "(3.0, 4.0)\n(0.0, -10.0)");
        assert_eq!(decode_offsets("(3.0, 4.0)\n(0.0, -10.0)\n").unwrap(), pts);
    }

    #[test]
    fn empty_collection_gives_empty_offset_file() {
        assert_eq!(encode_offsets(&[]), "");
        assert!(decode_offsets("").unwrap().is_empty());
    }

    #[test]
    fn columns_have_header_and_bare_numbers() {
        let pts = vec![Point::new(3, 4), Point::new(-1.5, 0)];
        let text = encode_columns(&pts, &labels());
        assert_eq!(text, "a, b\n3.0, 4.0\n-1.5, 0.0");
        assert_eq!(decode_columns(&text).unwrap(), pts);
    }

    #[test]
    fn columns_header_only() {
        assert_eq!(encode_columns(&[], &labels()), "a, b");
        assert!(decode_columns("a, b").unwrap().is_empty());
    }

    #[test]
    fn bad_column_row_reports_line() {
        let err = decode_columns("a, b\n1.0, 2.0\n3.0").unwrap_err();
        assert!(matches!(err, HerdError::MalformedRow { line: 3, .. }));
    }

    #[test]
    fn bad_offset_line_fails() {
        assert!(decode_offsets("(3.0, 4.0)\n3.0, 4.0").is_err());
    }
}
