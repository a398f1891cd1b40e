//! Records, datasets, and the dataset CSV format.
//!
//! One line per record:
//! ```text
//! name, "(rx, ry)", "(sx1, sy1)", "(sx2, sy2)", ...
//! ```
//! The satellite count varies from line to line; lines are never padded.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codec::split_fields;
use crate::error::{HerdError, Result};
use crate::point::Point;

/// One source map: its reference point and satellite points in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub reference: Point,
    pub satellites: Vec<Point>,
}

impl Record {
    pub fn new(name: impl Into<String>, reference: Point, satellites: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            reference,
            satellites,
        }
    }

    /// Names are written as the first, unquoted field of a CSV row, so they
    /// must be non-empty and free of commas, quotes, and edge whitespace.
    pub fn validate_name(name: &str) -> Result<()> {
        let reason = if name.is_empty() {
            "name is empty"
        } else if name.contains(',') {
            "name contains a comma"
        } else if name.contains('"') {
            "name contains a double quote"
        } else if name.trim() != name {
            "name has leading or trailing whitespace"
        } else if name.contains(|c| c == '\n' || c == '\r') {
            "name contains a line break"
        } else {
            return Ok(());
        };
        Err(HerdError::InvalidRecordName {
            record: name.to_string(),
            reason,
        })
    }

    /// Satellites in the reference-centred frame.
    pub fn offsets(&self) -> Vec<Point> {
        self.satellites
            .iter()
            .map(|s| s.translate(self.reference))
            .collect()
    }

    fn parse_line(line: &str, line_no: usize) -> Result<Record> {
        let fields = split_fields(line, line_no)?;
        let [name, reference, satellites @ ..] = fields.as_slice() else {
            return Err(HerdError::MalformedRow {
                line: line_no,
                reason: "expected a name and a reference point".into(),
            });
        };
        if name.is_empty() || name.starts_with('"') {
            return Err(HerdError::MalformedRow {
                line: line_no,
                reason: "record name must be a bare token".into(),
            });
        }
        Ok(Record {
            name: name.to_string(),
            reference: Point::decode_quoted(reference)?,
            satellites: satellites
                .iter()
                .map(|s| Point::decode_quoted(s))
                .collect::<Result<_>>()?,
        })
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.reference.encode_quoted())?;
        for s in &self.satellites {
            write!(f, ", {}", s.encode_quoted())?;
        }
        Ok(())
    }
}

/// A named collection of records analysed together.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn satellite_count(&self) -> usize {
        self.records.iter().map(|r| r.satellites.len()).sum()
    }

    /// Flattened offset collection: record order, then satellite order.
    pub fn offsets(&self) -> Vec<Point> {
        self.records.iter().flat_map(Record::offsets).collect()
    }

    /// Offsets grouped per record, for analyses that need record boundaries.
    pub fn offset_rows(&self) -> Vec<Vec<Point>> {
        self.records.iter().map(Record::offsets).collect()
    }

    pub fn to_csv_string(&self) -> String {
        self.records
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Parse dataset CSV text. Blank lines are ignored.
    pub fn from_csv_str(name: impl Into<String>, text: &str) -> Result<Dataset> {
        let records = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| Record::parse_line(line, i + 1))
            .collect::<Result<Vec<_>>>()?;
        Ok(Dataset::new(name, records))
    }

    pub fn load_csv(name: impl Into<String>, path: &Path) -> Result<Dataset> {
        let text = std::fs::read_to_string(path).map_err(|e| HerdError::io(path, e))?;
        let dataset = Dataset::from_csv_str(name, &text)?;
        log::debug!("read {} records from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    pub fn save_csv(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_csv_string()).map_err(|e| HerdError::io(path, e))?;
        log::info!("wrote {} records to {}", self.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::scenario;

    #[test]
    fn offsets_flatten_in_record_order() {
        let ds = scenario();
        assert_eq!(
            ds.offsets(),
            vec![Point::new(3, 4), Point::new(3, 4), Point::new(0, -10)]
        );
        assert_eq!(ds.satellite_count(), 3);
    }

    #[test]
    fn offset_rows_keep_record_boundaries() {
        let rows = scenario().offset_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec![Point::new(3, 4), Point::new(0, -10)]);
        assert!(rows[2].is_empty());
    }

    #[test]
    fn csv_lines_are_not_padded() {
        let csv = scenario().to_csv_string();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "r1, \"(0.0, 0.0)\", \"(3.0, 4.0)\"");
        assert_eq!(
            lines[1],
            "r2, \"(10.0, 10.0)\", \"(13.0, 14.0)\", \"(10.0, 0.0)\""
        );
        assert_eq!(lines[2], "r3, \"(0.0, 0.0)\"");
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn csv_text_parses_back() {
        let ds = scenario();
        let parsed = Dataset::from_csv_str("scenario", &ds.to_csv_string()).unwrap();
        assert_eq!(parsed, ds);
    }

    #[test]
    fn parses_rows_written_by_other_tools() {
        let text = "map_7, \"(60.5, 60.5)\", \"(70.0, 61.0)\"\r\n\n";
        let ds = Dataset::from_csv_str("og", text).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].name, "map_7");
        assert_eq!(ds.records[0].satellites, vec![Point::new(70, 61)]);
    }

    #[test]
    fn names_that_cannot_round_trip_are_rejected() {
        for bad in ["", "map,1", "say\"hi\"", " m", "m ", "a\nb"] {
            let err = Record::validate_name(bad).unwrap_err();
            assert!(matches!(err, HerdError::InvalidRecordName { .. }), "{bad:?}");
        }
        Record::validate_name("map_01-b").unwrap();
    }

    #[test]
    fn row_without_reference_is_rejected() {
        let err = Dataset::from_csv_str("x", "lonely").unwrap_err();
        assert!(matches!(err, HerdError::MalformedRow { line: 1, .. }));
    }

    #[test]
    fn garbage_point_fails_loudly() {
        let err = Dataset::from_csv_str("x", "m, \"(1.0, 2.0)\", \"(oops)\"").unwrap_err();
        assert!(matches!(err, HerdError::MalformedEncoding { .. }));
    }
}
