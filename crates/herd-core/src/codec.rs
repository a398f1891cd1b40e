//! Text encoding of points and quote-aware field splitting for the
//! delimited files the pipeline stages exchange.
//!
//! Canonical point form: `(x, y)`, each coordinate in Rust's shortest
//! round-trip float notation (`3.0`, `-10.5`, `1e-7`). The quoted form
//! wraps it in double quotes so it can sit inside a comma-delimited row.
//!
//! Grammar accepted on decode (surrounding whitespace ignored):
//! ```text
//! quoted   := '"' ws point ws '"'
//! point    := '(' ws number ws ',' ws number ws ')'
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{HerdError, Result};
use crate::point::Point;

/// Render one coordinate in the canonical notation.
pub fn format_coord(v: f64) -> String {
    format!("{v:?}")
}

impl Point {
    /// `(x, y)`
    pub fn encode(&self) -> String {
        format!("({}, {})", format_coord(self.x), format_coord(self.y))
    }

    /// `"(x, y)"`, safe to embed as a single field of a comma-delimited row.
    pub fn encode_quoted(&self) -> String {
        format!("\"{}\"", self.encode())
    }

    pub fn decode(text: &str) -> Result<Point> {
        parse_point(text, text.trim())
    }

    pub fn decode_quoted(text: &str) -> Result<Point> {
        let s = text.trim();
        let inner = s
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .ok_or_else(|| malformed(text, "expected surrounding double quotes"))?;
        parse_point(text, inner.trim())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Point {
    type Err = HerdError;

    fn from_str(s: &str) -> Result<Self> {
        Point::decode(s)
    }
}

fn malformed(text: &str, reason: &'static str) -> HerdError {
    HerdError::MalformedEncoding {
        text: text.to_string(),
        reason,
    }
}

/// `original` is only used for error messages; `s` is already trimmed.
fn parse_point(original: &str, s: &str) -> Result<Point> {
    let body = s
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| malformed(original, "expected '(' and ')' around the coordinates"))?;
    let (first, second) = body
        .split_once(',')
        .ok_or_else(|| malformed(original, "expected a comma between the coordinates"))?;
    Ok(Point {
        x: parse_coord(original, first)?,
        y: parse_coord(original, second)?,
    })
}

fn parse_coord(original: &str, token: &str) -> Result<f64> {
    let v: f64 = token
        .trim()
        .parse()
        .map_err(|_| malformed(original, "coordinate is not a number"))?;
    if !v.is_finite() {
        return Err(malformed(original, "coordinate is not finite"));
    }
    Ok(v)
}

/// Split one delimited row into raw fields.
///
/// Leading spaces of every field are skipped. A field opening with `"`
/// runs to the next `"` and keeps its quotes, so commas inside it are not
/// separators; only spaces may follow the closing quote. Unquoted fields
/// run to the next comma with trailing whitespace removed.
pub fn split_fields(line: &str, line_no: usize) -> Result<Vec<&str>> {
    let row_err = |reason: &str| HerdError::MalformedRow {
        line: line_no,
        reason: reason.to_string(),
    };

    let bytes = line.as_bytes();
    let mut fields = Vec::new();
    let mut i = 0;
    loop {
        while i < bytes.len() && bytes[i] == b' ' {
            i += 1;
        }
        let start = i;
        if i < bytes.len() && bytes[i] == b'"' {
            let close = line[i + 1..]
                .find('"')
                .map(|off| i + 1 + off)
                .ok_or_else(|| row_err("unterminated quoted field"))?;
            fields.push(&line[start..=close]);
            i = close + 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i < bytes.len() && bytes[i] != b',' {
                return Err(row_err("unexpected text after closing quote"));
            }
        } else {
            while i < bytes.len() && bytes[i] != b',' {
                i += 1;
            }
            fields.push(line[start..i].trim_end());
        }
        if i >= bytes.len() {
            break;
        }
        // Skip the comma.
        i += 1;
    }
    Ok(fields)
}
