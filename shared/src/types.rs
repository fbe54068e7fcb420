//! Common types used across the platform

use serde::{Serialize, Serializer};

use crate::models::scoring::round2;

/// A single spreadsheet cell after ingestion.
///
/// Cells are typed at parse time so that downstream scoring and
/// serialization never have to re-inspect raw strings: a cell is either
/// missing, a finite number, or free text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing value (blank cell or a literal "nan")
    Empty,
    /// Finite numeric value
    Number(f64),
    /// Anything else, trimmed
    Text(String),
}

impl Cell {
    /// Parse a raw spreadsheet cell into a typed value.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
            return Cell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Cell::Number(n),
            _ => Cell::Text(trimmed.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Numeric view of the cell, if it holds a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String view of the cell, as a spreadsheet user would read it.
    ///
    /// Integer-valued numbers render without a decimal point so that a
    /// cell ingested as `15` or `15.0` compares identically.
    pub fn render(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) if n.is_nan() => None,
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            Cell::Number(n) => Some(n.to_string()),
            Cell::Text(t) => Some(t.clone()),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

/// JSON-safe serialization: missing cells become empty strings,
/// integer-valued numbers become plain integers, other numbers are
/// rounded to two decimals. No NaN or Infinity can reach the wire.
impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Cell::Empty => serializer.serialize_str(""),
            Cell::Number(n) if !n.is_finite() => serializer.serialize_str(""),
            Cell::Number(n) => {
                let rounded = round2(*n);
                if rounded.fract() == 0.0 && rounded.abs() < 1e15 {
                    serializer.serialize_i64(rounded as i64)
                } else {
                    serializer.serialize_f64(rounded)
                }
            }
            Cell::Text(t) => serializer.serialize_str(t),
        }
    }
}
