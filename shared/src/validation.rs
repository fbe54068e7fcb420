//! Validation utilities for the Mantri Priority Platform
//!
//! Centralizes the sentinel-value checks shared by the row validator and
//! the factor scorers, so "empty-ish" means the same thing everywhere.

use crate::models::VisitRecord;
use crate::types::Cell;

/// Sentinel strings that mark a required field as missing.
const BLANK_TOKENS: &[&str] = &["", "nan", "-", "none", "0", "pending"];

/// Sentinel strings that mark a day counter as unscored. Narrower than
/// [`BLANK_TOKENS`]: a literal 0 days is a valid, scorable counter.
const UNSCORED_DAY_TOKENS: &[&str] = &["", "-", "nan", "pending"];

/// True when a raw string is one of the blank sentinels after
/// trimming and lowercasing.
pub fn is_blank_token(raw: &str) -> bool {
    let s = raw.trim().to_lowercase();
    BLANK_TOKENS.contains(&s.as_str())
}

/// True when a cell carries no usable value for scoring.
pub fn is_missing(cell: &Cell) -> bool {
    match cell {
        Cell::Empty => true,
        Cell::Number(n) => n.is_nan() || *n == 0.0,
        Cell::Text(t) => is_blank_token(t),
    }
}

/// Parse an elapsed-day counter, treating sentinel values and unparsable
/// text as unscored.
pub fn parse_day_count(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Empty => None,
        Cell::Number(n) if n.is_nan() => None,
        Cell::Number(n) => Some(*n),
        Cell::Text(t) => {
            let s = t.trim().to_lowercase();
            if UNSCORED_DAY_TOKENS.contains(&s.as_str()) {
                return None;
            }
            s.parse::<f64>().ok()
        }
    }
}

/// A visit can be scored only when all six scoring-relevant fields carry
/// real values: delivery period, dispatch days, holder tier, current
/// business, cooperative-member nature, and support level.
pub fn has_required_scoring_fields(visit: &VisitRecord) -> bool {
    !is_missing(&visit.delivery_period)
        && !is_missing(&visit.dispatch_days)
        && !is_missing(&visit.holder_tier)
        && !is_missing(&visit.current_business)
        && !is_missing(&visit.nature_sabhasad)
        && !is_missing(&visit.support)
}
