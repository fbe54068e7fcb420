//! End-to-end scoring pipeline: raw table bytes in, scored rows and
//! summary statistics out.
//!
//! The pipeline is a pure, single-pass transform. Structural problems
//! (too few columns, unreadable input) fail the whole batch; rows missing
//! required fields are excluded individually and counted.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::models::scoring::score_visit;
use crate::models::visit::{PriorityLabel, ScoredVisit, VisitRecord};
use crate::types::Cell;
use crate::validation::has_required_scoring_fields;

/// Structural failure that aborts a whole scoring run.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Sheet must have at least {required} columns, found {found}")]
    TooFewColumns { required: usize, found: usize },

    #[error("Unreadable sheet: {0}")]
    Unreadable(#[from] csv::Error),
}

/// Full result of one scoring run
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    /// Scored rows, ordered by ascending rank
    pub rows: Vec<ScoredVisit>,
    pub stats: ScoreStats,
}

/// Aggregate statistics for one scoring run
#[derive(Debug, Clone, Serialize)]
pub struct ScoreStats {
    pub urgent: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total_scored: usize,
    pub total_raw: usize,
    pub dropped: usize,
    /// Evaluation month as a human-readable "Month Year" label
    pub current_month: String,
}

/// Run the full pipeline on raw CSV bytes.
///
/// `today` fixes the evaluation date so identical input always produces
/// identical output.
pub fn score_table(file_bytes: &[u8], today: NaiveDate) -> Result<ScoreReport, TableError> {
    let visits = map_columns(file_bytes)?;
    let total_raw = visits.len();

    // Drop rows lacking required scoring inputs
    let valid: Vec<VisitRecord> = visits
        .into_iter()
        .filter(has_required_scoring_fields)
        .collect();
    let dropped = total_raw - valid.len();

    let current_month = today.month();
    let mut rows: Vec<ScoredVisit> = valid
        .into_iter()
        .map(|visit| {
            let scores = score_visit(&visit, current_month);
            let total = scores.total();
            ScoredVisit {
                visit,
                rank: 0,
                label: PriorityLabel::from_score(total),
                total,
                scores,
            }
        })
        .collect();

    // Competition ("min") rank: 1 + count of strictly higher totals.
    // Rows with equal totals share a rank.
    let totals: Vec<f64> = rows.iter().map(|r| r.total).collect();
    for row in &mut rows {
        row.rank = 1 + totals.iter().filter(|&&t| t > row.total).count() as u32;
    }
    // Stable sort keeps input order among equal totals
    rows.sort_by_key(|r| r.rank);

    let stats = ScoreStats {
        urgent: count_label(&rows, PriorityLabel::Urgent),
        high: count_label(&rows, PriorityLabel::High),
        medium: count_label(&rows, PriorityLabel::Medium),
        low: count_label(&rows, PriorityLabel::Low),
        total_scored: rows.len(),
        total_raw,
        dropped,
        current_month: month_year_label(today),
    };

    Ok(ScoreReport { rows, stats })
}

/// Read the raw table and map columns to named fields strictly by
/// position.
///
/// The first record under the header is a secondary sub-label row and is
/// skipped; `total_raw` counts everything after it.
fn map_columns(file_bytes: &[u8]) -> Result<Vec<VisitRecord>, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(file_bytes);

    let found = reader.headers()?.len();
    if found < VisitRecord::FIELD_COUNT {
        return Err(TableError::TooFewColumns {
            required: VisitRecord::FIELD_COUNT,
            found,
        });
    }

    let mut visits = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cells = (0..VisitRecord::FIELD_COUNT)
            .map(|i| Cell::parse(record.get(i).unwrap_or("")))
            .collect();
        visits.push(VisitRecord::from_cells(cells));
    }
    if !visits.is_empty() {
        visits.remove(0);
    }
    Ok(visits)
}

fn count_label(rows: &[ScoredVisit], label: PriorityLabel) -> usize {
    rows.iter().filter(|r| r.label == label).count()
}

/// Human-readable "Month Year" label, e.g. "August 2026"
fn month_year_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}
