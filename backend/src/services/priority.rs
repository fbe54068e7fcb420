//! Priority scoring service
//!
//! Thin request-scoped wrapper around the shared scoring pipeline:
//! maps structural table errors onto the application error surface and
//! logs run outcomes.

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};
use shared::{score_table, ScoreReport};

/// Scoring service: one call scores one uploaded table to completion.
/// Invocations share no state and are safe to run concurrently.
#[derive(Clone, Default)]
pub struct PriorityService;

impl PriorityService {
    /// Create a new PriorityService instance
    pub fn new() -> Self {
        Self
    }

    /// Run the scoring pipeline on raw table bytes as of `today`.
    pub fn run(&self, file_bytes: &[u8], today: NaiveDate) -> AppResult<ScoreReport> {
        // Structural failures (too few columns, unreadable input) are
        // client-facing validation errors; rows are never dropped here.
        let report = score_table(file_bytes, today)
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        tracing::info!(
            total_raw = report.stats.total_raw,
            scored = report.stats.total_scored,
            dropped = report.stats.dropped,
            "priority scoring run complete"
        );

        Ok(report)
    }
}
