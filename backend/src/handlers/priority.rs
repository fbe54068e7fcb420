//! HTTP handlers for the priority scoring endpoints

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::services::PriorityService;
use crate::AppState;
use shared::ScoreReport;

#[derive(Debug, Deserialize)]
pub struct RunParams {
    /// Score the bundled sample dataset instead of an upload
    #[serde(default)]
    pub use_sample: bool,
}

/// Run the Mantri priority scoring pipeline on an uploaded table or the
/// bundled sample dataset.
pub async fn run_priority(
    State(state): State<AppState>,
    Query(params): Query<RunParams>,
    multipart: Option<Multipart>,
) -> AppResult<Json<ScoreReport>> {
    let file_bytes = if params.use_sample {
        let path = &state.config.data.sample_path;
        tokio::fs::read(path)
            .await
            .map_err(|_| AppError::NotFound(format!("Sample data file at {}", path)))?
    } else if let Some(multipart) = multipart {
        read_upload(multipart).await?
    } else {
        return Err(AppError::BadRequest(
            "Please upload a CSV file or set use_sample=true".to_string(),
        ));
    };

    let service = PriorityService::new();
    let report = service.run(&file_bytes, Utc::now().date_naive())?;
    Ok(Json(report))
}

/// Pull the uploaded table out of the multipart body.
async fn read_upload(mut multipart: Multipart) -> AppResult<Vec<u8>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid upload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        if !filename.to_lowercase().ends_with(".csv") {
            return Err(AppError::UnsupportedFile(
                "Only .csv files are supported".to_string(),
            ));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid upload: {}", e)))?;
        return Ok(bytes.to_vec());
    }

    Err(AppError::BadRequest(
        "Please upload a CSV file or set use_sample=true".to_string(),
    ))
}
