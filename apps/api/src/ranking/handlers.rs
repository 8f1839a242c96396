//! Axum route handlers for the Ranking API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::documents::extract_text_blocking;
use crate::errors::AppError;
use crate::ranking::batch::{score_batch, ResumeText};
use crate::ranking::report::{render_table, REPORT_FILENAME};
use crate::state::AppState;
use crate::upload::{parse_job_description_form, parse_score_form};

#[derive(Debug, Serialize)]
pub struct CriteriaResponse {
    pub criteria: Vec<String>,
}

/// POST /api/v1/extract-criteria
///
/// Multipart field `file`: a job description (PDF or DOCX).
/// Returns the extracted ranking criteria in order.
pub async fn handle_extract_criteria(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CriteriaResponse>, AppError> {
    let file = parse_job_description_form(multipart).await?;

    let jd_text = extract_text_blocking(&file.filename, file.data).await;
    debug!("Job description text extracted from {}", file.filename);

    let criteria = state.criteria_extractor.extract_criteria(&jd_text).await;
    info!("Extracted {} criteria from {}", criteria.len(), file.filename);

    Ok(Json(CriteriaResponse { criteria }))
}

/// POST /api/v1/score-resumes
///
/// Multipart fields: `criteria` (JSON list of strings, as text or file) and
/// one or more `files` (resumes). Returns a CSV report, one row per resume
/// in upload order.
pub async fn handle_score_resumes(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = parse_score_form(multipart).await?;

    let mut resumes = Vec::with_capacity(form.resumes.len());
    for file in form.resumes {
        debug!("Processing file: {}", file.filename);
        let text = extract_text_blocking(&file.filename, file.data).await;
        resumes.push(ResumeText {
            filename: file.filename,
            text,
        });
    }

    let results = score_batch(
        &state.resume_scorer,
        &form.criteria,
        resumes,
        state.scoring_concurrency,
    )
    .await;

    let csv = render_table(&form.criteria, &results)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={REPORT_FILENAME}"),
            ),
        ],
        csv,
    )
        .into_response())
}
