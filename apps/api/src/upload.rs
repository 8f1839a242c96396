use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

/// An uploaded document with its original file name.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Bytes,
}

/// Fields of a `/score-resumes` upload after validation.
#[derive(Debug)]
pub struct ScoreForm {
    pub criteria: Vec<String>,
    pub resumes: Vec<UploadedFile>,
}

/// Reads the single `file` field of a criteria-extraction upload.
pub async fn parse_job_description_form(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" && file.is_none() {
            let filename = field.file_name().unwrap_or("").to_string();
            let data = field.bytes().await.map_err(form_error)?;
            file = Some(UploadedFile { filename, data });
        } else {
            field.bytes().await.map_err(form_error)?;
        }
    }

    let file = file.ok_or_else(|| AppError::Validation("No file provided".to_string()))?;
    if file.filename.is_empty() {
        return Err(AppError::Validation("No selected file".to_string()));
    }

    Ok(file)
}

/// Reads `criteria` (text field or uploaded JSON file) and every `files`
/// part of a scoring upload. Parts with an empty file name are what browsers
/// send for an untouched file input and are skipped.
pub async fn parse_score_form(mut multipart: Multipart) -> Result<ScoreForm, AppError> {
    let mut criteria_json: Option<String> = None;
    let mut resumes: Vec<UploadedFile> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "criteria" => {
                let bytes = field.bytes().await.map_err(form_error)?;
                let text = String::from_utf8(bytes.to_vec()).map_err(|e| {
                    AppError::Validation(format!("Criteria must be UTF-8 text. Error: {e}"))
                })?;
                criteria_json.get_or_insert(text);
            }
            "files" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(form_error)?;
                if filename.is_empty() {
                    continue;
                }
                resumes.push(UploadedFile { filename, data });
            }
            _ => {
                // Ignore unknown fields
                field.bytes().await.map_err(form_error)?;
            }
        }
    }

    let criteria_json =
        criteria_json.ok_or_else(|| AppError::Validation("Criteria not provided".to_string()))?;
    debug!("Received criteria JSON: {criteria_json}");
    let criteria = parse_criteria_json(&criteria_json)?;

    if resumes.is_empty() {
        return Err(AppError::Validation("No resume files provided".to_string()));
    }

    Ok(ScoreForm { criteria, resumes })
}

/// Caller-supplied criteria must be a JSON array of strings.
pub fn parse_criteria_json(raw: &str) -> Result<Vec<String>, AppError> {
    serde_json::from_str::<Vec<String>>(raw).map_err(|e| {
        AppError::Validation(format!("Criteria must be a valid JSON list. Error: {e}"))
    })
}

/// Body-limit breaches keep their 413; everything else is a malformed form.
fn form_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Upload exceeds the configured size limit".to_string())
    } else {
        AppError::Validation(format!("Failed to read form field: {e}"))
    }
}
