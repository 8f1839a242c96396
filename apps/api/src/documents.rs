//! Document text extraction for uploaded job descriptions and resumes.
//!
//! Extraction never fails from the caller's point of view: problems come
//! back as a diagnostic string that the ranking pipeline consumes like any
//! other text.

use std::fmt;
use std::io::Write;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, error};

pub const UNSUPPORTED_FORMAT: &str = "Unsupported file format.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Unsupported,
}

impl DocumentKind {
    /// Detects the kind from the file extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            DocumentKind::Pdf
        } else if lower.ends_with(".docx") {
            DocumentKind::Docx
        } else {
            DocumentKind::Unsupported
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Docx => "DOCX",
            DocumentKind::Unsupported => "document",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{0}")]
    Pdf(String),

    #[error("{0}")]
    Docx(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extracts plain text from `data`, or returns a diagnostic string such as
/// `"Error reading PDF: <reason>"` / `"Unsupported file format."`.
pub fn extract_text(data: &[u8], kind: DocumentKind) -> String {
    let extracted = match kind {
        DocumentKind::Pdf => extract_pdf(data),
        DocumentKind::Docx => extract_docx(data),
        DocumentKind::Unsupported => return UNSUPPORTED_FORMAT.to_string(),
    };

    match extracted {
        Ok(text) => {
            debug!("Extracted {} chars from {kind}", text.len());
            text
        }
        Err(e) => {
            error!("Error reading {kind}: {e}");
            format!("Error reading {kind}: {e}")
        }
    }
}

/// Runs `extract_text` on the blocking pool. A panicking parser is reported
/// as a diagnostic string like any other extraction failure.
pub async fn extract_text_blocking(filename: &str, data: Bytes) -> String {
    let kind = DocumentKind::from_filename(filename);

    match tokio::task::spawn_blocking(move || extract_text(&data, kind)).await {
        Ok(text) => text,
        Err(e) => {
            error!("Text extraction task for '{filename}' failed: {e}");
            format!("Error reading {kind}: {e}")
        }
    }
}

fn extract_pdf(data: &[u8]) -> Result<String, DocumentError> {
    pdf_extract::extract_text_from_mem(data).map_err(|e| DocumentError::Pdf(e.to_string()))
}

/// docx-lite reads from a path, so the upload is spilled to a temp file first.
fn extract_docx(data: &[u8]) -> Result<String, DocumentError> {
    let mut file = tempfile::Builder::new().suffix(".docx").tempfile()?;
    file.write_all(data)?;
    file.flush()?;

    docx_lite::extract_text(file.path()).map_err(|e| DocumentError::Docx(e.to_string()))
}
