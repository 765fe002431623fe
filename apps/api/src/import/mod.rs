//! Résumé import: uploaded document → pre-filled form fields.
//!
//! The backend is pluggable. [`HeuristicParser`] extracts text locally and runs
//! the in-process heuristics; [`apilayer::ApiLayerParser`] forwards the file to
//! the APILayer résumé parser. Handlers only see `Arc<dyn ResumeParser>`.

pub mod apilayer;
pub mod docx;
pub mod extraction;
pub mod handlers;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::import::extraction::{extract_text, DocumentFormat};
use crate::parser::{parse_resume, ParsedResumeFields, ParserTuning};

/// A file received from the upload endpoint.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Carried in `AppState` as `Arc<dyn ResumeParser>`. Selected by `PARSER_BACKEND`.
#[async_trait]
pub trait ResumeParser: Send + Sync {
    async fn parse(&self, document: &UploadedDocument) -> Result<ParsedResumeFields, AppError>;

    fn backend_name(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicParser: default, fully local
// ────────────────────────────────────────────────────────────────────────────

pub struct HeuristicParser {
    tuning: ParserTuning,
}

impl HeuristicParser {
    pub fn new(tuning: ParserTuning) -> Self {
        Self { tuning }
    }
}

#[async_trait]
impl ResumeParser for HeuristicParser {
    async fn parse(&self, document: &UploadedDocument) -> Result<ParsedResumeFields, AppError> {
        let format = DocumentFormat::detect(&document.file_name, document.content_type.as_deref())?;
        info!(
            "Parsing upload '{}' ({}, {} bytes)",
            document.file_name,
            format.as_str(),
            document.bytes.len()
        );

        let bytes = document.bytes.clone();
        let tuning = self.tuning.clone();
        tokio::task::spawn_blocking(move || -> Result<ParsedResumeFields, AppError> {
            let text = extract_text(format, &bytes)?;
            Ok(parse_resume(&text, &tuning))
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in import: {e}")))?
    }

    fn backend_name(&self) -> &'static str {
        "heuristic"
    }
}

/// Parses already-extracted text off the async executor.
pub async fn parse_text_blocking(
    raw_text: String,
    tuning: ParserTuning,
) -> Result<ParsedResumeFields, AppError> {
    if raw_text.trim().is_empty() {
        return Err(AppError::EmptyExtraction);
    }
    tokio::task::spawn_blocking(move || parse_resume(&raw_text, &tuning))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in import: {e}")))
}
