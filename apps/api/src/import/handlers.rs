use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::import::{parse_text_blocking, UploadedDocument};
use crate::parser::ParsedResumeFields;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Serialize)]
pub struct ImportResponse {
    pub fields: ParsedResumeFields,
    pub backend: &'static str,
}

#[derive(Deserialize)]
pub struct TextImportRequest {
    pub raw_text: String,
}

/// POST /api/v1/import/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let mut document = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(String::from);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        document = Some(UploadedDocument {
            file_name,
            content_type,
            bytes,
        });
        break;
    }

    let document = document
        .ok_or_else(|| AppError::Validation(format!("Missing multipart field '{FILE_FIELD}'")))?;

    let fields = state.parser.parse(&document).await?;
    info!(
        "Imported '{}' via {} backend: {} jobs, {} education entries",
        document.file_name,
        state.parser.backend_name(),
        fields.experiences.len(),
        fields.education.len()
    );

    Ok(Json(ImportResponse {
        fields,
        backend: state.parser.backend_name(),
    }))
}

/// POST /api/v1/import/text
pub async fn handle_import_text(
    State(state): State<AppState>,
    Json(req): Json<TextImportRequest>,
) -> Result<Json<ImportResponse>, AppError> {
    let fields = parse_text_blocking(req.raw_text, state.tuning.clone()).await?;
    Ok(Json(ImportResponse {
        fields,
        backend: "heuristic",
    }))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}
