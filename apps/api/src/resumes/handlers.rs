use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::resumes::completeness::{compute_resume_stats, ResumeStats};
use crate::resumes::store::DEFAULT_RESUME_NAME;
use crate::resumes::validation::{validate_resume_fields, FieldError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct CreateResumeRequest {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub data: Value,
}

#[derive(Deserialize)]
pub struct UpdateResumeRequest {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub data: Option<Value>,
}

#[derive(Deserialize)]
pub struct DuplicateResumeRequest {
    pub user_id: Uuid,
}

#[derive(Serialize)]
pub struct ResumeResponse {
    pub resume: ResumeRow,
    pub stats: ResumeStats,
    pub field_errors: Vec<FieldError>,
}

impl From<ResumeRow> for ResumeResponse {
    fn from(resume: ResumeRow) -> Self {
        let stats = compute_resume_stats(&resume.data);
        let field_errors = validate_resume_fields(&resume.data);
        Self {
            resume,
            stats,
            field_errors,
        }
    }
}

#[derive(Serialize)]
pub struct ResumeListItem {
    pub resume: ResumeRow,
    pub stats: ResumeStats,
}

fn ensure_object(data: &Value) -> Result<(), AppError> {
    if data.is_object() {
        Ok(())
    } else {
        Err(AppError::Validation("data must be a JSON object".to_string()))
    }
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(req): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeResponse>), AppError> {
    ensure_object(&req.data)?;
    let name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_RESUME_NAME);

    let row = state.store.create(req.user_id, name, req.data).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ResumeListItem>>, AppError> {
    let rows = state.store.list(params.user_id).await?;
    let items = rows
        .into_iter()
        .map(|resume| ResumeListItem {
            stats: compute_resume_stats(&resume.data),
            resume,
        })
        .collect();
    Ok(Json(items))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeResponse>, AppError> {
    let row = state.store.get(params.user_id, id).await?;
    Ok(Json(row.into()))
}

/// PUT /api/v1/resumes/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateResumeRequest>,
) -> Result<Json<ResumeResponse>, AppError> {
    if let Some(data) = &req.data {
        ensure_object(data)?;
    }
    let name = req.name.as_deref().map(str::trim);
    if name == Some("") {
        return Err(AppError::Validation("Resume name must not be empty".to_string()));
    }

    let row = state.store.update(req.user_id, id, name, req.data).await?;
    Ok(Json(row.into()))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    state.store.delete(params.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/resumes/:id/duplicate
pub async fn handle_duplicate_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<DuplicateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeResponse>), AppError> {
    let row = state.store.duplicate(req.user_id, id).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}
