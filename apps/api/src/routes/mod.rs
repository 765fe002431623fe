pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::import::handlers as import;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Import API
        .route(
            "/api/v1/import/upload",
            post(import::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/import/text", post(import::handle_import_text))
        // Resume API
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume)
                .put(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/duplicate",
            post(resumes::handle_duplicate_resume),
        )
        .with_state(state)
}
