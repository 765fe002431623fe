use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;

pub const DEFAULT_RESUME_NAME: &str = "Untitled Resume";

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Per-user résumé documents. Every operation is scoped to `user_id`; a row
/// owned by another user is reported as not found.
///
/// Carried in `AppState` as `Arc<dyn ResumeStore>`.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn create(&self, user_id: Uuid, name: &str, data: Value) -> Result<ResumeRow, AppError>;

    /// `None` leaves the column unchanged. Always bumps `updated_at`.
    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        data: Option<Value>,
    ) -> Result<ResumeRow, AppError>;

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<ResumeRow, AppError>;

    /// Most recently updated first.
    async fn list(&self, user_id: Uuid) -> Result<Vec<ResumeRow>, AppError>;

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError>;

    async fn duplicate(&self, user_id: Uuid, id: Uuid) -> Result<ResumeRow, AppError> {
        let source = self.get(user_id, id).await?;
        let copy = self
            .create(user_id, &copy_name(&source.name), source.data)
            .await?;
        info!("Duplicated resume {id} as {}", copy.id);
        Ok(copy)
    }
}

pub fn copy_name(name: &str) -> String {
    format!("{name} (Copy)")
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Resume {id} not found"))
}

// ────────────────────────────────────────────────────────────────────────────
// PgResumeStore
// ────────────────────────────────────────────────────────────────────────────

pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn create(&self, user_id: Uuid, name: &str, data: Value) -> Result<ResumeRow, AppError> {
        let row: ResumeRow = sqlx::query_as(
            r#"
            INSERT INTO resumes (id, user_id, name, data)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(name)
        .bind(data)
        .fetch_one(&self.pool)
        .await?;

        info!("Created resume {} for user {user_id}", row.id);
        Ok(row)
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        data: Option<Value>,
    ) -> Result<ResumeRow, AppError> {
        let row: Option<ResumeRow> = sqlx::query_as(
            r#"
            UPDATE resumes
            SET name = COALESCE($3, name),
                data = COALESCE($4, data),
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(data)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| not_found(id))
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<ResumeRow, AppError> {
        let row: Option<ResumeRow> =
            sqlx::query_as("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        row.ok_or_else(|| not_found(id))
    }

    async fn list(&self, user_id: Uuid) -> Result<Vec<ResumeRow>, AppError> {
        let rows: Vec<ResumeRow> = sqlx::query_as(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        info!("Deleted resume {id} for user {user_id}");
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory store for handler tests
// ────────────────────────────────────────────────────────────────────────────
