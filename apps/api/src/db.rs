use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const CREATE_RESUMES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS resumes (
    id          UUID PRIMARY KEY,
    user_id     UUID NOT NULL,
    name        TEXT NOT NULL,
    data        JSONB NOT NULL DEFAULT '{}'::jsonb,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_RESUMES_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS resumes_user_updated_idx
    ON resumes (user_id, updated_at DESC)
"#;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the `resumes` table and its listing index if they do not exist.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in [CREATE_RESUMES_TABLE, CREATE_RESUMES_INDEX] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to ensure database schema")?;
    }
    info!("Database schema ready");
    Ok(())
}
