mod config;
mod db;
mod errors;
mod import;
mod models;
mod parser;
mod resumes;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, ParserBackend};
use crate::db::{create_pool, ensure_schema};
use crate::import::apilayer::ApiLayerParser;
use crate::import::{HeuristicParser, ResumeParser};
use crate::parser::ParserTuning;
use crate::resumes::store::PgResumeStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;

    let tuning = ParserTuning::default();

    // Initialize upload parser (HeuristicParser by default; swap via PARSER_BACKEND)
    let parser: Arc<dyn ResumeParser> = match config.parser_backend {
        ParserBackend::Heuristic => Arc::new(HeuristicParser::new(tuning.clone())),
        ParserBackend::ApiLayer => {
            let api_key = config
                .apilayer_api_key
                .clone()
                .context("APILAYER_API_KEY is required for the apilayer backend")?;
            Arc::new(ApiLayerParser::new(api_key, config.apilayer_url.clone())?)
        }
    };
    info!("Upload parser backend: {}", parser.backend_name());

    // Build app state
    let state = AppState {
        config: config.clone(),
        store: Arc::new(PgResumeStore::new(db)),
        parser,
        tuning,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the form frontend's host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
