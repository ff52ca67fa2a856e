mod config;
mod errors;
mod interview;
mod llm_client;
mod pdf;
mod render;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interview::controller::InterviewController;
use crate::interview::store::InMemorySessionStore;
use crate::interview::uploads::ResumeUploads;
use crate::llm_client::GeminiClient;
use crate::pdf::PdfTextExtractor;
use crate::render::PageRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    let uploads = ResumeUploads::init(&config.upload_dir).await?;
    info!("Upload directory ready at {}", uploads.dir().display());

    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; question generation will fail until it is provided");
    }
    let llm = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone());
    info!("LLM client initialized (model: {})", llm.model());

    let idle_timeout = chrono::Duration::from_std(config.session_idle_timeout)
        .context("SESSION_IDLE_TIMEOUT_SECS is out of range")?;

    let interviews = Arc::new(InterviewController::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(llm),
        Arc::new(PdfTextExtractor),
        uploads,
        idle_timeout,
    ));
    interviews
        .clone()
        .spawn_idle_sweeper(config.session_sweep_interval);
    info!(
        "Idle sessions expire after {}s (sweep every {}s)",
        config.session_idle_timeout.as_secs(),
        config.session_sweep_interval.as_secs()
    );

    let state = AppState {
        interviews,
        pages: Arc::new(PageRenderer::new()?),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
