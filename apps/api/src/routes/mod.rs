pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(handlers::handle_index))
        .route(
            "/upload",
            post(handlers::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/answer", post(handlers::handle_answer))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::interview::controller::InterviewController;
    use crate::interview::store::InMemorySessionStore;
    use crate::interview::uploads::ResumeUploads;
    use crate::llm_client::GeminiClient;
    use crate::pdf::PdfTextExtractor;
    use crate::render::PageRenderer;

    #[tokio::test]
    async fn test_health_reports_model_and_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            gemini_api_key: None,
            gemini_model: "gemini-1.5-flash".into(),
            upload_dir: dir.path().to_path_buf(),
            port: 0,
            session_idle_timeout: std::time::Duration::from_secs(60),
            session_sweep_interval: std::time::Duration::from_secs(60),
            max_upload_bytes: 1024,
            rust_log: "info".into(),
        };
        let interviews = Arc::new(InterviewController::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(GeminiClient::new(None, config.gemini_model.clone())),
            Arc::new(PdfTextExtractor),
            ResumeUploads::init(dir.path()).await.unwrap(),
            chrono::Duration::minutes(1),
        ));
        let router = build_router(AppState {
            interviews,
            pages: Arc::new(PageRenderer::new().unwrap()),
            config,
        });

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model"], "gemini-1.5-flash");
        assert_eq!(body["active_sessions"], 0);
    }
}
