//! HTTP API server exposing the summarization pipeline.
//!
//! One POST endpoint runs the full pipeline and blocks until it completes;
//! every pipeline error is collapsed into a generic 500 response carrying
//! the error message. The permissive CORS policy matches the prototype
//! nature of the service.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
pub struct AppState {
    orchestrator: Orchestrator,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::new(settings)?;
    let state = Arc::new(AppState::new(orchestrator));

    let app = build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Oppsum API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Liveness", "GET  /");
    Output::kv("Summarize", "POST /summarize");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router with its routes and CORS layer.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home))
        .route("/summarize", post(summarize))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub youtube_link: String,
}

#[derive(Debug, Serialize)]
struct SummarizeResponse {
    summary: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
}

// === Handlers ===

async fn home() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "YouTube summarizer API is running" }))
}

async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SummarizeRequest>,
) -> impl IntoResponse {
    match state.orchestrator.summarize(&req.youtube_link).await {
        Ok(summary) => Json(SummarizeResponse { summary }).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                detail: e.to_string(),
            }),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentSpec, StageRunner};
    use crate::error::{OppsumError, Result};
    use async_trait::async_trait;
    use axum::body::to_bytes;

    struct FixedRunner(&'static str);

    #[async_trait]
    impl StageRunner for FixedRunner {
        async fn run_stage(
            &self,
            _agent: &AgentSpec,
            _instructions: &str,
            _context: Option<&str>,
        ) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingRunner(&'static str);

    #[async_trait]
    impl StageRunner for FailingRunner {
        async fn run_stage(
            &self,
            _agent: &AgentSpec,
            _instructions: &str,
            _context: Option<&str>,
        ) -> Result<String> {
            Err(OppsumError::Transcript(self.0.to_string()))
        }
    }

    fn state_with(runner: Arc<dyn StageRunner>) -> Arc<AppState> {
        let orchestrator = Orchestrator::with_runner(Settings::default(), runner).unwrap();
        Arc::new(AppState::new(orchestrator))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_home_returns_liveness_message() {
        let response = home().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["message"], "YouTube summarizer API is running");
    }

    #[tokio::test]
    async fn test_summarize_returns_summary() {
        let state = state_with(Arc::new(FixedRunner("## Final summary")));

        let response = summarize(
            State(state),
            Json(SummarizeRequest {
                youtube_link: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["summary"], "## Final summary");
    }

    #[tokio::test]
    async fn test_summarize_failure_is_generic_500() {
        let state = state_with(Arc::new(FailingRunner("captions disabled")));

        let response = summarize(
            State(state),
            Json(SummarizeRequest {
                youtube_link: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        let detail = json["detail"].as_str().unwrap();
        assert!(!detail.is_empty());
        assert!(detail.contains("captions disabled"));
        assert!(json.get("summary").is_none());
    }

    #[tokio::test]
    async fn test_summarize_bad_link_is_500_before_any_stage() {
        // Even a failing runner is never reached for an unparseable link
        let state = state_with(Arc::new(FailingRunner("should not run")));

        let response = summarize(
            State(state),
            Json(SummarizeRequest {
                youtube_link: "https://example.com/video".to_string(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["detail"].as_str().unwrap().contains("video id"));
    }
}
