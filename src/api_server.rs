//! Axum API Server Module
//!
//! HTTP glue around the advisor session: image prediction, pre-ranked
//! advice, current-recommendation readback, CSV download, and rendered
//! documentation. One session per process; handlers serialize access through
//! an async RwLock, and the session's request tokens keep a slow cycle from
//! clobbering a newer one.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use moka::future::Cache;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::classify::{ImageClassifier, Prediction};
use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::session::AdvisorSession;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<AdvisorSession>>,
    /// Wired by the deployment; absent means /api/predict is unavailable
    pub classifier: Option<Arc<dyn ImageClassifier>>,
    /// Rendered documentation HTML per label
    pub doc_cache: Cache<String, String>,
}

impl AppState {
    pub fn new(config: AdvisorConfig) -> Self {
        tracing::info!("Initializing advisor session...");
        let session = AdvisorSession::new(config);

        let doc_cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(Duration::from_secs(300))
            .build();

        Self {
            session: Arc::new(RwLock::new(session)),
            classifier: None,
            doc_cache,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn ImageClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Prediction pipeline
        .route("/api/predict", post(predict_image))
        .route("/api/advise", post(advise))
        .route("/api/recommendations", get(current_recommendations))
        // Export download
        .route("/api/export", get(export_csv))
        // Rendered documentation
        .route("/api/docs/:label", get(get_documentation))
        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Raw image bytes in, committed advice out. The classifier call happens
/// outside the session lock; an inference failure leaves the current slot
/// untouched.
async fn predict_image(
    State(state): State<AppState>,
    image: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let classifier = state
        .classifier
        .clone()
        .ok_or_else(|| AppError::Unavailable("no classifier is wired".to_string()))?;

    let predictions = classifier
        .classify(&image)
        .map_err(|e| AppError::Inference(e.to_string()))?;

    run_cycle(&state, predictions).await
}

/// Pre-computed model output (bypasses the classifier boundary)
async fn advise(
    State(state): State<AppState>,
    Json(predictions): Json<Vec<Prediction>>,
) -> Result<Json<serde_json::Value>, AppError> {
    run_cycle(&state, predictions).await
}

async fn run_cycle(
    state: &AppState,
    predictions: Vec<Prediction>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut session = state.session.write().await;
    let token = session.begin_request();
    let advice = session.advise(predictions)?;
    let committed = session.commit(token, advice.clone());

    Ok(Json(serde_json::json!({
        "committed": committed,
        "advice": advice,
    })))
}

async fn current_recommendations(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let session = state.session.read().await;
    match session.current() {
        Some(advice) => Ok(Json(serde_json::json!({ "advice": advice }))),
        None => Err(AppError::NotFound("no prediction has run yet".to_string())),
    }
}

async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let session = state.session.read().await;
    let (filename, bytes) = session.export_current(chrono::Local::now().date_naive())?;

    let headers = [
        (
            header::CONTENT_TYPE,
            "text/csv; charset=utf-8".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];
    Ok((headers, bytes))
}

async fn get_documentation(
    State(state): State<AppState>,
    Path(label): Path<String>,
) -> Result<Html<String>, AppError> {
    if let Some(html) = state.doc_cache.get(&label).await {
        return Ok(Html(html));
    }

    let html = {
        let session = state.session.read().await;
        session.docs_html(&label)?
    };
    state.doc_cache.insert(label, html.clone()).await;
    Ok(Html(html))
}

// ============================================================================
// Error Mapping
// ============================================================================

enum AppError {
    BadRequest(String),
    NotFound(String),
    Unavailable(String),
    Inference(String),
    Internal(String),
}

impl From<AdvisorError> for AppError {
    fn from(e: AdvisorError) -> Self {
        match e {
            AdvisorError::NoPrediction | AdvisorError::NothingToExport => {
                AppError::BadRequest(e.to_string())
            }
            AdvisorError::DocumentationUnavailable(_) => AppError::NotFound(e.to_string()),
            AdvisorError::DatasetUnavailable(_) => AppError::Unavailable(e.to_string()),
            AdvisorError::Inference(msg) => AppError::Inference(msg),
            AdvisorError::Export(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Inference(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
