//! HTTP front end.
//!
//! - `GET /` - liveness message
//! - `POST /analyze` - multipart upload with a `file` field; responds with
//!   the analysis report `{filename, grouped_results, summary, raw_results}`
//!
//! The catalogue and lexicon are loaded once at startup and shared by every
//! request.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use policy_gap::{AnalysisReport, Control, GapClassifier, GapError};
use policy_gap_document::{ClauseExtractor, DocumentError, PolicyDocument};
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::analyze::{assess_document, build_classifier, load_catalogue};
use crate::config::AnalyzerConfig;

/// Multipart field carrying the policy document.
const UPLOAD_FIELD: &str = "file";

/// Shared, read-only analysis setup.
#[derive(Clone)]
pub struct AppState {
    controls: Arc<Vec<Control>>,
    classifier: Arc<GapClassifier>,
    extractor: ClauseExtractor,
    parallel: bool,
}

impl AppState {
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        Ok(Self {
            controls: Arc::new(load_catalogue(config)?),
            classifier: Arc::new(build_classifier(config)?),
            extractor: config.extractor.extractor(),
            parallel: config.classifier.parallel,
        })
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Classification(#[from] GapError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Document(DocumentError::UnsupportedFormat { .. }) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            ApiError::Document(DocumentError::Io { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Classification(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Serialize)]
struct StatusMessage {
    message: &'static str,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/analyze", post(analyze))
        .with_state(state)
}

async fn root() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "Policy Gap Analyzer API is running.",
    })
}

async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, ApiError> {
    let (filename, bytes) = read_upload(&mut multipart).await?;
    let document = PolicyDocument::from_bytes(filename, &bytes, &state.extractor)?;
    if document.is_empty() {
        warn!(document = %document.name, "uploaded policy has no clauses");
    }

    let report = assess_document(&state.classifier, state.parallel, &state.controls, &document)?;
    info!(
        document = %report.filename,
        percentage = report.summary.compliance_percentage,
        "upload analyzed"
    );
    Ok(Json(report))
}

async fn read_upload(multipart: &mut Multipart) -> Result<(String, Bytes), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload.txt").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        return Ok((filename, bytes));
    }

    Err(ApiError::BadRequest(format!(
        "multipart field `{}` is required",
        UPLOAD_FIELD
    )))
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("invalid CORS origin {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: &AnalyzerConfig) -> Result<()> {
    let state = AppState::from_config(config)?;
    let addr: SocketAddr = config
        .server
        .listen
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server.listen))?;

    let app = build_router(state)
        .layer(cors_layer(&config.server.allowed_origins)?)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "policy-gap API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
