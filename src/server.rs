//! HTTP service
//!
//! ## Endpoints
//! - `POST /upload`: score a CSV/Excel upload, return ranked employees
//! - `POST /upload-team`: score a CSV/Excel upload, return ranked teams
//! - `GET  /health`: liveness check
//!
//! Uploads are `multipart/form-data` with the table in the `file` field.
//! Rejected uploads still answer `200 OK` with `{"error": "..."}`.

use anyhow::{Context, Result};
use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        DefaultBodyLimit, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::error::{ErrorBody, IngestError};
use crate::ingest::{self, Comparison};
use crate::scoring::{self, EmployeeResult, Scorecard, ScoringConfig, TeamAggregate};

/// Multipart field that carries the uploaded table.
pub const UPLOAD_FIELD: &str = "file";

/// Body of a successful `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub results: Vec<EmployeeResult>,
}

/// Body of a successful `POST /upload-team`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamResponse {
    pub team: Vec<TeamAggregate>,
}

/// Shared application state available to all handlers.
struct AppState {
    scoring: ScoringConfig,
}

/// Build the router with all routes and layers. Used by [`start_server`] and
/// by in-process tests.
pub fn build_router(
    scoring: ScoringConfig,
    max_upload_bytes: usize,
    request_timeout: Duration,
) -> Router {
    let state = Arc::new(AppState { scoring });

    Router::new()
        .route("/upload", post(upload_handler))
        .route("/upload-team", post(upload_team_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP service. Blocks until the server shuts down.
///
/// # Errors
///
/// Returns an error if the timeout is invalid, the address cannot be bound,
/// or the server fails.
pub async fn start_server(config: ServerConfig, scoring: ScoringConfig) -> Result<()> {
    let addr = config.bind_addr();
    let app = build_router(scoring, config.max_upload_bytes, config.request_timeout()?);

    info!("Starting scoring service on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// `POST /upload`: employee-level results.
async fn upload_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    handle_upload(state, multipart, Comparison::Employees).await
}

/// `POST /upload-team`: team-level comparison.
async fn upload_team_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    handle_upload(state, multipart, Comparison::Teams).await
}

/// `GET /health`
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn handle_upload(
    state: Arc<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
    comparison: Comparison,
) -> Response {
    let upload = match multipart {
        Ok(multipart) => read_upload(multipart).await,
        Err(rejection) => {
            debug!("Upload is not multipart: {}", rejection.body_text());
            Err(UploadError::Ingest(IngestError::MissingUpload))
        }
    };

    let (filename, bytes) = match upload {
        Ok(upload) => upload,
        Err(UploadError::TooLarge(message)) => {
            warn!("Rejected upload: {}", message);
            return (StatusCode::PAYLOAD_TOO_LARGE, Json(ErrorBody { error: message }))
                .into_response();
        }
        Err(UploadError::Ingest(err)) => return reject(&err),
    };

    // Decoding a large workbook is CPU-bound; keep it off the async workers.
    let config = state.scoring.clone();
    let name = filename.clone();
    let outcome = tokio::task::spawn_blocking(move || score_upload(&name, &bytes, comparison, &config))
        .await
        .unwrap_or_else(|e| Err(IngestError::read(e)));

    match outcome {
        Ok(card) => {
            info!(
                file = %filename,
                employees = card.employees.len(),
                teams = card.teams.len(),
                "Scored upload"
            );
            match comparison {
                Comparison::Employees => Json(EmployeeResponse {
                    results: card.employees,
                })
                .into_response(),
                Comparison::Teams => Json(TeamResponse { team: card.teams }).into_response(),
            }
        }
        Err(err) => reject(&err),
    }
}

fn score_upload(
    filename: &str,
    bytes: &[u8],
    comparison: Comparison,
    config: &ScoringConfig,
) -> Result<Scorecard, IngestError> {
    let rows = ingest::load_rows(filename, bytes, comparison)?;
    Ok(scoring::score(&rows, config))
}

fn reject(err: &IngestError) -> Response {
    warn!("Rejected upload: {}", err);
    Json(ErrorBody::from(err)).into_response()
}

enum UploadError {
    Ingest(IngestError),
    TooLarge(String),
}

/// Pull the `file` field out of the form, with its filename and bytes.
async fn read_upload(mut multipart: Multipart) -> Result<(String, Vec<u8>), UploadError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(UploadError::Ingest(IngestError::MissingUpload)),
            Err(e) => return Err(multipart_error(e)),
        };

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        debug!(file = %filename, bytes = bytes.len(), "Received upload");
        return Ok((filename, bytes.to_vec()));
    }
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> UploadError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::TooLarge(err.body_text())
    } else {
        UploadError::Ingest(IngestError::read(err.body_text()))
    }
}
