//! HTTP request handlers.

use super::AppState;
use super::error::ApiError;
use crate::models::{RemoveDuplicatesRequest, RemoveDuplicatesResponse};
use crate::observability::current_request_id;
use crate::services::DeduplicationService;
use crate::{Error, Result};
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use std::sync::Arc;
use std::time::Instant;

/// `POST /remove_duplicates`
///
/// Takes the raw body rather than `Json<_>` so that every failure, including
/// undecodable JSON, is reported in the `{"error": "..."}` shape.
pub async fn remove_duplicates(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> std::result::Result<Json<RemoveDuplicatesResponse>, ApiError> {
    let start = Instant::now();
    let result = body
        .map_err(ApiError::from)
        .and_then(|body| {
            tracing::info!(
                request_id = current_request_id().as_deref().unwrap_or("-"),
                body_bytes = body.len(),
                "Request received"
            );
            process(&state.service, &body).map_err(ApiError::from)
        });

    let outcome = match &result {
        Ok(_) => "success",
        Err(e) if e.status().is_client_error() => "client_error",
        Err(_) => "server_error",
    };
    metrics::counter!("dedup_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("dedup_request_duration_seconds").record(start.elapsed().as_secs_f64());

    result.map(Json)
}

/// Decodes the request body and runs deduplication.
fn process(service: &DeduplicationService, body: &[u8]) -> Result<RemoveDuplicatesResponse> {
    let request: RemoveDuplicatesRequest =
        serde_json::from_slice(body).map_err(|e| Error::InvalidInput(e.to_string()))?;
    let contents = request.into_contents()?;
    let outcome = service.remove_duplicates(&contents)?;

    tracing::info!(
        rows_in = outcome.rows_in,
        rows_out = outcome.rows_out,
        duplicates_removed = outcome.duplicates_removed(),
        "Duplicates removed"
    );

    Ok(RemoveDuplicatesResponse::new(outcome.csv))
}
