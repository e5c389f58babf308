//! Request correlation middleware.

use crate::observability::{REQUEST_ID_HEADER, RequestContext, scope_request_context};
use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;

/// Runs each request inside a [`RequestContext`] and echoes its ID in the
/// `x-request-id` response header.
pub async fn request_context(request: Request, next: Next) -> Response {
    let context = RequestContext::from_client_id(
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
    );
    let request_id = context.request_id().to_string();

    let span = tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    );

    let mut response = scope_request_context(context, next.run(request))
        .instrument(span)
        .await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
