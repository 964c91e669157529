use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};
use nt_core::access::{self, API_KEY_HEADER, API_KEY_QUERY_PARAM};
use std::sync::Arc;
use tracing::warn;

use crate::handlers::{first_param, QueryPairs};
use crate::{ApiError, AppState};

/// Rejects requests that do not carry the configured API key in the
/// `x-api-key` header or the `apiKey` query parameter.
///
/// The header is compared as raw bytes, so a value that is not valid UTF-8
/// is a wrong key rather than a missing one.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryPairs>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(secret) = state.api_key.as_deref() else {
        return Ok(next.run(request).await);
    };

    let header = request.headers().get(API_KEY_HEADER).map(|v| v.as_bytes());
    let query = first_param(&params, API_KEY_QUERY_PARAM).map(str::as_bytes);

    if let Err(e) = access::authorize(header, query, secret) {
        warn!("🔒 {} {} rejected: {}", request.method(), request.uri().path(), e);
        return Err(e.into());
    }

    Ok(next.run(request).await)
}
