use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nt_core::access::{API_KEY_HEADER, API_KEY_QUERY_PARAM};
use nt_core::Error;
use serde_json::json;
use tracing::error;

/// Turns a core error into an HTTP response. This is the only place status
/// codes are chosen.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            Error::MissingQuery => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Missing query parameter q" }),
            ),
            Error::ArticleNotFound(_) => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Article not found" }),
            ),
            Error::InvalidCategory { valid, .. } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid category", "validCategories": valid }),
            ),
            Error::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "error": "API key required",
                    "message": format!(
                        "Please provide API key in header ({}) or query parameter ({})",
                        API_KEY_HEADER, API_KEY_QUERY_PARAM
                    ),
                }),
            ),
            Error::Forbidden => (
                StatusCode::FORBIDDEN,
                json!({
                    "error": "Invalid API key",
                    "message": "The provided API key is not valid",
                }),
            ),
            Error::CategoriesUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to load categories" }),
            ),
            other => {
                error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: Error) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(Error::MissingQuery), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(Error::ArticleNotFound("1".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(Error::InvalidCategory { name: "politics".into(), valid: vec!["sports"] }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(Error::Unauthenticated), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(Error::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(Error::CategoriesUnavailable("gone".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_of(Error::Config("bad".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
