use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use server::serve;
pub use state::AppState;

/// Builds the HTTP router. When the state carries an API key every `/api`
/// route sits behind the key check; `/` never does.
pub fn create_app(state: AppState) -> Router {
    let state = Arc::new(state);
    let cors = CorsLayer::permissive();

    let mut api: Router<Arc<AppState>> = Router::new()
        .route("/api/articles", get(handlers::list_articles))
        .route("/api/articles/search", get(handlers::search_articles))
        .route("/api/articles/refresh", post(handlers::refresh_articles))
        .route("/api/articles/category/:name", get(handlers::articles_by_category))
        .route("/api/articles/:id", get(handlers::get_article))
        .route("/api/categories", get(handlers::list_categories));

    if state.api_key.is_some() {
        api = api.route_layer(middleware::from_fn_with_state(state.clone(), auth::require_api_key));
    }

    Router::new()
        .route("/", get(handlers::hello))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub mod prelude {
    pub use nt_core::{Article, Error, Result};
    pub use crate::{create_app, AppState, ServerConfig};
}
