use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{SecondsFormat, Utc};
use nt_core::{query, Article, Category, CategoryResults, Error, Page, PageRequest, SearchResults};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

use crate::{ApiError, AppState};

/// Raw query pairs in arrival order. Repeated keys are kept, so a request
/// like `?page=1&page=2` still parses; [`first_param`] picks the first.
pub type QueryPairs = Vec<(String, String)>;

/// First value given for `key`, if any.
pub fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[derive(Debug, Serialize)]
pub struct CategoryListing {
    pub total: usize,
    pub data: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct RefreshReport {
    pub message: &'static str,
    pub before: usize,
    pub after: usize,
}

pub async fn hello() -> Json<Value> {
    Json(json!({
        "message": "Hello World",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryPairs>,
) -> Json<Page> {
    let snapshot = state.store.snapshot().await;
    let request = PageRequest::parse(first_param(&params, "page"), first_param(&params, "limit"));
    Json(query::paginate(&snapshot, request, state.store.mode()))
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Article>, ApiError> {
    let snapshot = state.store.snapshot().await;
    let article = query::find_by_id(&snapshot, &id)?;
    Ok(Json(article.clone()))
}

pub async fn search_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryPairs>,
) -> Result<Json<SearchResults>, ApiError> {
    let snapshot = state.store.snapshot().await;
    let results = query::search(&snapshot, first_param(&params, "q").unwrap_or(""))?;
    Ok(Json(results))
}

pub async fn articles_by_category(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<CategoryResults>, ApiError> {
    let snapshot = state.store.snapshot().await;
    let results = query::filter_by_category(&snapshot, &name, state.store.mode())?;
    Ok(Json(results))
}

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoryListing>, ApiError> {
    let data = state.categories.categories().await.map_err(|e| {
        error!("Failed to load categories: {}", e);
        Error::CategoriesUnavailable(e.to_string())
    })?;
    Ok(Json(CategoryListing {
        total: data.len(),
        data,
    }))
}

pub async fn refresh_articles(State(state): State<Arc<AppState>>) -> Json<RefreshReport> {
    let reload = state.store.reload().await;
    info!("🔄 Articles reloaded: {} -> {}", reload.before, reload.after);
    Json(RefreshReport {
        message: "Articles reloaded from file",
        before: reload.before,
        after: reload.after,
    })
}
