use std::sync::Arc;
use nt_core::CategorySource;
use nt_storage::ArticleStore;

pub struct AppState {
    pub store: Arc<ArticleStore>,
    pub categories: Arc<dyn CategorySource>,
    /// Shared secret for `/api` routes; `None` serves them openly
    pub api_key: Option<String>,
}

impl AppState {
    pub fn new(store: Arc<ArticleStore>, categories: Arc<dyn CategorySource>) -> Self {
        Self {
            store,
            categories,
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}
