use async_trait::async_trait;
use nt_core::{ArticleSource, Category, CategorySource, Error, Result};
use serde_json::Value;
use std::io;
use tokio::sync::RwLock;

/// Article payload held in memory. The payload can be swapped or made
/// unavailable at runtime, which is what tests use to drive reloads.
pub struct InMemorySource {
    payload: RwLock<Option<Vec<u8>>>,
}

impl InMemorySource {
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload: RwLock::new(Some(payload)),
        }
    }

    pub fn from_json(value: &Value) -> Self {
        Self::new(value.to_string().into_bytes())
    }

    pub fn unavailable() -> Self {
        Self {
            payload: RwLock::new(None),
        }
    }

    pub async fn set_payload(&self, payload: Vec<u8>) {
        *self.payload.write().await = Some(payload);
    }

    pub async fn set_json(&self, value: &Value) {
        self.set_payload(value.to_string().into_bytes()).await;
    }

    pub async fn set_unavailable(&self) {
        *self.payload.write().await = None;
    }
}

#[async_trait]
impl ArticleSource for InMemorySource {
    async fn read_payload(&self) -> Result<Vec<u8>> {
        self.payload
            .read()
            .await
            .clone()
            .ok_or_else(|| not_found("payload unavailable"))
    }

    fn describe(&self) -> String {
        "memory://articles".to_string()
    }
}

/// Fixed category listing, or a listing that always fails to load.
pub struct InMemoryCategorySource {
    categories: Option<Vec<Category>>,
}

impl InMemoryCategorySource {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories: Some(categories),
        }
    }

    pub fn unavailable() -> Self {
        Self { categories: None }
    }
}

#[async_trait]
impl CategorySource for InMemoryCategorySource {
    async fn categories(&self) -> Result<Vec<Category>> {
        self.categories
            .clone()
            .ok_or_else(|| not_found("categories unavailable"))
    }
}

fn not_found(what: &str) -> Error {
    Error::Io(io::Error::new(io::ErrorKind::NotFound, what.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_source() {
        let source = InMemorySource::from_json(&json!({"articles": []}));
        assert!(source.read_payload().await.is_ok());

        source.set_unavailable().await;
        assert!(source.read_payload().await.is_err());

        source.set_payload(b"{}".to_vec()).await;
        assert_eq!(source.read_payload().await.unwrap(), b"{}".to_vec());
    }

    #[tokio::test]
    async fn test_unavailable_categories() {
        assert!(InMemoryCategorySource::unavailable().categories().await.is_err());
        assert!(InMemoryCategorySource::new(vec![]).categories().await.unwrap().is_empty());
    }
}
