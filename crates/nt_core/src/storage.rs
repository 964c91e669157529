use async_trait::async_trait;
use crate::types::Category;
use crate::Result;

/// Where the article payload comes from.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Raw bytes of a JSON document holding an `articles` array
    async fn read_payload(&self) -> Result<Vec<u8>>;

    /// Human readable location, used in logs
    fn describe(&self) -> String;
}

/// Where the category listing comes from. Read on every call, never cached.
#[async_trait]
pub trait CategorySource: Send + Sync {
    async fn categories(&self) -> Result<Vec<Category>>;
}
