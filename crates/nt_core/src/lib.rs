pub mod access;
pub mod error;
pub mod query;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use query::{CategoryResults, Page, PageRequest, SearchResults, VALID_CATEGORIES};
pub use storage::{ArticleSource, CategorySource};
pub use types::{Article, ArticleSummary, CatalogMode, Category, Publisher};
