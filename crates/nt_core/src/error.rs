use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing query parameter q")]
    MissingQuery,

    #[error("Article not found: {0}")]
    ArticleNotFound(String),

    #[error("Invalid category: {name} (valid: {})", valid.join(", "))]
    InvalidCategory {
        name: String,
        valid: Vec<&'static str>,
    },

    #[error("API key required")]
    Unauthenticated,

    #[error("Invalid API key")]
    Forbidden,

    #[error("Failed to load categories: {0}")]
    CategoriesUnavailable(String),
}

pub type Result<T> = std::result::Result<T, Error>;
