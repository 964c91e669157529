use nt_core::{Article, Result};
use serde_json::Value;

pub mod backends;
pub mod store;

pub use backends::*;
pub use store::{ArticleStore, Reload};

/// Parses an article payload: a JSON object whose `articles` field holds the
/// records. A payload without an `articles` array has no records.
///
/// Only malformed JSON is an error. Records are read one by one with
/// [`Article::from_record`], so an odd field never drops the catalog.
pub fn parse_feed(payload: &[u8]) -> Result<Vec<Article>> {
    let mut value: Value = serde_json::from_slice(payload)?;
    match value.get_mut("articles").map(Value::take) {
        Some(Value::Array(records)) => {
            Ok(records.into_iter().map(Article::from_record).collect())
        }
        _ => Ok(Vec::new()),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::store::{ArticleStore, Reload};
}
