use async_trait::async_trait;
use nt_core::{ArticleSource, Category, CategorySource, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Articles read from a JSON file on every load.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ArticleSource for FileSource {
    async fn read_payload(&self) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Deserialize)]
struct CategoryFile {
    categories: Vec<Category>,
}

/// Category listing read from a JSON file of the form
/// `{"categories": [{"name": ...}, ...]}`.
#[derive(Debug, Clone)]
pub struct FileCategorySource {
    path: PathBuf,
}

impl FileCategorySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CategorySource for FileCategorySource {
    async fn categories(&self) -> Result<Vec<Category>> {
        let raw = tokio::fs::read(&self.path).await?;
        let file: CategoryFile = serde_json::from_slice(&raw)?;
        Ok(file.categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArticleStore;
    use nt_core::CatalogMode;
    use std::fs;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_source_reads_bytes() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("response.json");
        fs::write(&path, r#"{"articles":[]}"#).unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.read_payload().await.unwrap(), br#"{"articles":[]}"#.to_vec());
        assert_eq!(source.describe(), path.display().to_string());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_io_error() {
        let temp_dir = tempdir().unwrap();
        let source = FileSource::new(temp_dir.path().join("missing.json"));
        assert!(matches!(source.read_payload().await, Err(nt_core::Error::Io(_))));
    }

    #[tokio::test]
    async fn test_store_reloads_from_rewritten_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("response.json");
        fs::write(&path, r#"{"articles":[{"title":"a"},{"title":"b"}]}"#).unwrap();

        let store = ArticleStore::new(Arc::new(FileSource::new(&path)), CatalogMode::Indexed);
        assert_eq!(store.load().await.unwrap(), 2);

        fs::write(&path, r#"{"articles":[{"title":"a"},{"title":"b"},{"title":"c"}]}"#).unwrap();
        assert_eq!(store.load().await.unwrap(), 3);

        fs::remove_file(&path).unwrap();
        assert!(store.load().await.is_err());
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_category_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("categories.json");
        fs::write(
            &path,
            r#"{"categories":[{"name":"business","description":"Markets"},{"name":"sports"}]}"#,
        )
        .unwrap();

        let categories = FileCategorySource::new(&path).categories().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "business");
        assert_eq!(categories[0].extra["description"], "Markets");
    }

    #[tokio::test]
    async fn test_category_file_without_list_fails() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("categories.json");
        fs::write(&path, r#"{"other":[]}"#).unwrap();

        assert!(FileCategorySource::new(&path).categories().await.is_err());
    }
}
