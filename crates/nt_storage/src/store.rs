use nt_core::{Article, ArticleSource, CatalogMode, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn};

use crate::parse_feed;

/// Article counts around a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reload {
    pub before: usize,
    pub after: usize,
}

/// Holds the current catalog snapshot.
///
/// Readers get an `Arc` to an immutable list; loading builds a new list off
/// to the side and swaps the pointer, so a reader sees either the old list or
/// the new one. Loads are serialized by `load_lock`.
pub struct ArticleStore {
    source: Arc<dyn ArticleSource>,
    mode: CatalogMode,
    snapshot: RwLock<Arc<Vec<Article>>>,
    load_lock: Mutex<()>,
}

impl ArticleStore {
    /// Creates an empty store. Call [`ArticleStore::load`] to fill it.
    pub fn new(source: Arc<dyn ArticleSource>, mode: CatalogMode) -> Self {
        Self {
            source,
            mode,
            snapshot: RwLock::new(Arc::new(Vec::new())),
            load_lock: Mutex::new(()),
        }
    }

    pub fn mode(&self) -> CatalogMode {
        self.mode
    }

    /// Replaces the snapshot with a fresh read of the source.
    ///
    /// On failure the snapshot is emptied, not kept, and the error returned.
    pub async fn load(&self) -> Result<usize> {
        let _guard = self.load_lock.lock().await;
        self.load_locked().await
    }

    /// Reloads and reports the counts on either side. A failed load is logged
    /// and shows up as `after == 0`.
    pub async fn reload(&self) -> Reload {
        let _guard = self.load_lock.lock().await;
        let before = self.count().await;
        // failure already logged by load_locked
        let _ = self.load_locked().await;
        let after = self.count().await;
        Reload { before, after }
    }

    pub async fn snapshot(&self) -> Arc<Vec<Article>> {
        self.snapshot.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.snapshot.read().await.len()
    }

    async fn load_locked(&self) -> Result<usize> {
        match self.read_articles().await {
            Ok(articles) => {
                let count = articles.len();
                self.install(articles).await;
                info!(
                    "📰 Loaded {} articles from {} ({} ids)",
                    count,
                    self.source.describe(),
                    self.mode
                );
                Ok(count)
            }
            Err(e) => {
                self.install(Vec::new()).await;
                error!("Failed to load {}: {}", self.source.describe(), e);
                Err(e)
            }
        }
    }

    async fn read_articles(&self) -> Result<Vec<Article>> {
        let payload = self.source.read_payload().await?;
        let mut articles = parse_feed(&payload)?;
        assign_ids(&mut articles, self.mode);
        Ok(articles)
    }

    async fn install(&self, articles: Vec<Article>) {
        *self.snapshot.write().await = Arc::new(articles);
    }
}

// Indexed catalogs renumber on every load, so ids move when the file's order
// or length changes. Curated catalogs keep the shipped id and only fall back
// to the position for records that have none; a position already taken by a
// shipped id is not reused and the record stays without an id.
fn assign_ids(articles: &mut [Article], mode: CatalogMode) {
    if mode.uses_positional_ids() {
        for (index, article) in articles.iter_mut().enumerate() {
            article.id = index.to_string();
        }
        return;
    }

    let shipped: HashSet<String> = articles
        .iter()
        .filter(|a| !a.id.is_empty())
        .map(|a| a.id.clone())
        .collect();
    let mut missing = 0;
    let mut collisions = 0;
    for (index, article) in articles.iter_mut().enumerate() {
        if !article.id.is_empty() {
            continue;
        }
        missing += 1;
        let fallback = index.to_string();
        if shipped.contains(&fallback) {
            collisions += 1;
        } else {
            article.id = fallback;
        }
    }
    if missing > 0 {
        warn!("{} articles had no id, using their position instead", missing);
    }
    if collisions > 0 {
        warn!(
            "{} articles without an id sit at a position another article uses as its id; \
             they stay unreachable by id",
            collisions
        );
    }
}
