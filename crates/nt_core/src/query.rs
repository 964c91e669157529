//! Read-only queries over a catalog snapshot.
//!
//! Everything here takes a borrowed slice and returns owned results, so a
//! caller can hold a snapshot for as long as it likes while the store swaps
//! in a new one.

use serde::Serialize;
use tracing::debug;

use crate::types::{Article, ArticleSummary, CatalogMode};
use crate::{Error, Result};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 20;

/// Categories accepted by the strict filter.
pub const VALID_CATEGORIES: [&str; 7] = [
    "business",
    "entertainment",
    "general",
    "health",
    "science",
    "sports",
    "technology",
];

/// A normalized page request. Both fields are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: clamp_positive(page),
            limit: clamp_positive(limit),
        }
    }

    /// Builds a request from raw query-string values. Never fails: a value
    /// without a leading integer falls back to the default, anything below 1
    /// becomes 1.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page.and_then(leading_integer).unwrap_or(DEFAULT_PAGE as i64);
        let limit = limit.and_then(leading_integer).unwrap_or(DEFAULT_LIMIT as i64);
        Self::new(page, limit)
    }
}

fn clamp_positive(value: i64) -> usize {
    usize::try_from(value.max(1)).unwrap_or(usize::MAX)
}

// Reads an optionally signed run of digits at the start of the input, the
// way `parseInt` does ("12abc" -> 12, "abc" -> None).
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let digits: &str = &digits[..digits.bytes().take_while(u8::is_ascii_digit).count()];
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.bytes().fold(0i64, |acc, d| {
        acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub data: Vec<ArticleSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub total: usize,
    pub data: Vec<Article>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryResults {
    pub category: String,
    pub total: usize,
    pub data: Vec<Article>,
}

pub fn total_pages(total: usize, limit: usize) -> usize {
    total.div_ceil(limit.max(1)).max(1)
}

pub fn paginate(articles: &[Article], request: PageRequest, mode: CatalogMode) -> Page {
    let total = articles.len();
    let start = request.page.saturating_sub(1).saturating_mul(request.limit);
    let data = if start >= total {
        Vec::new()
    } else {
        let end = start.saturating_add(request.limit).min(total);
        articles[start..end].iter().map(|a| a.summary(mode)).collect()
    };

    Page {
        page: request.page,
        limit: request.limit,
        total,
        total_pages: total_pages(total, request.limit),
        data,
    }
}

pub fn find_by_id<'a>(articles: &'a [Article], id: &str) -> Result<&'a Article> {
    articles
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| Error::ArticleNotFound(id.to_string()))
}

pub fn search(articles: &[Article], raw_query: &str) -> Result<SearchResults> {
    let query = raw_query.trim();
    if query.is_empty() {
        return Err(Error::MissingQuery);
    }

    let needle = query.to_lowercase();
    let data: Vec<Article> = articles
        .iter()
        .filter(|a| a.search_blob().contains(&needle))
        .cloned()
        .collect();
    debug!("🔎 search {:?} matched {} of {}", query, data.len(), articles.len());

    Ok(SearchResults {
        query: query.to_string(),
        total: data.len(),
        data,
    })
}

pub fn filter_by_category(
    articles: &[Article],
    name: &str,
    mode: CatalogMode,
) -> Result<CategoryResults> {
    let target = name.to_lowercase();

    let (category, data): (String, Vec<Article>) = if mode.is_strict() {
        if !VALID_CATEGORIES.contains(&target.as_str()) {
            return Err(Error::InvalidCategory {
                name: name.to_string(),
                valid: VALID_CATEGORIES.to_vec(),
            });
        }
        let data = articles
            .iter()
            .filter(|a| a.category.as_deref() == Some(target.as_str()))
            .cloned()
            .collect();
        (target, data)
    } else {
        let data = articles
            .iter()
            .filter(|a| a.source_name().unwrap_or("").to_lowercase() == target)
            .cloned()
            .collect();
        (name.to_string(), data)
    };

    Ok(CategoryResults {
        category,
        total: data.len(),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Publisher;
    use proptest::prelude::*;

    fn numbered(count: usize) -> Vec<Article> {
        (0..count)
            .map(|i| Article {
                id: i.to_string(),
                title: format!("Article {}", i),
                ..Default::default()
            })
            .collect()
    }

    fn from_source(id: &str, title: &str, source: &str, category: Option<&str>) -> Article {
        Article {
            id: id.to_string(),
            title: title.to_string(),
            category: category.map(str::to_string),
            source: Some(Publisher {
                name: Some(source.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_second_page_of_25() {
        let articles = numbered(25);
        let page = paginate(&articles, PageRequest::new(2, 10), CatalogMode::Indexed);

        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        let ids: Vec<_> = page.data.iter().map(|s| s.id.as_str()).collect();
        let expected: Vec<String> = (10..20).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let articles = numbered(5);
        let page = paginate(&articles, PageRequest::new(3, 5), CatalogMode::Indexed);
        assert!(page.data.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_empty_catalog_has_one_page() {
        let page = paginate(&[], PageRequest::default(), CatalogMode::Curated);
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let articles = numbered(3);
        let page = paginate(&articles, PageRequest::new(i64::MAX, i64::MAX), CatalogMode::Indexed);
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_parse_coerces_bad_input() {
        assert_eq!(PageRequest::parse(None, None), PageRequest::default());
        assert_eq!(PageRequest::parse(Some("abc"), Some("")), PageRequest::default());
        assert_eq!(PageRequest::parse(Some("0"), Some("-4")), PageRequest::new(1, 1));
        assert_eq!(PageRequest::parse(Some("3xyz"), Some(" 15")), PageRequest::new(3, 15));
        assert_eq!(PageRequest::parse(Some("+2"), Some("-")), PageRequest::new(2, 20));
    }

    #[test]
    fn test_non_positive_inputs_clamp_to_one() {
        let articles = numbered(30);
        let clamped = paginate(&articles, PageRequest::new(-3, 0), CatalogMode::Indexed);
        let first = paginate(&articles, PageRequest::new(1, 1), CatalogMode::Indexed);
        assert_eq!(clamped, first);
    }

    #[test]
    fn test_find_by_id() {
        let articles = numbered(3);
        assert_eq!(find_by_id(&articles, "2").unwrap().title, "Article 2");
        assert!(matches!(find_by_id(&articles, "9"), Err(Error::ArticleNotFound(id)) if id == "9"));
    }

    #[test]
    fn test_find_by_id_is_case_sensitive() {
        let articles = vec![from_source("abc", "t", "s", None)];
        assert!(find_by_id(&articles, "ABC").is_err());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let articles = vec![
            from_source("0", "Big Launch", "NASA", None),
            from_source("1", "Quiet day", "Local", None),
        ];
        for q in ["launch", "LAUNCH", "  Launch "] {
            let results = search(&articles, q).unwrap();
            assert_eq!(results.total, 1);
            assert_eq!(results.data[0].id, "0");
        }
        assert_eq!(search(&articles, "  Launch ").unwrap().query, "Launch");
    }

    #[test]
    fn test_search_matches_source_name_and_keeps_order() {
        let articles = vec![
            from_source("0", "one", "Reuters", None),
            from_source("1", "two", "BBC", None),
            from_source("2", "three", "reuters", None),
        ];
        let results = search(&articles, "reuters").unwrap();
        let ids: Vec<_> = results.data.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "2"]);
    }

    #[test]
    fn test_search_does_not_match_across_skipped_fields() {
        let article = Article {
            title: "alpha".to_string(),
            description: None,
            content: Some("beta".to_string()),
            ..Default::default()
        };
        assert_eq!(search(&[article.clone()], "alpha beta").unwrap().total, 1);
        assert_eq!(search(&[article], "alphabeta").unwrap().total, 0);
    }

    #[test]
    fn test_blank_search_is_an_error() {
        let articles = numbered(2);
        assert!(matches!(search(&articles, ""), Err(Error::MissingQuery)));
        assert!(matches!(search(&articles, "   \t"), Err(Error::MissingQuery)));
    }

    #[test]
    fn test_permissive_category_matches_source_name() {
        let articles = vec![
            from_source("0", "a", "BBC News", Some("sports")),
            from_source("1", "b", "CNN", Some("sports")),
            from_source("2", "c", "bbc news", None),
        ];
        let results = filter_by_category(&articles, "BBC News", CatalogMode::Indexed).unwrap();
        assert_eq!(results.category, "BBC News");
        assert_eq!(results.total, 2);

        let none = filter_by_category(&articles, "politics", CatalogMode::Indexed).unwrap();
        assert_eq!(none.total, 0);
    }

    #[test]
    fn test_strict_category_rejects_unknown_name() {
        let err = filter_by_category(&[], "politics", CatalogMode::Curated).unwrap_err();
        match err {
            Error::InvalidCategory { valid, .. } => assert_eq!(valid, VALID_CATEGORIES.to_vec()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_category_lowercases_input() {
        let articles = vec![
            from_source("a", "x", "BBC", Some("sports")),
            from_source("b", "y", "BBC", Some("Sports")),
            from_source("c", "z", "BBC", Some("health")),
        ];
        let results = filter_by_category(&articles, "SPORTS", CatalogMode::Curated).unwrap();
        assert_eq!(results.category, "sports");
        assert_eq!(results.total, 1);
        assert_eq!(results.data[0].id, "a");
    }

    proptest! {
        #[test]
        fn prop_pages_reconstruct_catalog(total in 0usize..120, limit in 1i64..40) {
            let articles = numbered(total);
            let first = paginate(&articles, PageRequest::new(1, limit), CatalogMode::Indexed);
            let mut seen = Vec::new();
            for page in 1..=first.total_pages {
                let request = PageRequest::new(page as i64, limit);
                let page = paginate(&articles, request, CatalogMode::Indexed);
                prop_assert!(page.data.len() <= limit as usize);
                seen.extend(page.data.into_iter().map(|s| s.id));
            }
            let expected: Vec<String> = articles.iter().map(|a| a.id.clone()).collect();
            prop_assert_eq!(seen, expected);
        }

        #[test]
        fn prop_total_pages_formula(total in 0usize..10_000, limit in 1usize..500) {
            let expected = std::cmp::max((total + limit - 1) / limit, 1);
            prop_assert_eq!(total_pages(total, limit), expected);
        }
    }
}
