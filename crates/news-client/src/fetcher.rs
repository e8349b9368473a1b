use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;

use research_core::{NewsRecord, NewsSource};

use crate::NewsApiClient;

/// Articles requested per symbol.
const DEFAULT_PAGE_SIZE: u32 = 5;

/// Per-symbol news retrieval.
///
/// When no credential is configured the fetcher is disabled: every symbol
/// maps to a neutral placeholder record and no network calls are attempted.
/// Per-symbol fetch errors degrade to an empty article list, never a batch
/// failure.
pub struct NewsFetcher {
    source: Option<Arc<dyn NewsSource>>,
    page_size: u32,
}

impl NewsFetcher {
    pub fn new(source: Arc<dyn NewsSource>) -> Self {
        Self {
            source: Some(source),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Fetcher with no backing service; yields placeholders only.
    pub fn disabled() -> Self {
        Self {
            source: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Build from the NEWS_API_KEY environment variable.
    pub fn from_env() -> Self {
        match std::env::var("NEWS_API_KEY") {
            Ok(key) if !key.trim().is_empty() => {
                Self::new(Arc::new(NewsApiClient::new(key)))
            }
            _ => {
                tracing::warn!(
                    "NEWS_API_KEY not set; news analysis will use neutral placeholders"
                );
                Self::disabled()
            }
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Fetch news for every symbol concurrently. `queries` supplies an
    /// optional search keyword per symbol; the symbol itself is the fallback.
    pub async fn fetch(
        &self,
        symbols: &[String],
        queries: &HashMap<String, String>,
    ) -> HashMap<String, NewsRecord> {
        let source = match &self.source {
            Some(source) => source,
            None => {
                return symbols
                    .iter()
                    .map(|s| (s.clone(), NewsRecord::placeholder(s)))
                    .collect();
            }
        };

        let fetches = symbols.iter().map(|symbol| {
            let source = Arc::clone(source);
            let query = queries
                .get(symbol)
                .cloned()
                .unwrap_or_else(|| symbol.clone());
            let page_size = self.page_size;
            async move {
                let articles = match source.fetch(&query, page_size).await {
                    Ok(articles) => articles,
                    Err(e) => {
                        tracing::warn!("news fetch failed for {}: {}", symbol, e);
                        Vec::new()
                    }
                };
                tracing::info!("{}: {} articles", symbol, articles.len());
                let record = NewsRecord {
                    symbol: symbol.clone(),
                    articles,
                    sentiment_hint: "neutral".to_string(),
                };
                (symbol.clone(), record)
            }
        });

        join_all(fetches).await.into_iter().collect()
    }
}
