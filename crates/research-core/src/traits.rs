use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Article, FetchInterval, FetchPeriod, MarketRecord, ResearchError};

/// Structured output of the symbol-extraction collaborator.
///
/// `search_queries` is positionally aligned with `symbols`; when shorter,
/// the symbol itself is used as the news keyword.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolExtraction {
    pub symbols: Vec<String>,
    #[serde(default)]
    pub search_queries: Vec<String>,
}

impl SymbolExtraction {
    /// News keyword for the mention at `index`: the aligned search query if
    /// one was supplied, otherwise the raw mention.
    pub fn query_for(&self, index: usize) -> Option<&str> {
        self.search_queries.get(index).map(|s| s.as_str())
    }
}

/// One candidate from the symbol-search service, ranked best-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolCandidate {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Metadata handed to the report renderer alongside the narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub symbols: Vec<String>,
    pub generated_at: DateTime<Utc>,
    pub report_type: String,
}

/// LLM-backed extraction of stock mentions from a free-text message.
/// The sentinel "no symbols" response maps to an empty `symbols` list;
/// malformed structured output is an `Extraction` error.
#[async_trait]
pub trait SymbolExtractor: Send + Sync {
    async fn extract(&self, message: &str) -> Result<SymbolExtraction, ResearchError>;
}

/// Free-text symbol search. Errors and timeouts are the caller's to swallow.
#[async_trait]
pub trait SymbolSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SymbolCandidate>, ResearchError>;
}

/// Single-symbol market data retrieval.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch(
        &self,
        symbol: &str,
        period: FetchPeriod,
        interval: FetchInterval,
    ) -> Result<MarketRecord, ResearchError>;
}

/// Keyword news retrieval, most recent first, up to `page_size` articles.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch(&self, query: &str, page_size: u32) -> Result<Vec<Article>, ResearchError>;
}

/// Persists a rendered report artifact and returns a reference to it.
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    async fn render(
        &self,
        narrative: &str,
        metadata: &ReportMetadata,
    ) -> Result<String, ResearchError>;
}
