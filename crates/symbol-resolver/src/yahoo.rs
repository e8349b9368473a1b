use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use research_core::{ResearchError, SymbolCandidate, SymbolSearch};

const SEARCH_URL: &str = "https://query1.finance.yahoo.com/v1/finance/search";

// The search endpoint rejects default client UAs.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/113.0.0.0 Safari/537.36";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<QuoteEntry>,
}

#[derive(Debug, Deserialize)]
struct QuoteEntry {
    symbol: Option<String>,
    #[serde(rename = "shortname")]
    short_name: Option<String>,
}

/// Symbol search backed by the Yahoo Finance search endpoint.
#[derive(Clone)]
pub struct YahooSymbolSearch {
    client: Client,
}

impl YahooSymbolSearch {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }
}

impl Default for YahooSymbolSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SymbolSearch for YahooSymbolSearch {
    async fn search(&self, query: &str) -> Result<Vec<SymbolCandidate>, ResearchError> {
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[("q", query)])
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ResearchError::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ResearchError::Api(format!(
                "symbol search HTTP {}",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| ResearchError::Api(e.to_string()))?;

        Ok(body
            .quotes
            .into_iter()
            .filter_map(|q| {
                q.symbol.map(|symbol| SymbolCandidate {
                    symbol,
                    name: q.short_name,
                })
            })
            .collect())
    }
}
