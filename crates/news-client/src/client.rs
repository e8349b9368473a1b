use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use research_core::{Article, NewsSource, ResearchError};

const BASE_URL: &str = "https://newsapi.org/v2/everything";

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    source: Option<RawSource>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: Option<String>,
}

/// NewsAPI keyword search client. Requires an API key.
#[derive(Clone)]
pub struct NewsApiClient {
    api_key: String,
    client: Client,
}

impl NewsApiClient {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { api_key, client }
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn fetch(&self, query: &str, page_size: u32) -> Result<Vec<Article>, ResearchError> {
        let response = self
            .client
            .get(BASE_URL)
            .query(&[
                ("q", query),
                ("language", "en"),
                ("pageSize", &page_size.to_string()),
                ("sortBy", "publishedAt"),
                ("apiKey", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| ResearchError::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ResearchError::Api(format!(
                "news API HTTP {} for {:?}",
                response.status(),
                query
            )));
        }

        let body: NewsApiResponse = response
            .json()
            .await
            .map_err(|e| ResearchError::Api(e.to_string()))?;

        Ok(body
            .articles
            .into_iter()
            .filter_map(|a| {
                let title = a.title?;
                let url = a.url?;
                Some(Article {
                    title,
                    url,
                    source: a
                        .source
                        .and_then(|s| s.name)
                        .unwrap_or_else(|| "Unknown".to_string()),
                    published_at: a
                        .published_at
                        .as_deref()
                        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                        .map(|dt| dt.with_timezone(&Utc)),
                })
            })
            .collect())
    }
}
