use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use research_core::{
    FetchInterval, FetchPeriod, MarketDataSource, MarketRecord, MarketSummary, OhlcvBar,
    ResearchError,
};

const BASE_URL: &str = "https://query1.finance.yahoo.com";

// The quote endpoints reject default client UAs.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/113.0.0.0 Safari/537.36";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartOuter,
}

#[derive(Debug, Deserialize)]
struct ChartOuter {
    result: Option<Vec<ChartResult>>,
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Market data source backed by the Yahoo Finance chart and quoteSummary
/// endpoints. No caching — every call re-fetches.
#[derive(Clone)]
pub struct YahooMarketData {
    client: Client,
}

impl YahooMarketData {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }

    async fn fetch_history(
        &self,
        symbol: &str,
        period: FetchPeriod,
        interval: FetchInterval,
    ) -> Result<Vec<OhlcvBar>, ResearchError> {
        let url = format!("{}/v8/finance/chart/{}", BASE_URL, symbol);

        let response = self
            .client
            .get(&url)
            .query(&[("range", period.as_str()), ("interval", interval.as_str())])
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| ResearchError::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ResearchError::Api(format!(
                "chart HTTP {} for {}",
                response.status(),
                symbol
            )));
        }

        let body: ChartResponse = response
            .json()
            .await
            .map_err(|e| ResearchError::Api(e.to_string()))?;

        if let Some(err) = body.chart.error {
            return Err(ResearchError::Api(format!("chart error for {}: {}", symbol, err)));
        }

        let result = body
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or_else(|| ResearchError::Api(format!("no chart data for {}", symbol)))?;

        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .unwrap_or_default();

        // Rows with null fields (holidays, halts) are skipped wholesale so the
        // history stays internally consistent.
        let mut bars = Vec::with_capacity(result.timestamp.len());
        for (i, ts) in result.timestamp.iter().enumerate() {
            let row = (
                quote.open.get(i).copied().flatten(),
                quote.high.get(i).copied().flatten(),
                quote.low.get(i).copied().flatten(),
                quote.close.get(i).copied().flatten(),
                quote.volume.get(i).copied().flatten(),
            );
            if let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = row {
                let date = DateTime::from_timestamp(*ts, 0)
                    .ok_or_else(|| ResearchError::InvalidData(format!("bad timestamp {}", ts)))?
                    .date_naive();
                bars.push(OhlcvBar {
                    date,
                    open,
                    high,
                    low,
                    close,
                    volume,
                });
            }
        }

        Ok(bars)
    }

    async fn fetch_summary(&self, symbol: &str) -> Result<MarketSummary, ResearchError> {
        let url = format!("{}/v10/finance/quoteSummary/{}", BASE_URL, symbol);

        let response = self
            .client
            .get(&url)
            .query(&[(
                "modules",
                "summaryDetail,defaultKeyStatistics,assetProfile,price",
            )])
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| ResearchError::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ResearchError::Api(format!(
                "quoteSummary HTTP {} for {}",
                response.status(),
                symbol
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ResearchError::Api(e.to_string()))?;

        let result = body
            .get("quoteSummary")
            .and_then(|v| v.get("result"))
            .and_then(|v| v.get(0))
            .ok_or_else(|| ResearchError::Api(format!("no summary data for {}", symbol)))?;

        Ok(parse_summary(result))
    }
}

impl Default for YahooMarketData {
    fn default() -> Self {
        Self::new()
    }
}

/// Yahoo wraps numeric fields as `{"raw": 1.23, "fmt": "1.23"}`.
fn raw(module: &Value, field: &str) -> Option<f64> {
    module.get(field).and_then(|v| v.get("raw")).and_then(|v| v.as_f64())
}

fn parse_summary(result: &Value) -> MarketSummary {
    let detail = result.get("summaryDetail").cloned().unwrap_or(Value::Null);
    let stats = result
        .get("defaultKeyStatistics")
        .cloned()
        .unwrap_or(Value::Null);
    let profile = result.get("assetProfile").cloned().unwrap_or(Value::Null);
    let price = result.get("price").cloned().unwrap_or(Value::Null);

    MarketSummary {
        open: raw(&detail, "open"),
        previous_close: raw(&detail, "previousClose"),
        day_high: raw(&detail, "dayHigh"),
        day_low: raw(&detail, "dayLow"),
        fifty_two_week_high: raw(&detail, "fiftyTwoWeekHigh"),
        fifty_two_week_low: raw(&detail, "fiftyTwoWeekLow"),
        volume: raw(&detail, "volume"),
        book_value: raw(&stats, "bookValue"),
        dividend_rate: raw(&detail, "dividendRate"),
        // Upstream yield is a fraction; classification thresholds are in percent.
        dividend_yield: raw(&detail, "dividendYield").map(|y| y * 100.0),
        beta: raw(&detail, "beta").or_else(|| raw(&stats, "beta")),
        pe_ratio: raw(&detail, "trailingPE"),
        forward_pe: raw(&detail, "forwardPE").or_else(|| raw(&stats, "forwardPE")),
        eps: raw(&stats, "trailingEps"),
        pb_ratio: raw(&stats, "priceToBook"),
        sector: profile
            .get("sector")
            .and_then(|v| v.as_str())
            .map(str::to_string),
        market_cap: raw(&detail, "marketCap").or_else(|| raw(&price, "marketCap")),
        enterprise_value: raw(&stats, "enterpriseValue"),
        fifty_day_average: raw(&detail, "fiftyDayAverage"),
    }
}

#[async_trait]
impl MarketDataSource for YahooMarketData {
    async fn fetch(
        &self,
        symbol: &str,
        period: FetchPeriod,
        interval: FetchInterval,
    ) -> Result<MarketRecord, ResearchError> {
        let (history, summary) = tokio::join!(
            self.fetch_history(symbol, period, interval),
            self.fetch_summary(symbol),
        );

        Ok(MarketRecord {
            summary: summary?,
            price_history: history?,
        })
    }
}
