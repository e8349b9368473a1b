use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use market_data::MarketDataFetcher;
use news_client::NewsFetcher;
use research_core::{
    Article, FetchInterval, FetchPeriod, MarketRecord, MarketSummary, NewsSource, OhlcvBar,
    ReportMetadata, ReportRenderer, ResearchError, RunOutcome, SymbolCandidate, SymbolExtraction,
    SymbolExtractor, SymbolSearch, MarketDataSource,
};
use symbol_resolver::SymbolResolver;

use crate::{OrchestratorConfig, ResearchPipeline};

struct FixedExtractor {
    symbols: Vec<&'static str>,
    queries: Vec<&'static str>,
}

#[async_trait]
impl SymbolExtractor for FixedExtractor {
    async fn extract(&self, _message: &str) -> Result<SymbolExtraction, ResearchError> {
        Ok(SymbolExtraction {
            symbols: self.symbols.iter().map(|s| s.to_string()).collect(),
            search_queries: self.queries.iter().map(|s| s.to_string()).collect(),
        })
    }
}

struct FailingExtractor;

#[async_trait]
impl SymbolExtractor for FailingExtractor {
    async fn extract(&self, _message: &str) -> Result<SymbolExtraction, ResearchError> {
        Err(ResearchError::Extraction("malformed output".to_string()))
    }
}

struct PanickingSearch;

#[async_trait]
impl SymbolSearch for PanickingSearch {
    async fn search(&self, query: &str) -> Result<Vec<SymbolCandidate>, ResearchError> {
        panic!("search must not be called for {}", query);
    }
}

/// Counts invocations so tests can prove a stage never ran.
struct CountingMarketSource {
    calls: AtomicUsize,
    failing_symbol: Option<&'static str>,
}

impl CountingMarketSource {
    fn new(failing_symbol: Option<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            failing_symbol,
        })
    }
}

#[async_trait]
impl MarketDataSource for CountingMarketSource {
    async fn fetch(
        &self,
        symbol: &str,
        _period: FetchPeriod,
        _interval: FetchInterval,
    ) -> Result<MarketRecord, ResearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_symbol == Some(symbol) {
            return Err(ResearchError::Api("ticker not found".to_string()));
        }
        Ok(sample_record())
    }
}

struct EchoNews;

#[async_trait]
impl NewsSource for EchoNews {
    async fn fetch(&self, query: &str, _page_size: u32) -> Result<Vec<Article>, ResearchError> {
        Ok(vec![Article {
            title: format!("{} posts strong growth", query),
            url: "https://example.com".to_string(),
            source: "Wire".to_string(),
            published_at: None,
        }])
    }
}

struct FailingRenderer;

#[async_trait]
impl ReportRenderer for FailingRenderer {
    async fn render(
        &self,
        _narrative: &str,
        _metadata: &ReportMetadata,
    ) -> Result<String, ResearchError> {
        Err(ResearchError::Render("disk full".to_string()))
    }
}

struct OkRenderer;

#[async_trait]
impl ReportRenderer for OkRenderer {
    async fn render(
        &self,
        _narrative: &str,
        metadata: &ReportMetadata,
    ) -> Result<String, ResearchError> {
        Ok(format!("report_{}.txt", metadata.symbols.join("_")))
    }
}

fn sample_record() -> MarketRecord {
    MarketRecord {
        summary: MarketSummary {
            open: Some(110.0),
            previous_close: Some(100.0),
            day_high: Some(112.0),
            day_low: Some(108.0),
            fifty_two_week_high: Some(120.0),
            fifty_two_week_low: Some(80.0),
            volume: Some(2_000_000.0),
            pe_ratio: Some(18.0),
            market_cap: Some(900_000_000_000.0),
            ..MarketSummary::default()
        },
        price_history: (1..6)
            .map(|d| OhlcvBar {
                date: NaiveDate::from_ymd_opt(2025, 6, d).unwrap(),
                open: 100.0,
                high: 112.0,
                low: 99.0,
                close: 100.0 + d as f64,
                volume: 1_000_000.0,
            })
            .collect(),
    }
}

fn pipeline(
    extractor: Arc<dyn SymbolExtractor>,
    market: Arc<dyn MarketDataSource>,
) -> ResearchPipeline {
    ResearchPipeline::new(
        extractor,
        SymbolResolver::new(Arc::new(PanickingSearch)),
        MarketDataFetcher::new(market),
        NewsFetcher::new(Arc::new(EchoNews)),
        OrchestratorConfig::default(),
    )
}

#[tokio::test]
async fn empty_mention_list_aborts_without_fetching() {
    let market = CountingMarketSource::new(None);
    let pipeline = pipeline(
        Arc::new(FixedExtractor {
            symbols: vec![],
            queries: vec![],
        }),
        market.clone(),
    );
    let report = pipeline.run("what's the weather?").await;
    assert!(matches!(report.outcome, RunOutcome::Aborted { ref reason } if reason == "no symbols found"));
    assert_eq!(market.calls.load(Ordering::SeqCst), 0);
    assert!(report.state.symbols.is_empty());
}

#[tokio::test]
async fn extraction_failure_aborts() {
    let market = CountingMarketSource::new(None);
    let pipeline = pipeline(Arc::new(FailingExtractor), market.clone());
    let report = pipeline.run("analyze MSFT").await;
    assert!(
        matches!(report.outcome, RunOutcome::Aborted { ref reason } if reason.contains("extraction failed"))
    );
    assert_eq!(market.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn clean_run_completes() {
    let market = CountingMarketSource::new(None);
    let pipeline = pipeline(
        Arc::new(FixedExtractor {
            symbols: vec!["MSFT", "AAPL"],
            queries: vec!["Microsoft", "Apple"],
        }),
        market.clone(),
    )
    .with_renderer(Arc::new(OkRenderer));

    let report = pipeline.run("analyze MSFT and AAPL").await;
    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(report.state.symbols, vec!["AAPL", "MSFT"]);
    assert_eq!(report.state.stock_insights.len(), 2);
    assert_eq!(market.calls.load(Ordering::SeqCst), 2);

    let generated = report.state.generated_report.as_ref().unwrap();
    assert!(generated.error.is_none());
    assert_eq!(
        generated.artifact_ref.as_deref(),
        Some("report_AAPL_MSFT.txt")
    );
    assert!(generated.content.contains("=== Portfolio Summary ==="));
}

#[tokio::test]
async fn one_failed_symbol_is_partial() {
    let market = CountingMarketSource::new(Some("BAD"));
    let pipeline = pipeline(
        Arc::new(FixedExtractor {
            symbols: vec!["MSFT", "AAPL", "BAD"],
            queries: vec![],
        }),
        market,
    );

    let report = pipeline.run("analyze three").await;
    assert_eq!(report.outcome, RunOutcome::PartiallyCompleted);
    assert_eq!(report.state.stock_insights.len(), 2);
    assert!(report.state.stock_insights.contains_key("MSFT"));
    assert!(report.state.stock_insights.contains_key("AAPL"));
    // Failed symbol stays in the market map as an error marker.
    assert!(report.state.market_data["BAD"].error_message().is_some());

    let generated = report.state.generated_report.as_ref().unwrap();
    assert!(generated.content.contains("BAD: API error: ticker not found"));
}

#[tokio::test]
async fn all_symbols_failing_aborts() {
    let market = CountingMarketSource::new(Some("MSFT"));
    let pipeline = pipeline(
        Arc::new(FixedExtractor {
            symbols: vec!["MSFT"],
            queries: vec![],
        }),
        market,
    );
    let report = pipeline.run("analyze MSFT").await;
    assert!(
        matches!(report.outcome, RunOutcome::Aborted { ref reason } if reason == "all symbols failed")
    );
    // The error narrative is still stored for the caller.
    assert!(report.state.generated_report.is_some());
}

#[tokio::test]
async fn legacy_stringified_list_is_normalized() {
    let market = CountingMarketSource::new(None);
    let pipeline = pipeline(
        Arc::new(FixedExtractor {
            symbols: vec!["['MSFT', 'AAPL']"],
            queries: vec![],
        }),
        market,
    );
    let report = pipeline.run("analyze").await;
    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(report.state.symbols, vec!["AAPL", "MSFT"]);
}

#[tokio::test]
async fn render_failure_does_not_invalidate_analytics() {
    let market = CountingMarketSource::new(None);
    let pipeline = pipeline(
        Arc::new(FixedExtractor {
            symbols: vec!["MSFT"],
            queries: vec![],
        }),
        market,
    )
    .with_renderer(Arc::new(FailingRenderer));

    let report = pipeline.run("analyze MSFT").await;
    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(report.state.stock_insights.len(), 1);
    let generated = report.state.generated_report.as_ref().unwrap();
    assert_eq!(
        generated.error.as_deref(),
        Some("Report rendering failed: disk full")
    );
    assert!(generated.artifact_ref.is_none());
}

#[tokio::test]
async fn batch_runs_are_isolated() {
    let market = CountingMarketSource::new(None);
    let pipeline = pipeline(
        Arc::new(FixedExtractor {
            symbols: vec!["MSFT"],
            queries: vec![],
        }),
        market,
    );
    let messages = vec!["first".to_string(), "second".to_string()];
    let reports = pipeline.run_batch(&messages).await;
    assert_eq!(reports.len(), 2);
    for report in &reports {
        assert_eq!(report.outcome, RunOutcome::Completed);
        assert_eq!(report.state.symbols, vec!["MSFT"]);
    }
}
