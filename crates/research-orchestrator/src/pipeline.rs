use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use analytics_engine::{report, AnalyticsEngine};
use chrono::Utc;
use futures::future::join_all;
use market_data::MarketDataFetcher;
use news_client::NewsFetcher;
use research_core::{
    GeneratedReport, MarketFetchOutcome, NewsRecord, ReportMetadata, ReportRenderer, RunOutcome,
    RunReport, SessionState, SymbolExtractor,
};
use symbol_resolver::SymbolResolver;
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::config::OrchestratorConfig;
use crate::ingress::normalize_mentions;

/// The full analysis pipeline: extract symbols, resolve them, fetch market
/// data and news concurrently, analyze, and optionally hand the narrative to
/// a report renderer.
///
/// Each `run` owns an isolated `SessionState`; independent runs share no
/// mutable state, so any number may execute concurrently.
pub struct ResearchPipeline {
    extractor: Arc<dyn SymbolExtractor>,
    resolver: SymbolResolver,
    market: MarketDataFetcher,
    news: NewsFetcher,
    analytics: AnalyticsEngine,
    renderer: Option<Arc<dyn ReportRenderer>>,
    config: OrchestratorConfig,
}

impl ResearchPipeline {
    pub fn new(
        extractor: Arc<dyn SymbolExtractor>,
        resolver: SymbolResolver,
        market: MarketDataFetcher,
        news: NewsFetcher,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            extractor,
            resolver,
            market,
            news,
            analytics: AnalyticsEngine::new(),
            renderer: None,
            config,
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn ReportRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Run the pipeline for one free-text request.
    pub async fn run(&self, message: &str) -> RunReport {
        let mut state = SessionState::new();

        // Stage 1: extraction.
        let extraction = match self.extractor.extract(message).await {
            Ok(extraction) => extraction,
            Err(e) => {
                warn!(error = %e, "symbol extraction failed");
                return aborted(state, format!("symbol extraction failed: {}", e));
            }
        };
        let mentions = normalize_mentions(extraction.symbols.clone());
        if mentions.is_empty() {
            info!("no stock symbols found in request");
            return aborted(state, "no symbols found".to_string());
        }

        // Stage 2: resolution. Unresolvable mentions drop silently; the run
        // aborts only when the whole batch empties out.
        let mut resolved: HashSet<String> = HashSet::new();
        let mut queries: HashMap<String, String> = HashMap::new();
        for (index, mention) in mentions.iter().enumerate() {
            if let Some(symbol) = self.resolver.resolve(mention).await {
                if let Some(query) = extraction.query_for(index) {
                    queries.insert(symbol.clone(), query.to_string());
                }
                resolved.insert(symbol);
            }
        }
        if resolved.is_empty() {
            info!("no mentions resolved to a symbol");
            return aborted(state, "no symbols resolved".to_string());
        }
        let mut symbols: Vec<String> = resolved.into_iter().collect();
        symbols.sort();
        info!(symbols = ?symbols, "resolved symbol set");
        state.symbols = symbols.clone();
        state.search_queries = queries.clone();

        // Stage 3: market and news fan-out over the identical symbol set.
        // A timeout on one side degrades that side only.
        let fetch_timeout = self.config.fetch_timeout;
        let (market_result, news_result) = tokio::join!(
            timeout(
                fetch_timeout,
                self.market
                    .fetch(&symbols, self.config.period, self.config.interval)
            ),
            timeout(fetch_timeout, self.news.fetch(&symbols, &queries)),
        );
        state.market_data = match market_result {
            Ok(data) => data,
            Err(_) => {
                warn!("market data fan-out timed out");
                symbols
                    .iter()
                    .map(|s| {
                        (
                            s.clone(),
                            MarketFetchOutcome::Error {
                                message: "market data fetch timed out".to_string(),
                            },
                        )
                    })
                    .collect()
            }
        };
        state.news_analysis = match news_result {
            Ok(data) => data,
            Err(_) => {
                warn!("news fan-out timed out");
                symbols
                    .iter()
                    .map(|s| (s.clone(), NewsRecord::empty(s)))
                    .collect()
            }
        };

        // Stage 4: analytics over the whole set at once.
        let analysis = self
            .analytics
            .analyze_all(&state.market_data, &state.news_analysis);
        let narrative =
            report::render_report(&analysis.insights, &analysis.failures, &state.market_data);
        let failure_count = analysis.failures.len();
        let success_count = analysis.insights.len();
        state.stock_insights = analysis.insights;

        if success_count == 0 {
            state.generated_report = Some(GeneratedReport {
                content: narrative,
                artifact_ref: None,
                generated_at: Utc::now(),
                error: None,
            });
            return aborted(state, "all symbols failed".to_string());
        }

        // Stage 5: optional rendering. Failure is recorded, never fatal.
        state.generated_report = Some(self.render(&state.symbols, narrative).await);

        let outcome = if failure_count == 0 {
            RunOutcome::Completed
        } else {
            RunOutcome::PartiallyCompleted
        };
        info!(?outcome, success_count, failure_count, "run finished");
        RunReport { outcome, state }
    }

    /// Run many independent requests, at most `max_concurrency` at a time.
    pub async fn run_batch(&self, messages: &[String]) -> Vec<RunReport> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency));
        let runs = messages.iter().map(|message| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                // Holders never close the semaphore, so acquire cannot fail.
                let _permit = semaphore.acquire().await;
                self.run(message).await
            }
        });
        join_all(runs).await
    }

    async fn render(&self, symbols: &[String], narrative: String) -> GeneratedReport {
        let renderer = match &self.renderer {
            Some(renderer) => renderer,
            None => {
                return GeneratedReport {
                    content: narrative,
                    artifact_ref: None,
                    generated_at: Utc::now(),
                    error: None,
                }
            }
        };
        let metadata = ReportMetadata {
            symbols: symbols.to_vec(),
            generated_at: Utc::now(),
            report_type: "equity_research".to_string(),
        };
        match renderer.render(&narrative, &metadata).await {
            Ok(artifact_ref) => GeneratedReport {
                content: narrative,
                artifact_ref: Some(artifact_ref),
                generated_at: Utc::now(),
                error: None,
            },
            Err(e) => {
                warn!(error = %e, "report rendering failed");
                GeneratedReport {
                    content: narrative,
                    artifact_ref: None,
                    generated_at: Utc::now(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

fn aborted(state: SessionState, reason: String) -> RunReport {
    RunReport {
        outcome: RunOutcome::Aborted { reason },
        state,
    }
}
