use std::collections::HashMap;

use fundamental_analysis::FundamentalAnalysisEngine;
use research_core::{MarketFetchOutcome, MarketRecord, NewsRecord, SymbolReport};
use sentiment_analysis::SentimentAnalysisEngine;
use technical_analysis::TechnicalAnalysisEngine;
use tracing::{info, warn};

use crate::recommend::recommend;
use crate::report;

/// Result of an `analyze_all` batch: per-symbol reports plus the symbols
/// whose market fetch failed (carried through, never silently dropped).
#[derive(Debug, Default)]
pub struct AnalysisOutcome {
    pub insights: HashMap<String, SymbolReport>,
    pub failures: HashMap<String, String>,
}

/// One engine for both single-symbol and batch analysis. Batch mode reuses
/// the single-symbol path per entry.
pub struct AnalyticsEngine {
    technical: TechnicalAnalysisEngine,
    fundamental: FundamentalAnalysisEngine,
    sentiment: SentimentAnalysisEngine,
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self {
            technical: TechnicalAnalysisEngine::new(),
            fundamental: FundamentalAnalysisEngine::new(),
            sentiment: SentimentAnalysisEngine::new(),
        }
    }

    pub fn analyze(
        &self,
        symbol: &str,
        record: &MarketRecord,
        news: &NewsRecord,
    ) -> SymbolReport {
        let technical = self.technical.analyze(symbol, record);
        let fundamental = self.fundamental.analyze(symbol, &record.summary);
        let sentiment = self.sentiment.analyze(news);
        let recommendation =
            recommend(symbol, &technical, &fundamental, &sentiment, &record.summary);
        let narrative = report::symbol_section(
            &technical,
            &fundamental,
            &sentiment,
            &recommendation,
            &record.summary,
        );
        SymbolReport {
            symbol: symbol.to_string(),
            technical,
            fundamental,
            sentiment,
            recommendation,
            narrative,
        }
    }

    pub fn analyze_all(
        &self,
        market: &HashMap<String, MarketFetchOutcome>,
        news: &HashMap<String, NewsRecord>,
    ) -> AnalysisOutcome {
        let mut outcome = AnalysisOutcome::default();
        for (symbol, fetch) in market {
            match fetch {
                MarketFetchOutcome::Data(record) => {
                    let empty;
                    let record_news = match news.get(symbol) {
                        Some(n) => n,
                        None => {
                            empty = NewsRecord::empty(symbol);
                            &empty
                        }
                    };
                    let insight = self.analyze(symbol, record, record_news);
                    info!(
                        symbol,
                        overall_score = insight.recommendation.overall_score,
                        "symbol analysis complete"
                    );
                    outcome.insights.insert(symbol.clone(), insight);
                }
                MarketFetchOutcome::Error { message } => {
                    warn!(symbol, error = %message, "skipping analysis, market fetch failed");
                    outcome.failures.insert(symbol.clone(), message.clone());
                }
            }
        }
        outcome
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}
