use std::sync::Arc;

use async_trait::async_trait;
use market_data::{MarketDataFetcher, YahooMarketData};
use news_client::NewsFetcher;
use research_core::{ResearchError, SymbolExtraction, SymbolExtractor};
use research_orchestrator::{OrchestratorConfig, ResearchPipeline};
use symbol_resolver::{SymbolResolver, YahooSymbolSearch};

/// Extraction backed by the command line: every argument is one mention.
/// The LLM extraction collaborator plugs in through the same trait.
struct ArgsExtractor {
    mentions: Vec<String>,
}

#[async_trait]
impl SymbolExtractor for ArgsExtractor {
    async fn extract(&self, _message: &str) -> Result<SymbolExtraction, ResearchError> {
        Ok(SymbolExtraction {
            symbols: self.mentions.clone(),
            search_queries: Vec::new(),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mentions: Vec<String> = std::env::args().skip(1).collect();
    if mentions.is_empty() {
        anyhow::bail!("usage: research-orchestrator <ticker-or-company>...");
    }
    let message = mentions.join(" ");

    let config = OrchestratorConfig::from_env();
    let pipeline = ResearchPipeline::new(
        Arc::new(ArgsExtractor { mentions }),
        SymbolResolver::new(Arc::new(YahooSymbolSearch::new())),
        MarketDataFetcher::new(Arc::new(YahooMarketData::new())),
        NewsFetcher::from_env(),
        config,
    );

    let report = pipeline.run(&message).await;
    tracing::info!(outcome = ?report.outcome, "pipeline finished");
    if let Some(generated) = &report.state.generated_report {
        println!("{}", generated.content);
    }
    Ok(())
}
