use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;

use research_core::{FetchInterval, FetchPeriod, MarketDataSource, MarketFetchOutcome};

/// Batch market data retrieval with per-symbol failure isolation.
///
/// The result map always carries exactly the requested key set: a symbol
/// whose fetch failed appears as an error marker, never silently dropped.
pub struct MarketDataFetcher {
    source: Arc<dyn MarketDataSource>,
}

impl MarketDataFetcher {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self { source }
    }

    pub async fn fetch(
        &self,
        symbols: &[String],
        period: FetchPeriod,
        interval: FetchInterval,
    ) -> HashMap<String, MarketFetchOutcome> {
        let fetches = symbols.iter().map(|symbol| {
            let source = Arc::clone(&self.source);
            async move {
                tracing::info!("fetching market data for {}", symbol);
                let outcome = match source.fetch(symbol, period, interval).await {
                    Ok(record) => MarketFetchOutcome::Data(record),
                    Err(e) => {
                        tracing::warn!("market data fetch failed for {}: {}", symbol, e);
                        MarketFetchOutcome::Error {
                            message: e.to_string(),
                        }
                    }
                };
                (symbol.clone(), outcome)
            }
        });

        join_all(fetches).await.into_iter().collect()
    }
}
