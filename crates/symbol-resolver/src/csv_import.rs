use crate::SymbolResolver;

/// Extract stock mentions from CSV content.
///
/// A `Symbol` column is taken verbatim; otherwise a `Company` column is
/// resolved through the search service. Unreadable rows are skipped.
pub async fn symbols_from_csv(content: &str, resolver: &SymbolResolver) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = match reader.headers() {
        Ok(h) => h.clone(),
        Err(e) => {
            tracing::warn!("CSV header read error: {}", e);
            return Vec::new();
        }
    };

    let symbol_col = headers.iter().position(|h| h.trim() == "Symbol");
    let company_col = headers.iter().position(|h| h.trim() == "Company");

    let mut symbols = Vec::new();
    for record in reader.records().flatten() {
        if let Some(col) = symbol_col {
            if let Some(value) = record.get(col) {
                let value = value.trim();
                if !value.is_empty() {
                    symbols.push(value.to_uppercase());
                }
            }
        } else if let Some(col) = company_col {
            if let Some(value) = record.get(col) {
                let value = value.trim();
                if !value.is_empty() {
                    if let Some(symbol) = resolver.resolve(value).await {
                        symbols.push(symbol);
                    }
                }
            }
        }
    }
    symbols
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use research_core::{ResearchError, SymbolCandidate, SymbolSearch};
    use std::sync::Arc;

    struct NoSearch;

    #[async_trait]
    impl SymbolSearch for NoSearch {
        async fn search(&self, _query: &str) -> Result<Vec<SymbolCandidate>, ResearchError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn symbol_column_is_taken_verbatim() {
        let resolver = SymbolResolver::new(Arc::new(NoSearch));
        let csv = "Symbol,Weight\naapl,0.5\nMSFT,0.5\n";
        let symbols = symbols_from_csv(csv, &resolver).await;
        assert_eq!(symbols, vec!["AAPL".to_string(), "MSFT".to_string()]);
    }

    #[tokio::test]
    async fn missing_columns_yield_nothing() {
        let resolver = SymbolResolver::new(Arc::new(NoSearch));
        let csv = "Name,Price\nfoo,1.0\n";
        assert!(symbols_from_csv(csv, &resolver).await.is_empty());
    }
}
