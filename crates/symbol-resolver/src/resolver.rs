use std::collections::HashSet;
use std::sync::Arc;

use research_core::SymbolSearch;

/// Maps free-text company mentions or raw tickers to canonical symbols.
///
/// Failure semantics: search errors and empty candidate lists are treated as
/// "no match" and never propagated — an unresolvable mention is dropped.
pub struct SymbolResolver {
    search: Arc<dyn SymbolSearch>,
}

impl SymbolResolver {
    pub fn new(search: Arc<dyn SymbolSearch>) -> Self {
        Self { search }
    }

    /// A short all-uppercase mention is already canonical. Digits and the
    /// class separators '.'/'-' are allowed (BRK.B), but at least one
    /// uppercase letter is required.
    fn is_canonical(mention: &str) -> bool {
        mention.len() <= 5
            && mention.chars().any(|c| c.is_ascii_uppercase())
            && mention
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '.' || c == '-')
    }

    /// Resolve one mention to its canonical symbol, or `None`.
    ///
    /// Canonical tickers short-circuit without touching the search service.
    pub async fn resolve(&self, mention: &str) -> Option<String> {
        let mention = mention.trim();
        if Self::is_canonical(mention) {
            return Some(mention.to_string());
        }

        match self.search.search(mention).await {
            Ok(candidates) => candidates.into_iter().next().map(|c| c.symbol),
            Err(e) => {
                tracing::debug!("symbol search failed for {:?}: {}", mention, e);
                None
            }
        }
    }

    /// Resolve each mention independently, dropping misses and duplicates.
    /// Set semantics: order is not meaningful downstream.
    pub async fn resolve_all(&self, mentions: &[String]) -> HashSet<String> {
        let mut resolved = HashSet::new();
        for mention in mentions {
            if let Some(symbol) = self.resolve(mention).await {
                resolved.insert(symbol);
            }
        }
        resolved
    }
}
