use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{MarketFetchOutcome, NewsRecord, SymbolReport};

/// Terminal state of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Every stage ran and every symbol produced a report.
    Completed,
    /// At least one symbol succeeded, at least one per-symbol fetch or
    /// analysis failed.
    PartiallyCompleted,
    /// No symbols resolved, or extraction failed.
    Aborted { reason: String },
}

/// Report artifact record, or an error marker when rendering failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedReport {
    pub content: String,
    pub artifact_ref: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub error: Option<String>,
}

/// Per-run shared state, exclusively owned by one in-flight pipeline run.
///
/// Each stage writes to its own slot and never reads a slot before the
/// producing stage completed — stage ordering is the synchronization, so no
/// locking is needed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    /// Canonical resolved symbols, sorted for deterministic downstream order.
    pub symbols: Vec<String>,
    /// News keyword per symbol, where the extraction stage supplied one.
    pub search_queries: HashMap<String, String>,
    pub market_data: HashMap<String, MarketFetchOutcome>,
    pub news_analysis: HashMap<String, NewsRecord>,
    pub stock_insights: HashMap<String, SymbolReport>,
    pub generated_report: Option<GeneratedReport>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Outcome plus the state accumulated across stages for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub state: SessionState,
}
