use research_core::{
    DividendTier, FundamentalAnalysis, GrowthOutlook, MarketSummary, RiskTier, SizeTier, Valuation,
};

use crate::thresholds::*;

pub struct FundamentalAnalysisEngine;

impl FundamentalAnalysisEngine {
    pub fn new() -> Self {
        Self
    }

    /// Classify a symbol's fundamentals from its summary snapshot.
    ///
    /// Missing fields never alias onto real values: an absent P/E is Unknown,
    /// while a zero P/E classifies as Undervalued like any P/E at or below
    /// the attractive cutoff.
    pub fn analyze(&self, symbol: &str, summary: &MarketSummary) -> FundamentalAnalysis {
        let valuation = classify_valuation(summary.pe_ratio);
        let growth_outlook = classify_growth(summary);
        let risk = classify_risk(summary.beta);
        let dividend = classify_dividend(summary.dividend_yield);
        let size = classify_size(summary.market_cap);

        FundamentalAnalysis {
            symbol: symbol.to_string(),
            valuation_score: valuation.score(),
            valuation,
            growth_outlook,
            risk,
            dividend,
            stability_score: size.stability_score(),
            size,
        }
    }
}

impl Default for FundamentalAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn classify_valuation(pe_ratio: Option<f64>) -> Valuation {
    match pe_ratio {
        None => Valuation::Unknown,
        Some(pe) if pe > EXPENSIVE_PE => Valuation::Expensive,
        Some(pe) if pe > FAIR_VALUE_PE => Valuation::FairValue,
        Some(pe) if pe > ATTRACTIVE_PE => Valuation::Attractive,
        Some(_) => Valuation::Undervalued,
    }
}

fn classify_growth(summary: &MarketSummary) -> GrowthOutlook {
    let eps = summary.eps.unwrap_or(0.0);
    if let (Some(forward_pe), Some(pe)) = (summary.forward_pe, summary.pe_ratio) {
        if forward_pe < pe && eps > STRONG_EPS {
            return GrowthOutlook::Strong;
        }
    }
    if eps > MODERATE_EPS {
        GrowthOutlook::Moderate
    } else {
        GrowthOutlook::Weak
    }
}

fn classify_risk(beta: Option<f64>) -> RiskTier {
    match beta {
        None => RiskTier::Unknown,
        Some(b) if b > HIGH_BETA => RiskTier::HighVolatility,
        Some(b) if b > ABOVE_MARKET_BETA => RiskTier::AboveMarketRisk,
        Some(b) if b > MARKET_BETA => RiskTier::MarketRisk,
        Some(_) => RiskTier::LowVolatility,
    }
}

fn classify_dividend(dividend_yield: Option<f64>) -> DividendTier {
    match dividend_yield {
        Some(y) if y > HIGH_YIELD => DividendTier::HighYield,
        Some(y) if y > MODERATE_YIELD => DividendTier::ModerateYield,
        _ => DividendTier::GrowthFocus,
    }
}

fn classify_size(market_cap: Option<f64>) -> SizeTier {
    match market_cap {
        None => SizeTier::Unknown,
        Some(cap) if cap >= MEGA_CAP => SizeTier::MegaCap,
        Some(cap) if cap >= LARGE_CAP => SizeTier::LargeCap,
        Some(_) => SizeTier::MidCap,
    }
}
