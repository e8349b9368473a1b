//! Narrative rendering. Pure formatting over already-computed analytics,
//! no new math happens here.

use std::collections::HashMap;
use std::fmt::Write as _;

use research_core::{
    FundamentalAnalysis, MarketFetchOutcome, MarketSummary, NewsSentiment, ProfileAdvice,
    Recommendation, SymbolReport, TechnicalAnalysis,
};

/// Multi-section narrative for one symbol.
pub fn symbol_section(
    technical: &TechnicalAnalysis,
    fundamental: &FundamentalAnalysis,
    sentiment: &NewsSentiment,
    recommendation: &Recommendation,
    summary: &MarketSummary,
) -> String {
    let mut out = String::new();
    let symbol = &technical.symbol;

    let _ = writeln!(out, "=== {} Investment Analysis ===", symbol);
    let _ = writeln!(out);
    let _ = writeln!(out, "Executive Summary");
    let _ = writeln!(
        out,
        "{} scores {:.2}/5.00 overall: {}.",
        symbol,
        recommendation.overall_score,
        recommendation.overall_action.label()
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Technical Analysis");
    let _ = writeln!(
        out,
        "Price change {:+.2}% ({} momentum), trend: {}.",
        technical.change_percent,
        technical.momentum.label(),
        technical.trend.label()
    );
    let _ = writeln!(
        out,
        "Volume {:.2}x the trailing average ({}).",
        technical.volume_ratio,
        technical.volume_signal.label()
    );
    let _ = writeln!(
        out,
        "{:.1}% below the 52-week high, {:.1}% above the 52-week low ({} position).",
        technical.year_high_distance,
        technical.year_low_distance,
        technical.position_strength.label()
    );
    match (technical.support_level, technical.resistance_level) {
        (Some(support), Some(resistance)) => {
            let _ = writeln!(
                out,
                "Support near {:.2}, resistance near {:.2}.",
                support, resistance
            );
        }
        _ => {
            let _ = writeln!(out, "Support/resistance levels unavailable.");
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Fundamental Analysis");
    let _ = writeln!(
        out,
        "Valuation: {} (score {}/5), growth outlook: {}.",
        fundamental.valuation.label(),
        fundamental.valuation_score,
        fundamental.growth_outlook.label()
    );
    let _ = writeln!(
        out,
        "Risk: {}, dividend posture: {}, size: {} (stability {}/5).",
        fundamental.risk.label(),
        fundamental.dividend.label(),
        fundamental.size.label(),
        fundamental.stability_score
    );
    if let Some(sector) = &summary.sector {
        let _ = writeln!(out, "Sector: {}.", sector);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "News & Sentiment");
    let _ = writeln!(
        out,
        "{} articles, sentiment {} (score {}). {}.",
        sentiment.article_count,
        sentiment.sentiment.label(),
        sentiment.score,
        sentiment.impact
    );
    if !sentiment.themes.is_empty() {
        let _ = writeln!(out, "Themes: {}.", sentiment.themes.join(", "));
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Recommendations");
    let _ = writeln!(out, "Overall: {}.", recommendation.overall_action.label());
    write_profile(&mut out, "Conservative", &recommendation.conservative);
    write_profile(&mut out, "Growth", &recommendation.growth);
    write_profile(&mut out, "Income", &recommendation.income);
    let _ = writeln!(out);

    let _ = writeln!(out, "Risk Assessment");
    let _ = writeln!(
        out,
        "Volatility classified as {}; position strength {}.",
        fundamental.risk.label(),
        technical.position_strength.label()
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Score Breakdown");
    let _ = writeln!(
        out,
        "Technical {} | Fundamental {} | Stability {} | News {} => {:.2}",
        recommendation.technical_score,
        recommendation.fundamental_score,
        recommendation.stability_score,
        recommendation.news_score,
        recommendation.overall_score
    );

    out
}

fn write_profile(out: &mut String, name: &str, advice: &ProfileAdvice) {
    let _ = writeln!(
        out,
        "{}: {} ({} confidence) - {}",
        name,
        advice.action.label(),
        advice.confidence.label(),
        advice.rationale
    );
}

/// Full report: one section per analyzed symbol, error notes for failed
/// symbols, and an aggregate summary when more than one symbol was analyzed.
pub fn render_report(
    insights: &HashMap<String, SymbolReport>,
    failures: &HashMap<String, String>,
    market: &HashMap<String, MarketFetchOutcome>,
) -> String {
    let mut out = String::new();

    let mut symbols: Vec<&String> = insights.keys().collect();
    symbols.sort();

    for symbol in &symbols {
        out.push_str(&insights[*symbol].narrative);
        out.push('\n');
    }

    if !failures.is_empty() {
        let mut failed: Vec<&String> = failures.keys().collect();
        failed.sort();
        let _ = writeln!(out, "=== Data Issues ===");
        for symbol in failed {
            let _ = writeln!(out, "{}: {}", symbol, failures[symbol]);
        }
        let _ = writeln!(out);
    }

    if symbols.len() > 1 {
        out.push_str(&aggregate_section(insights, market));
    }

    out
}

fn aggregate_section(
    insights: &HashMap<String, SymbolReport>,
    market: &HashMap<String, MarketFetchOutcome>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Portfolio Summary ===");
    let _ = writeln!(out);

    // Ranked by composite score, best first; ties broken by symbol.
    let mut ranked: Vec<&SymbolReport> = insights.values().collect();
    ranked.sort_by(|a, b| {
        b.recommendation
            .overall_score
            .partial_cmp(&a.recommendation.overall_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });

    let _ = writeln!(out, "Ranked Scores");
    for report in &ranked {
        let _ = writeln!(
            out,
            "{:<6} {:.2}  {}",
            report.symbol,
            report.recommendation.overall_score,
            report.recommendation.overall_action.label()
        );
    }
    let _ = writeln!(out);

    if let Some(top) = ranked.first() {
        let _ = writeln!(
            out,
            "Top performer: {} ({:.2}).",
            top.symbol, top.recommendation.overall_score
        );
    }
    let _ = writeln!(out);

    let mut risk_counts: Vec<(String, usize)> = Vec::new();
    for report in &ranked {
        let label = report.fundamental.risk.label().to_string();
        match risk_counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => risk_counts.push((label, 1)),
        }
    }
    let _ = writeln!(out, "Risk Buckets");
    for (label, count) in &risk_counts {
        let _ = writeln!(out, "{}: {}", label, count);
    }
    let _ = writeln!(out);

    let mut sector_counts: Vec<(String, usize)> = Vec::new();
    for report in &ranked {
        let sector = market
            .get(&report.symbol)
            .and_then(|outcome| outcome.record())
            .and_then(|record| record.summary.sector.clone())
            .unwrap_or_else(|| "Unclassified".to_string());
        match sector_counts.iter_mut().find(|(s, _)| *s == sector) {
            Some((_, count)) => *count += 1,
            None => sector_counts.push((sector, 1)),
        }
    }
    let _ = writeln!(out, "Sector Mix");
    for (sector, count) in &sector_counts {
        let _ = writeln!(out, "{}: {}", sector, count);
    }

    out
}
