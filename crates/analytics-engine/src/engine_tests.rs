use std::collections::HashMap;

use chrono::NaiveDate;
use research_core::{
    Article, Confidence, MarketFetchOutcome, MarketRecord, MarketSummary, NewsRecord, OhlcvBar,
    OverallAction, ProfileAction,
};

use crate::AnalyticsEngine;

fn bar(day: u32, close: f64, volume: f64) -> OhlcvBar {
    OhlcvBar {
        date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume,
    }
}

fn strong_record() -> MarketRecord {
    MarketRecord {
        summary: MarketSummary {
            open: Some(110.0),
            previous_close: Some(100.0),
            day_high: Some(112.0),
            day_low: Some(108.0),
            fifty_two_week_high: Some(120.0),
            fifty_two_week_low: Some(80.0),
            volume: Some(2_000_000.0),
            pe_ratio: Some(10.0),
            forward_pe: Some(8.0),
            eps: Some(12.0),
            beta: Some(1.0),
            dividend_yield: Some(3.5),
            market_cap: Some(1_500_000_000_000.0),
            sector: Some("Technology".to_string()),
            ..MarketSummary::default()
        },
        price_history: (2..7).map(|d| bar(d, 100.0 + d as f64, 1_000_000.0)).collect(),
    }
}

fn positive_news(symbol: &str) -> NewsRecord {
    NewsRecord {
        symbol: symbol.to_string(),
        articles: vec![
            Article {
                title: "Earnings beat sends shares higher".to_string(),
                url: "https://example.com/1".to_string(),
                source: "Wire".to_string(),
                published_at: None,
            },
            Article {
                title: "Strong growth outlook raised".to_string(),
                url: "https://example.com/2".to_string(),
                source: "Wire".to_string(),
                published_at: None,
            },
            Article {
                title: "Analysts upgrade after record rally".to_string(),
                url: "https://example.com/3".to_string(),
                source: "Wire".to_string(),
                published_at: None,
            },
        ],
        sentiment_hint: "neutral".to_string(),
    }
}

#[test]
fn strong_symbol_scores_strong_buy() {
    let engine = AnalyticsEngine::new();
    let report = engine.analyze("MSFT", &strong_record(), &positive_news("MSFT"));
    let rec = &report.recommendation;

    // Bullish momentum with High volume, undervalued P/E, mega cap, positive news.
    assert_eq!(rec.technical_score, 4);
    assert_eq!(rec.fundamental_score, 5);
    assert_eq!(rec.stability_score, 5);
    assert_eq!(rec.news_score, 4);
    assert_eq!(rec.overall_score, 4.5);
    assert!(matches!(rec.overall_action, OverallAction::StrongBuy));

    assert!(matches!(rec.conservative.action, ProfileAction::Buy));
    assert!(matches!(rec.conservative.confidence, Confidence::High));
    assert!(matches!(rec.growth.action, ProfileAction::StrongBuy));
    assert!(matches!(rec.income.action, ProfileAction::Buy));
}

#[test]
fn analyze_is_idempotent() {
    let engine = AnalyticsEngine::new();
    let record = strong_record();
    let news = positive_news("MSFT");
    let first = engine.analyze("MSFT", &record, &news);
    let second = engine.analyze("MSFT", &record, &news);
    assert_eq!(
        first.recommendation.overall_score,
        second.recommendation.overall_score
    );
    assert_eq!(first.narrative, second.narrative);
}

#[test]
fn no_income_without_yield() {
    let engine = AnalyticsEngine::new();
    let mut record = strong_record();
    record.summary.dividend_yield = None;
    let report = engine.analyze("NVDA", &record, &NewsRecord::empty("NVDA"));
    assert!(matches!(
        report.recommendation.income.action,
        ProfileAction::Avoid
    ));
}

#[test]
fn batch_isolates_failed_symbols() {
    let engine = AnalyticsEngine::new();
    let mut market = HashMap::new();
    market.insert("AAPL".to_string(), MarketFetchOutcome::Data(strong_record()));
    market.insert("MSFT".to_string(), MarketFetchOutcome::Data(strong_record()));
    market.insert(
        "BAD".to_string(),
        MarketFetchOutcome::Error {
            message: "ticker not found".to_string(),
        },
    );
    let mut news = HashMap::new();
    news.insert("AAPL".to_string(), positive_news("AAPL"));
    news.insert("MSFT".to_string(), positive_news("MSFT"));
    news.insert("BAD".to_string(), NewsRecord::empty("BAD"));

    let outcome = engine.analyze_all(&market, &news);
    assert_eq!(outcome.insights.len(), 2);
    assert!(outcome.insights.contains_key("AAPL"));
    assert!(outcome.insights.contains_key("MSFT"));
    assert_eq!(
        outcome.failures.get("BAD").map(String::as_str),
        Some("ticker not found")
    );

    let rendered = crate::report::render_report(&outcome.insights, &outcome.failures, &market);
    assert!(rendered.contains("=== Data Issues ==="));
    assert!(rendered.contains("BAD: ticker not found"));
    assert!(rendered.contains("=== Portfolio Summary ==="));
    assert!(rendered.contains("Top performer:"));
}

#[test]
fn single_symbol_report_has_no_aggregate() {
    let engine = AnalyticsEngine::new();
    let mut market = HashMap::new();
    market.insert("AAPL".to_string(), MarketFetchOutcome::Data(strong_record()));
    let mut news = HashMap::new();
    news.insert("AAPL".to_string(), NewsRecord::empty("AAPL"));

    let outcome = engine.analyze_all(&market, &news);
    let rendered = crate::report::render_report(&outcome.insights, &outcome.failures, &market);
    assert!(rendered.contains("=== AAPL Investment Analysis ==="));
    assert!(!rendered.contains("=== Portfolio Summary ==="));
}

#[test]
fn missing_news_entry_falls_back_to_empty_record() {
    let engine = AnalyticsEngine::new();
    let mut market = HashMap::new();
    market.insert("KO".to_string(), MarketFetchOutcome::Data(strong_record()));
    let outcome = engine.analyze_all(&market, &HashMap::new());
    let report = &outcome.insights["KO"];
    assert_eq!(report.sentiment.article_count, 0);
    assert_eq!(report.sentiment.impact, "No recent news");
}
