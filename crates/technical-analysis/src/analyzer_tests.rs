use crate::TechnicalAnalysisEngine;
use chrono::NaiveDate;
use research_core::{
    MarketRecord, MarketSummary, Momentum, OhlcvBar, PositionStrength, Trend, VolumeSignal,
};

fn bar(day: u32, close: f64, volume: f64) -> OhlcvBar {
    OhlcvBar {
        date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
        open: close - 1.0,
        high: close + 2.0,
        low: close - 2.0,
        close,
        volume,
    }
}

fn summary() -> MarketSummary {
    MarketSummary {
        open: Some(110.0),
        previous_close: Some(100.0),
        day_high: Some(112.0),
        day_low: Some(108.0),
        fifty_two_week_high: Some(120.0),
        fifty_two_week_low: Some(80.0),
        volume: Some(2_000_000.0),
        ..MarketSummary::default()
    }
}

fn record(bars: Vec<OhlcvBar>) -> MarketRecord {
    MarketRecord {
        summary: summary(),
        price_history: bars,
    }
}

#[test]
fn bullish_day_with_elevated_volume() {
    let engine = TechnicalAnalysisEngine::new();
    let bars = vec![
        bar(2, 100.0, 1_000_000.0),
        bar(3, 101.0, 1_000_000.0),
        bar(4, 102.0, 1_000_000.0),
        bar(5, 103.0, 1_000_000.0),
        bar(6, 104.0, 1_000_000.0),
    ];
    let analysis = engine.analyze("MSFT", &record(bars));

    assert!((analysis.change_percent - 10.0).abs() < 1e-9);
    assert!(matches!(analysis.momentum, Momentum::Bullish));
    assert!((analysis.volume_ratio - 2.0).abs() < 1e-9);
    assert!(matches!(analysis.volume_signal, VolumeSignal::High));
    assert!(matches!(analysis.trend, Trend::Uptrend));
    // 110 vs 52w low of 80 puts the open 37.5% above the low.
    assert!(matches!(
        analysis.position_strength,
        PositionStrength::Moderate
    ));
}

#[test]
fn missing_previous_close_yields_no_change() {
    let engine = TechnicalAnalysisEngine::new();
    let mut rec = record(vec![]);
    rec.summary.previous_close = None;
    let analysis = engine.analyze("AAPL", &rec);
    assert_eq!(analysis.change_percent, 0.0);
    assert!(matches!(analysis.momentum, Momentum::Neutral));

    rec.summary.previous_close = Some(0.0);
    let analysis = engine.analyze("AAPL", &rec);
    assert_eq!(analysis.change_percent, 0.0);
}

#[test]
fn missing_open_classifies_as_unknown_not_a_crash() {
    let engine = TechnicalAnalysisEngine::new();
    let mut rec = record(vec![]);
    rec.summary.open = None;
    let analysis = engine.analyze("AAPL", &rec);
    assert_eq!(analysis.change_percent, 0.0);
    assert!(matches!(analysis.momentum, Momentum::Neutral));
    // 52-week distances need a real open; absent means no distance.
    assert_eq!(analysis.year_high_distance, 0.0);
    assert_eq!(analysis.year_low_distance, 0.0);
}

#[test]
fn short_history_is_insufficient_for_trend() {
    let engine = TechnicalAnalysisEngine::new();
    let bars = vec![bar(5, 100.0, 1_000_000.0), bar(6, 101.0, 1_000_000.0)];
    let analysis = engine.analyze("NVDA", &record(bars));
    assert!(matches!(analysis.trend, Trend::InsufficientData));
}

#[test]
fn flat_closes_are_sideways() {
    let engine = TechnicalAnalysisEngine::new();
    let bars = vec![
        bar(4, 100.0, 1_000_000.0),
        bar(5, 99.0, 1_000_000.0),
        bar(6, 100.0, 1_000_000.0),
    ];
    let analysis = engine.analyze("KO", &record(bars));
    assert!(matches!(analysis.trend, Trend::Sideways));
}

#[test]
fn support_and_resistance_track_trailing_range() {
    let engine = TechnicalAnalysisEngine::new();
    let bars = vec![
        bar(2, 100.0, 1_000_000.0),
        bar(3, 95.0, 1_000_000.0),
        bar(4, 105.0, 1_000_000.0),
    ];
    let analysis = engine.analyze("TSLA", &record(bars));
    assert_eq!(analysis.support_level, Some(93.0));
    assert_eq!(analysis.resistance_level, Some(107.0));
}

#[test]
fn empty_history_falls_back_to_day_range() {
    let engine = TechnicalAnalysisEngine::new();
    let analysis = engine.analyze("IBM", &record(vec![]));
    assert_eq!(analysis.support_level, Some(108.0));
    assert_eq!(analysis.resistance_level, Some(112.0));
    assert_eq!(analysis.average_volume, 0.0);
    assert_eq!(analysis.volume_ratio, 1.0);
    assert!(matches!(analysis.volume_signal, VolumeSignal::Normal));
}

#[test]
fn analysis_is_deterministic() {
    let engine = TechnicalAnalysisEngine::new();
    let bars = vec![
        bar(2, 100.0, 900_000.0),
        bar(3, 101.0, 1_100_000.0),
        bar(4, 99.0, 1_000_000.0),
        bar(5, 102.0, 1_200_000.0),
        bar(6, 103.0, 800_000.0),
    ];
    let rec = record(bars);
    let first = engine.analyze("AMZN", &rec);
    let second = engine.analyze("AMZN", &rec);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
