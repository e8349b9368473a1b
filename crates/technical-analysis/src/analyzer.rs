use research_core::{
    MarketRecord, Momentum, PositionStrength, TechnicalAnalysis, Trend, VolumeSignal,
};

/// Price-history records considered for volume and support/resistance.
const TRAILING_WINDOW: usize = 5;
/// Closes considered for the short-term trend.
const TREND_WINDOW: usize = 3;

pub struct TechnicalAnalysisEngine;

impl TechnicalAnalysisEngine {
    pub fn new() -> Self {
        Self
    }

    /// Derive the technical view for one symbol. Pure function of the
    /// market record, so re-running on the same input gives the same output.
    pub fn analyze(&self, symbol: &str, record: &MarketRecord) -> TechnicalAnalysis {
        let summary = &record.summary;

        // An absent open or previous close is unknown, not a price of zero.
        let change_percent = match (summary.open, summary.previous_close) {
            (Some(open), Some(previous_close)) if previous_close > 0.0 => {
                (open - previous_close) / previous_close * 100.0
            }
            _ => 0.0,
        };

        let momentum = if change_percent > 1.0 {
            Momentum::Bullish
        } else if change_percent < -1.0 {
            Momentum::Bearish
        } else {
            Momentum::Neutral
        };

        let year_high_distance = match (summary.open, summary.fifty_two_week_high) {
            (Some(open), Some(year_high)) if year_high > 0.0 => {
                (year_high - open) / year_high * 100.0
            }
            _ => 0.0,
        };

        let year_low_distance = match (summary.open, summary.fifty_two_week_low) {
            (Some(open), Some(year_low)) if year_low > 0.0 => {
                (open - year_low) / year_low * 100.0
            }
            _ => 0.0,
        };

        let tail = trailing(&record.price_history, TRAILING_WINDOW);
        let average_volume = if tail.is_empty() {
            0.0
        } else {
            tail.iter().map(|b| b.volume).sum::<f64>() / tail.len() as f64
        };
        let current_volume = summary.volume.unwrap_or(0.0);
        let volume_ratio = if average_volume > 0.0 {
            current_volume / average_volume
        } else {
            1.0
        };
        let volume_signal = if volume_ratio > 1.5 {
            VolumeSignal::High
        } else if volume_ratio > 1.2 {
            VolumeSignal::AboveAverage
        } else {
            VolumeSignal::Normal
        };

        let trend = {
            let closes = trailing(&record.price_history, TREND_WINDOW);
            if closes.len() < TREND_WINDOW {
                Trend::InsufficientData
            } else {
                let first = closes.first().map(|b| b.close).unwrap_or(0.0);
                let last = closes.last().map(|b| b.close).unwrap_or(0.0);
                if last > first {
                    Trend::Uptrend
                } else if last < first {
                    Trend::Downtrend
                } else {
                    Trend::Sideways
                }
            }
        };

        // Trailing lows/highs when history exists, otherwise the day range.
        let support_level = tail
            .iter()
            .map(|b| b.low)
            .fold(None, |acc: Option<f64>, low| {
                Some(acc.map_or(low, |a| a.min(low)))
            })
            .or(summary.day_low);
        let resistance_level = tail
            .iter()
            .map(|b| b.high)
            .fold(None, |acc: Option<f64>, high| {
                Some(acc.map_or(high, |a| a.max(high)))
            })
            .or(summary.day_high);

        let position_strength = if year_low_distance > 50.0 {
            PositionStrength::Strong
        } else if year_low_distance > 20.0 {
            PositionStrength::Moderate
        } else {
            PositionStrength::Weak
        };

        TechnicalAnalysis {
            symbol: symbol.to_string(),
            change_percent,
            momentum,
            year_high_distance,
            year_low_distance,
            average_volume,
            volume_ratio,
            volume_signal,
            trend,
            support_level,
            resistance_level,
            position_strength,
        }
    }
}

impl Default for TechnicalAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn trailing(bars: &[research_core::OhlcvBar], window: usize) -> &[research_core::OhlcvBar] {
    &bars[bars.len().saturating_sub(window)..]
}
