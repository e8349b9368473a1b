use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One day's OHLCV record, chronological within a price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Fixed set of per-symbol summary fields.
///
/// Numeric fields absent from the upstream source stay `None` — downstream
/// classification must treat missing and zero differently (a zero P/E is
/// "Undervalued"; a missing P/E classifies as Unknown).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub open: Option<f64>,
    pub previous_close: Option<f64>,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub volume: Option<f64>,
    pub book_value: Option<f64>,
    pub dividend_rate: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub beta: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub forward_pe: Option<f64>,
    pub eps: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub sector: Option<String>,
    pub market_cap: Option<f64>,
    pub enterprise_value: Option<f64>,
    pub fifty_day_average: Option<f64>,
}

/// Per-symbol market data: summary fields plus chronological price history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketRecord {
    pub summary: MarketSummary,
    pub price_history: Vec<OhlcvBar>,
}

/// Result of one symbol's market fetch: populated wholesale or replaced by
/// an error marker, never partially filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MarketFetchOutcome {
    Data(MarketRecord),
    Error { message: String },
}

impl MarketFetchOutcome {
    pub fn record(&self) -> Option<&MarketRecord> {
        match self {
            MarketFetchOutcome::Data(record) => Some(record),
            MarketFetchOutcome::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            MarketFetchOutcome::Data(_) => None,
            MarketFetchOutcome::Error { message } => Some(message),
        }
    }
}

/// News article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub source: String,
    pub published_at: Option<DateTime<Utc>>,
}

/// Per-symbol news: ordered most-recent-first. An empty article list is a
/// valid result, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsRecord {
    pub symbol: String,
    pub articles: Vec<Article>,
    pub sentiment_hint: String,
}

impl NewsRecord {
    pub fn empty(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            articles: Vec::new(),
            sentiment_hint: "neutral".to_string(),
        }
    }

    /// Placeholder used when no news credential is configured.
    pub fn placeholder(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            articles: Vec::new(),
            sentiment_hint: "Neutral/no recent news".to_string(),
        }
    }
}

/// History length requested from the market data source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FetchPeriod {
    FiveDays,
    OneMonth,
    ThreeMonths,
    OneYear,
}

impl FetchPeriod {
    pub fn days(&self) -> i64 {
        match self {
            FetchPeriod::FiveDays => 5,
            FetchPeriod::OneMonth => 30,
            FetchPeriod::ThreeMonths => 90,
            FetchPeriod::OneYear => 365,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FetchPeriod::FiveDays => "5d",
            FetchPeriod::OneMonth => "1mo",
            FetchPeriod::ThreeMonths => "3mo",
            FetchPeriod::OneYear => "1y",
        }
    }
}

impl Default for FetchPeriod {
    fn default() -> Self {
        FetchPeriod::FiveDays
    }
}

/// Bar granularity requested from the market data source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FetchInterval {
    Daily,
    Weekly,
}

impl FetchInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchInterval::Daily => "1d",
            FetchInterval::Weekly => "1wk",
        }
    }
}

impl Default for FetchInterval {
    fn default() -> Self {
        FetchInterval::Daily
    }
}

/// Short-term directional classification of price action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Momentum {
    Bullish,
    Bearish,
    Neutral,
}

impl Momentum {
    pub fn label(&self) -> &'static str {
        match self {
            Momentum::Bullish => "Bullish",
            Momentum::Bearish => "Bearish",
            Momentum::Neutral => "Neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VolumeSignal {
    High,
    AboveAverage,
    Normal,
}

impl VolumeSignal {
    pub fn label(&self) -> &'static str {
        match self {
            VolumeSignal::High => "High",
            VolumeSignal::AboveAverage => "Above Average",
            VolumeSignal::Normal => "Normal",
        }
    }

    pub fn is_elevated(&self) -> bool {
        matches!(self, VolumeSignal::High | VolumeSignal::AboveAverage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Trend {
    Uptrend,
    Downtrend,
    Sideways,
    InsufficientData,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Uptrend => "Uptrend",
            Trend::Downtrend => "Downtrend",
            Trend::Sideways => "Sideways",
            Trend::InsufficientData => "Insufficient data",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PositionStrength {
    Strong,
    Moderate,
    Weak,
}

impl PositionStrength {
    pub fn label(&self) -> &'static str {
        match self {
            PositionStrength::Strong => "Strong",
            PositionStrength::Moderate => "Moderate",
            PositionStrength::Weak => "Weak",
        }
    }
}

/// Derived per-symbol technical view. Pure function of a `MarketRecord`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalAnalysis {
    pub symbol: String,
    pub change_percent: f64,
    pub momentum: Momentum,
    pub year_high_distance: f64,
    pub year_low_distance: f64,
    pub average_volume: f64,
    pub volume_ratio: f64,
    pub volume_signal: VolumeSignal,
    pub trend: Trend,
    pub support_level: Option<f64>,
    pub resistance_level: Option<f64>,
    pub position_strength: PositionStrength,
}

/// Categorical bucket derived from the trailing P/E ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Valuation {
    Expensive,
    FairValue,
    Attractive,
    Undervalued,
    Unknown,
}

impl Valuation {
    pub fn score(&self) -> u8 {
        match self {
            Valuation::Expensive => 2,
            Valuation::FairValue => 3,
            Valuation::Attractive => 4,
            Valuation::Undervalued => 5,
            Valuation::Unknown => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Valuation::Expensive => "Expensive",
            Valuation::FairValue => "Fair Value",
            Valuation::Attractive => "Attractive",
            Valuation::Undervalued => "Undervalued",
            Valuation::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GrowthOutlook {
    Strong,
    Moderate,
    Weak,
}

impl GrowthOutlook {
    pub fn label(&self) -> &'static str {
        match self {
            GrowthOutlook::Strong => "Strong",
            GrowthOutlook::Moderate => "Moderate",
            GrowthOutlook::Weak => "Weak",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RiskTier {
    HighVolatility,
    AboveMarketRisk,
    MarketRisk,
    LowVolatility,
    Unknown,
}

impl RiskTier {
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::HighVolatility => "High Volatility",
            RiskTier::AboveMarketRisk => "Above Market Risk",
            RiskTier::MarketRisk => "Market Risk",
            RiskTier::LowVolatility => "Low Volatility",
            RiskTier::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DividendTier {
    HighYield,
    ModerateYield,
    GrowthFocus,
}

impl DividendTier {
    pub fn label(&self) -> &'static str {
        match self {
            DividendTier::HighYield => "High Yield",
            DividendTier::ModerateYield => "Moderate Yield",
            DividendTier::GrowthFocus => "Growth Focus",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SizeTier {
    MegaCap,
    LargeCap,
    MidCap,
    Unknown,
}

impl SizeTier {
    pub fn stability_score(&self) -> u8 {
        match self {
            SizeTier::MegaCap => 5,
            SizeTier::LargeCap => 4,
            SizeTier::MidCap => 3,
            SizeTier::Unknown => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SizeTier::MegaCap => "Mega Cap",
            SizeTier::LargeCap => "Large Cap",
            SizeTier::MidCap => "Mid Cap",
            SizeTier::Unknown => "Unknown",
        }
    }
}

/// Derived per-symbol fundamental view. Pure function of a `MarketSummary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundamentalAnalysis {
    pub symbol: String,
    pub valuation: Valuation,
    pub valuation_score: u8,
    pub growth_outlook: GrowthOutlook,
    pub risk: RiskTier,
    pub dividend: DividendTier,
    pub size: SizeTier,
    pub stability_score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn label(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

/// Derived per-symbol news view. Pure function of a `NewsRecord`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSentiment {
    pub symbol: String,
    pub sentiment: SentimentLabel,
    pub score: i32,
    pub article_count: usize,
    pub themes: Vec<String>,
    pub impact: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OverallAction {
    StrongBuy,
    Buy,
    Hold,
    ConsiderSelling,
}

impl OverallAction {
    pub fn label(&self) -> &'static str {
        match self {
            OverallAction::StrongBuy => "Strong Buy",
            OverallAction::Buy => "Buy",
            OverallAction::Hold => "Hold",
            OverallAction::ConsiderSelling => "Consider Selling",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProfileAction {
    StrongBuy,
    Buy,
    Hold,
    Avoid,
}

impl ProfileAction {
    pub fn label(&self) -> &'static str {
        match self {
            ProfileAction::StrongBuy => "Strong Buy",
            ProfileAction::Buy => "Buy",
            ProfileAction::Hold => "Hold",
            ProfileAction::Avoid => "Avoid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
        }
    }
}

/// One investor profile's lens on the same underlying scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileAdvice {
    pub action: ProfileAction,
    pub confidence: Confidence,
    pub rationale: String,
}

/// Composite per-symbol recommendation. Pure function of the three analyses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub symbol: String,
    pub technical_score: u8,
    pub fundamental_score: u8,
    pub stability_score: u8,
    pub news_score: u8,
    pub overall_score: f64,
    pub overall_action: OverallAction,
    pub conservative: ProfileAdvice,
    pub growth: ProfileAdvice,
    pub income: ProfileAdvice,
}

/// Full analytics bundle for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolReport {
    pub symbol: String,
    pub technical: TechnicalAnalysis,
    pub fundamental: FundamentalAnalysis,
    pub sentiment: NewsSentiment,
    pub recommendation: Recommendation,
    pub narrative: String,
}
