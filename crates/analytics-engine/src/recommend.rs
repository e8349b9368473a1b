use research_core::{
    Confidence, FundamentalAnalysis, GrowthOutlook, MarketSummary, Momentum, NewsSentiment,
    OverallAction, ProfileAction, ProfileAdvice, Recommendation, SentimentLabel,
    TechnicalAnalysis,
};

/// Blend the three per-symbol views into a composite recommendation.
///
/// Pure function: the same inputs always produce the same output. The
/// summary is consulted for beta and dividend yield, which the categorical
/// fundamental view does not carry.
pub fn recommend(
    symbol: &str,
    technical: &TechnicalAnalysis,
    fundamental: &FundamentalAnalysis,
    sentiment: &NewsSentiment,
    summary: &MarketSummary,
) -> Recommendation {
    let technical_score = match technical.momentum {
        Momentum::Bullish if technical.volume_signal.is_elevated() => 4,
        Momentum::Bearish => 2,
        _ => 3,
    };
    let fundamental_score = fundamental.valuation_score;
    let stability_score = fundamental.stability_score;
    let news_score = match sentiment.sentiment {
        SentimentLabel::Positive => 4,
        SentimentLabel::Negative => 2,
        SentimentLabel::Neutral => 3,
    };

    let total = technical_score as f64
        + fundamental_score as f64
        + stability_score as f64
        + news_score as f64;
    let overall_score = (total / 4.0 * 100.0).round() / 100.0;

    let overall_action = if overall_score >= 4.0 {
        OverallAction::StrongBuy
    } else if overall_score >= 3.5 {
        OverallAction::Buy
    } else if overall_score >= 2.5 {
        OverallAction::Hold
    } else {
        OverallAction::ConsiderSelling
    };

    Recommendation {
        symbol: symbol.to_string(),
        technical_score,
        fundamental_score,
        stability_score,
        news_score,
        overall_score,
        overall_action,
        conservative: conservative_advice(stability_score, summary.beta),
        growth: growth_advice(fundamental, technical, overall_score),
        income: income_advice(summary.dividend_yield),
    }
}

fn conservative_advice(stability_score: u8, beta: Option<f64>) -> ProfileAdvice {
    if stability_score >= 4 && beta.is_some_and(|b| b <= 1.1) {
        ProfileAdvice {
            action: ProfileAction::Buy,
            confidence: Confidence::High,
            rationale: "Large, stable company with market-level volatility".to_string(),
        }
    } else if stability_score >= 4 {
        ProfileAdvice {
            action: ProfileAction::Hold,
            confidence: Confidence::Medium,
            rationale: "Stable company, but watch the volatility".to_string(),
        }
    } else {
        ProfileAdvice {
            action: ProfileAction::Avoid,
            confidence: Confidence::Medium,
            rationale: "Risk profile exceeds a conservative mandate".to_string(),
        }
    }
}

fn growth_advice(
    fundamental: &FundamentalAnalysis,
    technical: &TechnicalAnalysis,
    overall_score: f64,
) -> ProfileAdvice {
    if matches!(fundamental.growth_outlook, GrowthOutlook::Strong)
        && matches!(technical.momentum, Momentum::Bullish)
    {
        ProfileAdvice {
            action: ProfileAction::StrongBuy,
            confidence: Confidence::High,
            rationale: "Strong earnings growth confirmed by price momentum".to_string(),
        }
    } else if matches!(fundamental.growth_outlook, GrowthOutlook::Moderate) && overall_score >= 3.0
    {
        ProfileAdvice {
            action: ProfileAction::Buy,
            confidence: Confidence::Medium,
            rationale: "Moderate growth with a supportive composite score".to_string(),
        }
    } else {
        ProfileAdvice {
            action: ProfileAction::Hold,
            confidence: Confidence::Low,
            rationale: "Growth case not yet established".to_string(),
        }
    }
}

fn income_advice(dividend_yield: Option<f64>) -> ProfileAdvice {
    match dividend_yield {
        Some(y) if y > 3.0 => ProfileAdvice {
            action: ProfileAction::Buy,
            confidence: Confidence::High,
            rationale: format!("Dividend yield of {:.2}% supports an income mandate", y),
        },
        Some(y) if y > 1.0 => ProfileAdvice {
            action: ProfileAction::Hold,
            confidence: Confidence::Medium,
            rationale: format!("Modest {:.2}% yield, hold for income only", y),
        },
        _ => ProfileAdvice {
            action: ProfileAction::Avoid,
            confidence: Confidence::High,
            rationale: "No meaningful income stream".to_string(),
        },
    }
}
