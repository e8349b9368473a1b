use research_core::{NewsRecord, NewsSentiment, SentimentLabel};


const POSITIVE_WORDS: &[&str] = &[
    "beat", "growth", "surge", "rally", "gain", "profit", "upgrade", "strong",
    "record", "outperform", "rise", "breakthrough", "exceed", "buy",
    "optimistic", "expansion",
];

const NEGATIVE_WORDS: &[&str] = &[
    "decline", "loss", "fall", "plunge", "miss", "downgrade", "weak", "drop",
    "concern", "risk", "lawsuit", "warning", "slump", "sell", "fear",
    "recall",
];

/// Theme tags triggered by title keywords. First hit per theme wins;
/// output order follows this table.
const THEME_TRIGGERS: &[(&str, &[&str])] = &[
    ("Dividend Focus", &["dividend", "yield", "payout"]),
    ("Institutional Interest", &["institutional", "hedge fund", "stake", "analyst"]),
    ("Competitive Analysis", &["competitor", "competition", "rival", "market share"]),
    ("Financial Performance", &["earnings", "revenue", "profit", "quarterly"]),
];

pub struct SentimentAnalysisEngine;

impl SentimentAnalysisEngine {
    pub fn new() -> Self {
        Self
    }

    /// Score a symbol's news batch. Each headline contributes at most one
    /// vote: +1 when positive keyword hits outnumber negative ones, -1 when
    /// outnumbered, 0 on a tie.
    pub fn analyze(&self, news: &NewsRecord) -> NewsSentiment {
        if news.articles.is_empty() {
            return NewsSentiment {
                symbol: news.symbol.clone(),
                sentiment: SentimentLabel::Neutral,
                score: 0,
                article_count: 0,
                themes: Vec::new(),
                impact: "No recent news".to_string(),
            };
        }

        let mut score = 0i32;
        let mut themes: Vec<String> = Vec::new();
        for article in &news.articles {
            let title = article.title.to_lowercase();
            let positives = POSITIVE_WORDS.iter().filter(|w| title.contains(*w)).count();
            let negatives = NEGATIVE_WORDS.iter().filter(|w| title.contains(*w)).count();
            if positives > negatives {
                score += 1;
            } else if negatives > positives {
                score -= 1;
            }
            for (theme, triggers) in THEME_TRIGGERS {
                if triggers.iter().any(|t| title.contains(t))
                    && !themes.iter().any(|existing| existing == theme)
                {
                    themes.push((*theme).to_string());
                }
            }
        }

        let sentiment = if score > 1 {
            SentimentLabel::Positive
        } else if score < -1 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };

        let impact = match sentiment {
            SentimentLabel::Positive => "Recent coverage leans supportive".to_string(),
            SentimentLabel::Negative => "Recent coverage flags pressure".to_string(),
            SentimentLabel::Neutral => "Mixed or limited coverage".to_string(),
        };

        NewsSentiment {
            symbol: news.symbol.clone(),
            sentiment,
            score,
            article_count: news.articles.len(),
            themes,
            impact,
        }
    }
}

impl Default for SentimentAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}
