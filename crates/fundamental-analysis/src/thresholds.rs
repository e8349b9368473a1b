//! Classification cutoffs for the fundamental engine. Kept in one place so
//! the policy reads as a table rather than magic numbers in branch arms.

/// Trailing P/E above this is Expensive.
pub const EXPENSIVE_PE: f64 = 35.0;
/// Trailing P/E above this (up to EXPENSIVE_PE) is Fair Value.
pub const FAIR_VALUE_PE: f64 = 20.0;
/// Trailing P/E above this (up to FAIR_VALUE_PE) is Attractive.
pub const ATTRACTIVE_PE: f64 = 15.0;

/// EPS above this, with a forward P/E below trailing, reads as strong growth.
pub const STRONG_EPS: f64 = 10.0;
/// EPS above this reads as moderate growth.
pub const MODERATE_EPS: f64 = 5.0;

/// Beta above this is high volatility.
pub const HIGH_BETA: f64 = 1.3;
/// Beta above this (up to HIGH_BETA) is above-market risk.
pub const ABOVE_MARKET_BETA: f64 = 1.1;
/// Beta above this (up to ABOVE_MARKET_BETA) tracks the market.
pub const MARKET_BETA: f64 = 0.9;

/// Dividend yield (percent) above this is high yield.
pub const HIGH_YIELD: f64 = 3.0;
/// Dividend yield (percent) above this is moderate yield.
pub const MODERATE_YIELD: f64 = 1.0;

/// Market cap at or above this is mega cap.
pub const MEGA_CAP: f64 = 1_000_000_000_000.0;
/// Market cap at or above this is large cap.
pub const LARGE_CAP: f64 = 200_000_000_000.0;
