pub mod engine;
pub mod recommend;
pub mod report;

#[cfg(test)]
mod engine_tests;

pub use engine::{AnalysisOutcome, AnalyticsEngine};
pub use recommend::recommend;
