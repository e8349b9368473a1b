pub mod analyzer;

#[cfg(test)]
mod analyzer_tests;

pub use analyzer::*;
