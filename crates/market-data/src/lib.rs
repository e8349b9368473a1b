pub mod fetcher;
pub mod yahoo;

pub use fetcher::MarketDataFetcher;
pub use yahoo::YahooMarketData;
