pub mod client;
pub mod fetcher;

pub use client::NewsApiClient;
pub use fetcher::NewsFetcher;
