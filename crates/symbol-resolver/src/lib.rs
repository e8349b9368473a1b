pub mod csv_import;
pub mod resolver;
pub mod yahoo;

pub use csv_import::symbols_from_csv;
pub use resolver::SymbolResolver;
pub use yahoo::YahooSymbolSearch;
