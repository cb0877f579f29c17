pub mod market_parser;

pub use market_parser::{MarketParser, Parser, RawMarket};
