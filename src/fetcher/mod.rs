pub mod coingecko;
pub mod traits;

pub use coingecko::{CoinGeckoFetcher, RetryPolicy};
pub use traits::MarketFetcher;
