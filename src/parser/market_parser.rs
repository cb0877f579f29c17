// CoinGecko `/coins/markets` response parsing
use crate::model::ParserError;
use serde::Deserialize;

/// One element of the markets array, as delivered by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMarket {
    pub name: String,
    pub symbol: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub last_updated: String,
}

pub trait Parser {
    fn parse(&self, body: &str) -> Result<Vec<RawMarket>, ParserError>;
}

pub struct MarketParser;

impl MarketParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for MarketParser {
    fn parse(&self, body: &str) -> Result<Vec<RawMarket>, ParserError> {
        let markets: Vec<RawMarket> = serde_json::from_str(body)?;
        Ok(markets)
    }
}
