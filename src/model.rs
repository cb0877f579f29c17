// Core structs: CurrencyRecord, RecordSet, MarketRequest
use thiserror::Error;

/// One row of the market snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyRecord {
    pub name: String,
    pub symbol: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub trading_volume_24h: f64,
    pub price_change_24h: Option<f64>,
    pub last_updated: String,
    pub data_refresh_time: String,
}

/// Ordered, read-only snapshot produced by a single fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<CurrencyRecord>,
}

impl RecordSet {
    pub fn new(records: Vec<CurrencyRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CurrencyRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CurrencyRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a CurrencyRecord;
    type IntoIter = std::slice::Iter<'a, CurrencyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Debug, Clone)]
pub struct MarketRequest {
    pub api_key: String,
    pub limit: u32,
}

impl MarketRequest {
    /// Query string for `/coins/markets`.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("vs_currency", "usd".to_string()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", self.limit.to_string()),
            ("page", "1".to_string()),
            ("sparkline", "false".to_string()),
            ("price_change_percentage", "24h".to_string()),
            ("x_cg_demo_api_key", self.api_key.clone()),
        ]
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Status(u16),
    #[error("rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },
    #[error(transparent)]
    Parse(#[from] ParserError),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid timestamp for {symbol}: {value}")]
    InvalidTimestamp { symbol: String, value: String },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_carry_limit_and_key() {
        let request = MarketRequest {
            api_key: "demo-key".into(),
            limit: 50,
        };
        let params = request.query_params();

        assert!(params.contains(&("per_page", "50".to_string())));
        assert!(params.contains(&("x_cg_demo_api_key", "demo-key".to_string())));
        assert!(params.contains(&("order", "market_cap_desc".to_string())));
        assert!(params.contains(&("sparkline", "false".to_string())));
        assert_eq!(params.len(), 7);
    }

    #[test]
    fn record_set_preserves_order() {
        let make = |name: &str| CurrencyRecord {
            name: name.to_string(),
            symbol: name.to_uppercase(),
            current_price: 1.0,
            market_cap: 1.0,
            trading_volume_24h: 1.0,
            price_change_24h: None,
            last_updated: String::new(),
            data_refresh_time: String::new(),
        };
        let set = RecordSet::new(vec![make("b"), make("a"), make("c")]);
        let names: Vec<&str> = set.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
    }
}
