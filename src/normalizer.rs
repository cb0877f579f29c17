use crate::model::{CurrencyRecord, ParserError};
use crate::parser::RawMarket;
use crate::utils::{format_timestamp, parse_datetime};
use chrono::{DateTime, Local};

/// Turns raw API rows into records, keeping source order.
/// `refreshed_at` is stamped on every record of the batch.
pub fn normalize_all(
    markets: Vec<RawMarket>,
    refreshed_at: DateTime<Local>,
) -> Result<Vec<CurrencyRecord>, ParserError> {
    let refresh_time = format_timestamp(&refreshed_at);
    markets
        .into_iter()
        .map(|market| normalize_market(market, &refresh_time))
        .collect()
}

fn normalize_market(market: RawMarket, refresh_time: &str) -> Result<CurrencyRecord, ParserError> {
    let symbol = market.symbol.to_uppercase();

    let last_updated = match parse_datetime(&market.last_updated) {
        Some(dt) => format_timestamp(&dt),
        None => {
            return Err(ParserError::InvalidTimestamp {
                symbol,
                value: market.last_updated,
            });
        }
    };

    Ok(CurrencyRecord {
        name: market.name,
        symbol,
        current_price: market.current_price.unwrap_or(f64::NAN),
        market_cap: market.market_cap.unwrap_or(f64::NAN),
        trading_volume_24h: market.total_volume.unwrap_or(f64::NAN),
        price_change_24h: market.price_change_percentage_24h,
        last_updated,
        data_refresh_time: refresh_time.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw(name: &str, symbol: &str, change: Option<f64>) -> RawMarket {
        RawMarket {
            name: name.to_string(),
            symbol: symbol.to_string(),
            current_price: Some(10.0),
            market_cap: Some(1_000.0),
            total_volume: Some(50.0),
            price_change_percentage_24h: change,
            last_updated: "2024-05-01T10:15:30.482Z".to_string(),
        }
    }

    fn refresh() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn symbols_are_uppercased() {
        let records = normalize_all(
            vec![raw("Bitcoin", "btc", None), raw("Shiba Inu", "Shib", None)],
            refresh(),
        )
        .unwrap();

        assert_eq!(records[0].symbol, "BTC");
        assert_eq!(records[1].symbol, "SHIB");
    }

    #[test]
    fn order_and_fields_are_preserved() {
        let records = normalize_all(
            vec![
                raw("Bitcoin", "btc", Some(1.5)),
                raw("Ethereum", "eth", None),
                raw("Solana", "sol", Some(-2.0)),
            ],
            refresh(),
        )
        .unwrap();

        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bitcoin", "Ethereum", "Solana"]);
        assert_eq!(records[0].price_change_24h, Some(1.5));
        assert_eq!(records[1].price_change_24h, None);
        assert_eq!(records[0].trading_volume_24h, 50.0);
    }

    #[test]
    fn timestamps_are_reformatted() {
        let records = normalize_all(vec![raw("Bitcoin", "btc", None)], refresh()).unwrap();

        assert_eq!(records[0].last_updated, "2024-05-01 10:15:30");
        assert_eq!(records[0].data_refresh_time, "2024-05-01 12:00:00");
    }

    #[test]
    fn missing_price_becomes_nan() {
        let mut market = raw("Ghost", "gst", None);
        market.current_price = None;
        let records = normalize_all(vec![market], refresh()).unwrap();

        assert!(records[0].current_price.is_nan());
    }

    #[test]
    fn bad_timestamp_fails_the_batch() {
        let mut market = raw("Bitcoin", "btc", None);
        market.last_updated = "not a date".to_string();
        let err = normalize_all(vec![market], refresh()).unwrap_err();

        assert!(matches!(err, ParserError::InvalidTimestamp { ref symbol, .. } if symbol == "BTC"));
    }
}
