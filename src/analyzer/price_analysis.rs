use crate::analyzer::market_indicators::MarketAnalyzer;
use crate::model::{CurrencyRecord, RecordSet};

/// How many leading records make up the market-cap leaderboard.
pub const TOP_N: usize = 5;

/// Trait defining the interface for a snapshot analyzer.
pub trait Analyzer {
    /// Returns `None` when there is nothing to analyze.
    fn analyze(&self, records: &RecordSet) -> Option<AnalysisResult>;
}

/// Leaderboard row.
#[derive(Debug, Clone, PartialEq)]
pub struct TopEntry {
    pub name: String,
    pub symbol: String,
    pub market_cap: f64,
    pub current_price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceChange {
    pub name: String,
    pub symbol: String,
    pub price_change_24h: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceChangeExtremes {
    pub highest: PriceChange,
    pub lowest: PriceChange,
}

/// Structure representing the overall analysis result.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// First `TOP_N` records in source (market-cap descending) order.
    pub top_by_market_cap: Vec<TopEntry>,
    /// Mean `current_price` over the whole set.
    pub average_price: f64,
    /// Size of the set the mean was taken over.
    pub record_count: usize,
    /// Absent when no record reports a 24h change.
    pub extremes: Option<PriceChangeExtremes>,
}

/// Implementation of the snapshot analyzer.
pub struct AnalyzerImpl;

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for AnalyzerImpl {
    fn analyze(&self, records: &RecordSet) -> Option<AnalysisResult> {
        let records = records.records();
        let average_price = MarketAnalyzer::mean_price(records)?;

        let top_by_market_cap = records
            .iter()
            .take(TOP_N)
            .map(|r| TopEntry {
                name: r.name.clone(),
                symbol: r.symbol.clone(),
                market_cap: r.market_cap,
                current_price: r.current_price,
            })
            .collect();

        let extremes = MarketAnalyzer::price_change_extremes(records).map(|(high, low)| {
            PriceChangeExtremes {
                highest: price_change_of(high),
                lowest: price_change_of(low),
            }
        });

        Some(AnalysisResult {
            top_by_market_cap,
            average_price,
            record_count: records.len(),
            extremes,
        })
    }
}

fn price_change_of(record: &CurrencyRecord) -> PriceChange {
    PriceChange {
        name: record.name.clone(),
        symbol: record.symbol.clone(),
        price_change_24h: record.price_change_24h.unwrap_or(f64::NAN),
    }
}
