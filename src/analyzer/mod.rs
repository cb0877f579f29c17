// Analyzer module: snapshot statistics over a fetched record set.

pub mod market_indicators;
pub mod price_analysis;

// Re-export the main Analyzer implementation for ease of use.
pub use price_analysis::{AnalysisResult, Analyzer, AnalyzerImpl, PriceChangeExtremes};
