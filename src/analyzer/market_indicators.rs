use crate::model::CurrencyRecord;

pub struct MarketAnalyzer;

impl MarketAnalyzer {
    /// Arithmetic mean of `current_price`. NaN prices propagate.
    pub fn mean_price(records: &[CurrencyRecord]) -> Option<f64> {
        if records.is_empty() {
            return None;
        }
        let total: f64 = records.iter().map(|r| r.current_price).sum();
        Some(total / records.len() as f64)
    }

    /// Records with the largest and smallest 24h change, skipping records
    /// without one. Ties go to the earliest record.
    pub fn price_change_extremes(
        records: &[CurrencyRecord],
    ) -> Option<(&CurrencyRecord, &CurrencyRecord)> {
        let mut with_change = records
            .iter()
            .filter_map(|r| r.price_change_24h.map(|change| (r, change)));

        let (first, first_change) = with_change.next()?;
        let (mut highest, mut highest_change) = (first, first_change);
        let (mut lowest, mut lowest_change) = (first, first_change);

        for (record, change) in with_change {
            if change > highest_change {
                highest = record;
                highest_change = change;
            }
            if change < lowest_change {
                lowest = record;
                lowest_change = change;
            }
        }

        Some((highest, lowest))
    }
}
