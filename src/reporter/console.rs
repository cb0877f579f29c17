use crate::analyzer::AnalysisResult;
use crate::model::RecordSet;
use crate::reporter::format::{format_change, format_price, format_whole_dollars, group_thousands};
use crate::utils::format_timestamp;
use chrono::{DateTime, Local};
use std::io::{self, Stdout, Write};

const COLUMNS: [&str; 8] = [
    "name",
    "symbol",
    "current_price",
    "market_cap",
    "trading_volume_24h",
    "price_change_24h",
    "last_updated",
    "data_refresh_time",
];

/// Writes human-readable reports to a text stream.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn render_records(&mut self, records: &RecordSet) -> io::Result<()> {
        self.render_records_at(records, Local::now())
    }

    pub fn render_records_at(&mut self, records: &RecordSet, now: DateTime<Local>) -> io::Result<()> {
        if records.is_empty() {
            writeln!(self.out, "No data to display.")?;
            return Ok(());
        }

        let banner = "=".repeat(100);
        writeln!(self.out)?;
        writeln!(self.out, "{banner}")?;
        writeln!(self.out, "TOP {} CRYPTOCURRENCIES BY MARKET CAPITALIZATION", records.len())?;
        writeln!(self.out, "Data fetched at: {}", format_timestamp(&now))?;
        writeln!(self.out, "{banner}")?;
        write!(self.out, "{}", records_table(records))?;
        self.out.flush()
    }

    pub fn render_analysis(&mut self, analysis: &AnalysisResult) -> io::Result<()> {
        let banner = "=".repeat(80);
        writeln!(self.out)?;
        writeln!(self.out, "{banner}")?;
        writeln!(self.out, "CRYPTOCURRENCY MARKET ANALYSIS")?;
        writeln!(self.out, "{banner}")?;

        writeln!(self.out)?;
        writeln!(self.out, "TOP {} CRYPTOCURRENCIES BY MARKET CAP:", analysis.top_by_market_cap.len())?;
        for (rank, entry) in analysis.top_by_market_cap.iter().enumerate() {
            writeln!(
                self.out,
                "{}. {} ({}): {}",
                rank + 1,
                entry.name,
                entry.symbol,
                format_whole_dollars(entry.market_cap)
            )?;
        }

        writeln!(self.out)?;
        writeln!(
            self.out,
            "AVERAGE PRICE OF TOP {} CRYPTOCURRENCIES: ${}",
            analysis.record_count,
            group_thousands(analysis.average_price, 2)
        )?;

        if let Some(extremes) = &analysis.extremes {
            writeln!(self.out)?;
            writeln!(self.out, "PRICE CHANGE EXTREMES (24H):")?;
            writeln!(
                self.out,
                "Highest Increase: {} ({}): {:.2}%",
                extremes.highest.name, extremes.highest.symbol, extremes.highest.price_change_24h
            )?;
            writeln!(
                self.out,
                "Highest Decrease: {} ({}): {:.2}%",
                extremes.lowest.name, extremes.lowest.symbol, extremes.lowest.price_change_24h
            )?;
        }

        self.out.flush()
    }
}

/// Right-aligned table, one line per record plus the header.
fn records_table(records: &RecordSet) -> String {
    let rows: Vec<[String; 8]> = records
        .iter()
        .map(|r| {
            [
                r.name.clone(),
                r.symbol.clone(),
                format_price(r.current_price),
                format_whole_dollars(r.market_cap),
                format_whole_dollars(r.trading_volume_24h),
                format_change(r.price_change_24h),
                r.last_updated.clone(),
                r.data_refresh_time.clone(),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut table = String::new();
    let header: Vec<&str> = COLUMNS.to_vec();
    push_line(&mut table, &header, &widths);
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        push_line(&mut table, &cells, &widths);
    }
    table
}

fn push_line(table: &mut String, cells: &[&str], widths: &[usize; 8]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
        .collect();
    table.push_str(&line.join("  "));
    table.push('\n');
}
