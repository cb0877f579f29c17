use crate::analyzer::{Analyzer, AnalyzerImpl};
use crate::config::AppConfig;
use crate::fetcher::MarketFetcher;
use crate::model::MarketRequest;
use crate::reporter::ConsoleReporter;
use crate::storage::XlsxExporter;
use std::future::Future;
use std::io::Write;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{info, warn};

/// Time left in the current interval; zero once the cycle overran it.
pub fn sleep_duration(interval: Duration, elapsed: Duration) -> Duration {
    interval.saturating_sub(elapsed)
}

/// Drives fetch, export, report and analysis once per interval.
pub struct Scheduler<F, W: Write> {
    fetcher: F,
    analyzer: AnalyzerImpl,
    reporter: ConsoleReporter<W>,
    exporter: XlsxExporter,
    request: MarketRequest,
    interval: Duration,
}

impl<F: MarketFetcher, W: Write> Scheduler<F, W> {
    pub fn new(
        fetcher: F,
        reporter: ConsoleReporter<W>,
        exporter: XlsxExporter,
        config: &AppConfig,
    ) -> Self {
        Self {
            fetcher,
            analyzer: AnalyzerImpl::new(),
            reporter,
            exporter,
            request: config.market_request(),
            interval: config.check_interval(),
        }
    }

    pub fn reporter(&self) -> &ConsoleReporter<W> {
        &self.reporter
    }

    /// One iteration. Returns `false` when the fetch produced no data.
    pub async fn run_cycle(&mut self) -> bool {
        info!("{} New Update {}", "=".repeat(40), "=".repeat(40));

        let records = match self.fetcher.fetch(&self.request).await {
            Ok(records) => records,
            Err(_) => {
                info!("No data this cycle, skipping export and report.");
                return false;
            }
        };

        match self.exporter.export(&records) {
            Ok(()) => info!("Successfully updated {}", self.exporter.path().display()),
            Err(e) => warn!("Error updating Excel file: {}", e),
        }

        if let Err(e) = self.reporter.render_records(&records) {
            warn!("Failed to print records: {}", e);
        }

        match self.analyzer.analyze(&records) {
            Some(analysis) => {
                if let Err(e) = self.reporter.render_analysis(&analysis) {
                    warn!("Failed to print analysis: {}", e);
                }
            }
            None => info!("No data to analyze."),
        }

        true
    }

    /// Loops until `shutdown` resolves. Shutdown is honored mid-cycle and mid-sleep.
    pub async fn run<S: Future<Output = ()>>(&mut self, shutdown: S) {
        tokio::pin!(shutdown);

        loop {
            let started = Instant::now();

            tokio::select! {
                _ = self.run_cycle() => {}
                _ = &mut shutdown => break,
            }

            let wait = sleep_duration(self.interval, started.elapsed());
            info!("Next update in {:.1} minutes...", wait.as_secs_f64() / 60.0);

            tokio::select! {
                _ = sleep(wait) => {}
                _ = &mut shutdown => break,
            }
        }

        info!(
            "Monitoring stopped by user. Final snapshot saved in '{}'",
            self.exporter.path().display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurrencyRecord, FetchError, RecordSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct StubFetcher {
        calls: Arc<AtomicUsize>,
        records: Option<RecordSet>,
    }

    #[async_trait::async_trait]
    impl MarketFetcher for StubFetcher {
        async fn fetch(&self, _req: &MarketRequest) -> Result<RecordSet, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.records.clone().ok_or(FetchError::Status(503))
        }
    }

    fn record(name: &str, price: f64, change: Option<f64>) -> CurrencyRecord {
        CurrencyRecord {
            name: name.to_string(),
            symbol: name.to_uppercase(),
            current_price: price,
            market_cap: price * 1_000.0,
            trading_volume_24h: price,
            price_change_24h: change,
            last_updated: "2024-05-01 10:15:30".to_string(),
            data_refresh_time: "2024-05-01 12:00:00".to_string(),
        }
    }

    fn scheduler(
        records: Option<RecordSet>,
        export_path: std::path::PathBuf,
        interval_seconds: u64,
    ) -> (Scheduler<StubFetcher, Vec<u8>>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let config = AppConfig {
            check_interval_seconds: interval_seconds,
            ..AppConfig::default()
        };
        let scheduler = Scheduler::new(
            StubFetcher {
                calls: calls.clone(),
                records,
            },
            ConsoleReporter::new(Vec::new()),
            XlsxExporter::new(export_path),
            &config,
        );
        (scheduler, calls)
    }

    #[test]
    fn sleep_fills_the_rest_of_the_interval() {
        let interval = Duration::from_secs(300);
        assert_eq!(sleep_duration(interval, Duration::from_secs(45)), Duration::from_secs(255));
        assert_eq!(sleep_duration(interval, Duration::from_secs(310)), Duration::ZERO);
        assert_eq!(sleep_duration(interval, interval), Duration::ZERO);
    }

    #[tokio::test]
    async fn successful_cycle_exports_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("live_crypto_data.xlsx");
        let set = RecordSet::new(vec![
            record("Bitcoin", 64_000.0, Some(2.0)),
            record("Ethereum", 3_000.0, Some(-1.5)),
        ]);
        let (mut scheduler, calls) = scheduler(Some(set), path.clone(), 300);

        assert!(scheduler.run_cycle().await);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(path.exists());
        let text = String::from_utf8(scheduler.reporter().get_ref().clone()).unwrap();
        let table_at = text.find("TOP 2 CRYPTOCURRENCIES BY MARKET CAPITALIZATION").unwrap();
        let analysis_at = text.find("CRYPTOCURRENCY MARKET ANALYSIS").unwrap();
        assert!(table_at < analysis_at);
        assert!(text.contains("Highest Increase: Bitcoin (BITCOIN): 2.00%"));
        assert!(text.contains("Highest Decrease: Ethereum (ETHEREUM): -1.50%"));
    }

    #[tokio::test]
    async fn failed_fetch_skips_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("live_crypto_data.xlsx");
        let (mut scheduler, calls) = scheduler(None, path.clone(), 300);

        assert!(!scheduler.run_cycle().await);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!path.exists());
        assert!(scheduler.reporter().get_ref().is_empty());
    }

    #[tokio::test]
    async fn export_failure_does_not_stop_the_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.xlsx");
        let set = RecordSet::new(vec![record("Bitcoin", 64_000.0, None)]);
        let (mut scheduler, _) = scheduler(Some(set), path, 300);

        assert!(scheduler.run_cycle().await);

        let text = String::from_utf8(scheduler.reporter().get_ref().clone()).unwrap();
        assert!(text.contains("CRYPTOCURRENCY MARKET ANALYSIS"));
    }

    #[tokio::test]
    async fn shutdown_during_sleep_ends_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("live_crypto_data.xlsx");
        let set = RecordSet::new(vec![record("Bitcoin", 64_000.0, None)]);
        let (mut scheduler, calls) = scheduler(Some(set), path.clone(), 3_600);

        scheduler.run(sleep(Duration::from_millis(200))).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(path.exists());
    }
}
