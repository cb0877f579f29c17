use crate::fetcher::MarketFetcher;
use crate::model::{FetchError, MarketRequest, RecordSet};
use crate::normalizer::normalize_all;
use crate::parser::{MarketParser, Parser};

use chrono::Local;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// What to do when the API answers 429.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    /// `None` keeps retrying until the API lets us through.
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

pub struct CoinGeckoFetcher {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
    parser: MarketParser,
}

impl CoinGeckoFetcher {
    pub fn new(base_url: impl Into<String>, retry: RetryPolicy) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) CryptoPulse/0.1")
            .build()?;

        Ok(Self::with_client(client, base_url, retry))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            retry,
            parser: MarketParser::new(),
        }
    }

    fn build_url(&self) -> String {
        format!("{}/coins/markets", self.base_url.trim_end_matches('/'))
    }

    async fn fetch_markets(&self, req: &MarketRequest) -> Result<RecordSet, FetchError> {
        let url = self.build_url();
        let params = req.query_params();
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let response = self.client.get(&url).query(&params).send().await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                if self.retry.exhausted(attempts) {
                    return Err(FetchError::RateLimited { attempts });
                }
                warn!(
                    "Rate limit exceeded. Waiting {:?} before retrying (attempt {})...",
                    self.retry.delay, attempts
                );
                sleep(self.retry.delay).await;
                continue;
            }

            if status != StatusCode::OK {
                return Err(FetchError::Status(status.as_u16()));
            }

            let body = response.text().await?;
            let markets = self.parser.parse(&body)?;
            let records = normalize_all(markets, Local::now())?;
            info!("Fetched {} markets", records.len());

            return Ok(RecordSet::new(records));
        }
    }
}

#[async_trait::async_trait]
impl MarketFetcher for CoinGeckoFetcher {
    async fn fetch(&self, req: &MarketRequest) -> Result<RecordSet, FetchError> {
        let result = self.fetch_markets(req).await;
        if let Err(e) = &result {
            warn!("Fetch failed: {}", e);
        }
        result
    }
}
