use crate::model::{FetchError, MarketRequest, RecordSet};

#[async_trait::async_trait]
pub trait MarketFetcher: Send + Sync {
    async fn fetch(&self, req: &MarketRequest) -> Result<RecordSet, FetchError>;
}
