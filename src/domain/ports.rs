use crate::domain::model::{HarvestReport, TransformResult};
use crate::utils::error::{FetchError, Result};
use async_trait::async_trait;

/// The only network boundary: raw markup for a URL, or a typed failure.
pub trait PageFetcher: Send + Sync {
    fn fetch(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = std::result::Result<String, FetchError>> + Send;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<HarvestReport>;
    async fn transform(&self, report: &HarvestReport) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
