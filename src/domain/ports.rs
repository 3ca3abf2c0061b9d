use crate::domain::model::{RawBatch, SortPolicy, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn output_dir(&self) -> &Path;
    /// `None` disables the on-disk cache; every run then fetches live.
    fn cache_path(&self) -> Option<&Path>;
    fn sort_policy(&self) -> SortPolicy;
    fn timeout_seconds(&self) -> u64;
}

/// Source of the raw user payload.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self) -> Result<serde_json::Value>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RawBatch>;
    async fn transform(&self, batch: RawBatch) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
