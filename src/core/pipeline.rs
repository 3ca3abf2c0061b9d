use crate::core::{cache, sanitize, sort, writer};
use crate::core::{ConfigProvider, DataOrigin, Pipeline, RawBatch, SourceFetcher, TransformResult};
use crate::utils::error::Result;

/// Fetch (or read cache) → sanitize → sort → write spreadsheet.
pub struct EmployeePipeline<F: SourceFetcher, C: ConfigProvider> {
    pub(crate) fetcher: F,
    pub(crate) config: C,
}

impl<F: SourceFetcher, C: ConfigProvider> EmployeePipeline<F, C> {
    pub fn new(fetcher: F, config: C) -> Self {
        Self { fetcher, config }
    }
}

#[async_trait::async_trait]
impl<F: SourceFetcher, C: ConfigProvider> Pipeline for EmployeePipeline<F, C> {
    async fn extract(&self) -> Result<RawBatch> {
        match self.config.cache_path() {
            Some(cache_path) => cache::load_or_fetch(cache_path, &self.fetcher).await,
            None => {
                tracing::debug!("Cache disabled, fetching live data");
                let payload = self.fetcher.fetch().await?;
                Ok(RawBatch {
                    payload,
                    origin: DataOrigin::Network,
                })
            }
        }
    }

    async fn transform(&self, batch: RawBatch) -> Result<TransformResult> {
        let mut employees = sanitize::sanitize(&batch.payload)?;
        tracing::debug!("Sanitized {} records from {}", employees.len(), batch.origin);

        sort::sort(&mut employees, self.config.sort_policy());
        tracing::debug!("Sorted records by {:?}", self.config.sort_policy());

        Ok(TransformResult { employees })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let path = writer::write(self.config.output_dir(), &result.employees)?;
        tracing::info!("📝 Parsed data written to Excel file: {}", path.display());
        Ok(path.display().to_string())
    }
}
