use crate::core::Pipeline;
use crate::utils::error::{EtlError, Result};
use crate::utils::monitor::SystemMonitor;

/// Drives one run: LoadOrFetch → Sanitize → Sort → EnsureOutputDir →
/// ResolveOutputPath → Write. The first failure ends the run.
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting employee export");
        self.monitor.log_stats("Start");

        // Extract
        let batch = self
            .pipeline
            .extract()
            .await
            .inspect_err(|e| self.log_failure(e))?;
        tracing::info!("📥 Loaded raw data from {}", batch.origin);
        self.monitor.log_stats("Load or fetch");

        // Transform
        let result = self
            .pipeline
            .transform(batch)
            .await
            .inspect_err(|e| self.log_failure(e))?;
        tracing::info!("🔄 Sanitized and sorted {} records", result.employees.len());
        self.monitor.log_stats("Sanitize and sort");

        // Load
        let output_path = self
            .pipeline
            .load(result)
            .await
            .inspect_err(|e| self.log_failure(e))?;
        self.monitor.log_stats("Write");
        self.monitor.log_final_stats();

        Ok(output_path)
    }

    fn log_failure(&self, error: &EtlError) {
        match error.stage() {
            Some(stage) => tracing::error!("❌ Stage '{}' failed: {}", stage, error),
            None => tracing::error!("❌ Run failed: {}", error),
        }
    }
}
