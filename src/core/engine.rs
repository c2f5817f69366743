use crate::core::Pipeline;
use crate::domain::model::SourceWarning;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: String,
    pub listing_count: usize,
    pub unresolved_count: usize,
    pub warnings: Vec<SourceWarning>,
}

pub struct HarvestEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> HarvestEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting harvest...");
        self.monitor.log_stats("Start");

        let report = self.pipeline.extract().await?;
        tracing::info!(
            "Harvested {} listings from {} sources ({} failed)",
            report.listings.len(),
            report.sources_processed,
            report.warnings.len()
        );
        self.monitor.log_stats("Harvest");

        let transformed = self.pipeline.transform(&report).await?;
        self.monitor.log_stats("Report");

        let output_path = self.pipeline.load(transformed).await?;
        tracing::info!("Report saved to: {}", output_path);
        self.monitor.log_final_stats();

        Ok(RunSummary {
            output_path,
            listing_count: report.listings.len(),
            unresolved_count: report.unresolved_count(),
            warnings: report.warnings,
        })
    }
}
