use crate::core::harvest::HarvestCoordinator;
use crate::core::{PageFetcher, Pipeline, Storage};
use crate::domain::model::{HarvestReport, ListingRow, TransformResult};
use crate::utils::error::{HarvestError, Result};
use chrono::{DateTime, Local};
use std::path::Path;

pub const CSV_HEADER: [&str; 4] = ["Company", "Title", "Location", "Link"];

#[derive(Debug, Clone)]
pub struct OutputSettings {
    pub output_path: String,
    pub file_prefix: String,
    pub write_json: bool,
}

/// Harvest as extract, tabular report as transform, file write as load.
pub struct HarvestPipeline<S: Storage, F: PageFetcher> {
    storage: S,
    coordinator: HarvestCoordinator<F>,
    output: OutputSettings,
    started_at: DateTime<Local>,
}

impl<S: Storage, F: PageFetcher> HarvestPipeline<S, F> {
    pub fn new(storage: S, coordinator: HarvestCoordinator<F>, output: OutputSettings) -> Self {
        Self {
            storage,
            coordinator,
            output,
            started_at: Local::now(),
        }
    }

    /// Pins the timestamp used in output file names.
    pub fn with_run_time(mut self, started_at: DateTime<Local>) -> Self {
        self.started_at = started_at;
        self
    }

    /// `<prefix>_<YYYY-MM-DD_HHMM>.<extension>`
    pub fn file_name(&self, extension: &str) -> String {
        format!(
            "{}_{}.{}",
            self.output.file_prefix,
            self.started_at.format("%Y-%m-%d_%H%M"),
            extension
        )
    }
}

pub fn render_csv(report: &HarvestReport) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for listing in &report.listings {
        writer.serialize(ListingRow::from(listing))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| HarvestError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| HarvestError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[async_trait::async_trait]
impl<S: Storage, F: PageFetcher> Pipeline for HarvestPipeline<S, F> {
    async fn extract(&self) -> Result<HarvestReport> {
        Ok(self.coordinator.run().await)
    }

    async fn transform(&self, report: &HarvestReport) -> Result<TransformResult> {
        let csv_output = render_csv(report)?;
        let json_output = if self.output.write_json {
            Some(serde_json::to_string_pretty(report)?)
        } else {
            None
        };

        Ok(TransformResult {
            listing_count: report.listings.len(),
            csv_output,
            json_output,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let csv_name = self.file_name("csv");
        tracing::debug!("Writing {} rows to {}", result.listing_count, csv_name);
        self.storage
            .write_file(&csv_name, result.csv_output.as_bytes())
            .await?;

        if let Some(json) = &result.json_output {
            let json_name = self.file_name("json");
            tracing::debug!("Writing JSON report to {}", json_name);
            self.storage.write_file(&json_name, json.as_bytes()).await?;
        }

        Ok(Path::new(&self.output.output_path)
            .join(csv_name)
            .display()
            .to_string())
    }
}
