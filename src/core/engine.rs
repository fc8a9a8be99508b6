use crate::core::{MergeReport, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct MergeEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> MergeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<MergeReport> {
        tracing::info!("Starting merge");
        self.monitor.log_stats("Start");

        let docs = self.pipeline.extract().await?;
        tracing::info!("Loaded {} document(s)", docs.len());
        self.monitor.log_stats("Extract");

        let merged = self.pipeline.transform(docs).await?;
        tracing::info!(
            "Merged {} page(s) from {} document(s)",
            merged.page_count,
            merged.placements.len()
        );
        self.monitor.log_stats("Merge");

        let report = self.pipeline.load(merged).await?;
        if report.dry_run {
            tracing::info!("Dry run finished, nothing written");
        } else {
            tracing::info!("Output saved to: {}", report.output.display());
        }
        self.monitor.log_stats("Write");
        self.monitor.log_final_stats();

        Ok(report)
    }
}
