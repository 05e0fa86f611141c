use crate::core::{Pipeline, RunReport};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use chrono::Utc;

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

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs every stage in order. The first failing stage aborts the run;
    /// files written by earlier stages are left in place.
    pub fn run(&self) -> Result<RunReport> {
        let started_at = Utc::now();
        tracing::info!("🚀 Starting ETL process...");

        // Extract
        let extraction = self.pipeline.extract()?;
        let csv_records = extraction.delimited.len();
        let json_records = extraction.structured.len();
        let records = extraction.into_records();
        tracing::info!("Extracted {} records", records.len());
        self.monitor.log_stats("Extract");

        self.pipeline.prepare()?;

        // Transform
        let transformed = self.pipeline.transform(records)?;
        tracing::info!(
            "Transformed {} records ({} incomplete, {} outside age range)",
            transformed.players.len(),
            transformed.dropped_missing,
            transformed.dropped_out_of_range
        );
        self.monitor.log_stats("Transform");

        // Load
        let processed_path = self.pipeline.load(&transformed)?;
        self.monitor.log_stats("Load");

        // Validate
        let validation = self.pipeline.validate(&transformed)?;
        let result_path = self.pipeline.report(&validation)?;
        tracing::info!(
            "Validated {} records against {} reference files: {} passed, {} failed",
            validation.rows.len(),
            validation.files_checked,
            validation.passed(),
            validation.failed()
        );
        self.monitor.log_stats("Validate");
        self.monitor.log_final_stats();

        Ok(RunReport {
            started_at,
            finished_at: Utc::now(),
            csv_records,
            json_records,
            dropped_missing: transformed.dropped_missing,
            dropped_out_of_range: transformed.dropped_out_of_range,
            processed: transformed.players.len(),
            passed: validation.passed(),
            failed: validation.failed(),
            processed_path,
            result_path,
        })
    }
}
