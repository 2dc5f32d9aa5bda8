//! Run snapshots on disk

use crate::analytics::console::format_report;
use crate::simulation::RunResults;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use tracing::info;

/// Handles saving run results under an output directory
pub struct RunLogger {
    output_dir: String,
}

impl RunLogger {
    /// Create a new logger with the specified output directory
    pub fn new(output_dir: &str) -> Self {
        Self {
            output_dir: output_dir.to_string(),
        }
    }

    /// Ensure output directories exist
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(format!("{}/logs", self.output_dir))
            .context("Failed to create logs directory")?;
        fs::create_dir_all(format!("{}/reports", self.output_dir))
            .context("Failed to create reports directory")?;
        Ok(())
    }

    /// Default location of the HTML radar report
    pub fn report_path(&self) -> String {
        format!("{}/reports/radar.html", self.output_dir)
    }

    /// Save run results to a JSON file
    pub fn save_results(&self, results: &RunResults) -> Result<String> {
        self.ensure_dirs()?;

        let timestamp = results.generated_at.format("%Y%m%d_%H%M%S");
        let filename = format!("{}/logs/kpi_{}.json", self.output_dir, timestamp);

        let json = serde_json::to_string_pretty(results)
            .context("Failed to serialize results")?;

        let mut file = File::create(&filename)
            .context("Failed to create log file")?;
        file.write_all(json.as_bytes())
            .context("Failed to write log file")?;

        info!("Results saved to: {}", filename);
        Ok(filename)
    }

    /// Load results from a JSON file
    pub fn load_results(path: &str) -> Result<RunResults> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read results file {}", path))?;

        serde_json::from_str(&contents)
            .context("Failed to parse results file")
    }

    /// Save the text report next to the JSON snapshot
    pub fn save_summary(&self, results: &RunResults) -> Result<String> {
        self.ensure_dirs()?;

        let timestamp = results.generated_at.format("%Y%m%d_%H%M%S");
        let filename = format!("{}/logs/summary_{}.txt", self.output_dir, timestamp);

        let summary = format_report(&results.sample, &results.kpis, results.generated_at);

        let mut file = File::create(&filename)
            .context("Failed to create summary file")?;
        file.write_all(summary.as_bytes())
            .context("Failed to write summary file")?;

        info!("Summary saved to: {}", filename);
        Ok(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KpiConfig;
    use crate::simulation::Orchestrator;

    fn temp_dir(name: &str) -> String {
        let dir = std::env::temp_dir()
            .join(format!("logistics_kpi_{}_{}", name, std::process::id()));
        dir.to_string_lossy().to_string()
    }

    #[test]
    fn test_save_and_load_results() {
        let dir = temp_dir("roundtrip");
        let logger = RunLogger::new(&dir);
        let results = Orchestrator::new(KpiConfig::deterministic())
            .unwrap()
            .run()
            .unwrap();

        let path = logger.save_results(&results).unwrap();
        let loaded = RunLogger::load_results(&path).unwrap();

        assert_eq!(loaded.sample, results.sample);
        for (kind, value) in results.kpis.iter() {
            assert!((loaded.kpis.value(kind) - value).abs() < 1e-9);
        }
        assert_eq!(loaded.seed, Some(42));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_summary_writes_report() {
        let dir = temp_dir("summary");
        let logger = RunLogger::new(&dir);
        let results = Orchestrator::new(KpiConfig::deterministic())
            .unwrap()
            .run()
            .unwrap();

        let path = logger.save_summary(&results).unwrap();
        let text = fs::read_to_string(&path).unwrap();

        assert!(text.contains("LOGISTICS KPI"));
        assert!(text.contains("Supplier reliability"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(RunLogger::load_results("/nonexistent/kpi.json").is_err());
    }
}
