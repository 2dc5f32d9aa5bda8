//! Run Orchestrator
//!
//! Controls the flow of a KPI run: draw a sample, compute its KPIs and
//! collect the results, either once or for a batch of runs.

use crate::analytics::kpi::{KpiCalculator, KpiSet};
use crate::analytics::metrics::{KpiStatistic, MetricsCalculator};
use crate::config::KpiConfig;
use crate::errors::{KpiError, KpiResult};
use crate::simulation::generator::SampleGenerator;
use crate::simulation::sample::Sample;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Results of a single run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResults {
    /// When the run was generated
    pub generated_at: DateTime<Utc>,
    /// Seed used, if the run was reproducible
    pub seed: Option<u64>,
    /// Generator profile name
    pub profile: String,
    /// Raw quantities
    pub sample: Sample,
    /// Derived indicators
    pub kpis: KpiSet,
}

/// Results of a batch of runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResults {
    pub seed: Option<u64>,
    pub profile: String,
    pub runs: Vec<RunResults>,
    pub statistics: Vec<KpiStatistic>,
}

/// Main run orchestrator
pub struct Orchestrator {
    /// Configuration
    config: KpiConfig,
    /// Sample source
    generator: SampleGenerator<StdRng>,
}

impl Orchestrator {
    /// Create a new orchestrator with the given configuration
    pub fn new(config: KpiConfig) -> KpiResult<Self> {
        config.validate()?;

        let generator = match config.seed {
            Some(seed) => SampleGenerator::seeded(
                config.profile.clone(),
                config.supplier_deliveries,
                config.supplier_on_time_probability,
                seed,
            ),
            None => SampleGenerator::from_entropy(
                config.profile.clone(),
                config.supplier_deliveries,
                config.supplier_on_time_probability,
            ),
        };

        Ok(Self { config, generator })
    }

    /// Generate one sample and compute its KPIs
    pub fn run(&mut self) -> KpiResult<RunResults> {
        let sample = self.generator.generate();
        let kpis = KpiCalculator::compute(&sample)?;

        debug!("On-time delivery: {:.1}%", kpis.on_time_delivery_rate);
        debug!("Gross margin: {:.1}%", kpis.gross_margin);

        Ok(RunResults {
            generated_at: Utc::now(),
            seed: self.config.seed,
            profile: self.config.profile.name().to_string(),
            sample,
            kpis,
        })
    }

    /// Repeat the run and aggregate KPI statistics
    pub fn run_batch(&mut self, runs: u32) -> KpiResult<BatchResults> {
        if runs == 0 {
            return Err(KpiError::InvalidConfig(
                "batch needs at least one run".to_string(),
            ));
        }

        info!("Starting batch of {} runs ({} profile)", runs, self.config.profile.name());

        let mut results = Vec::with_capacity(runs as usize);
        for i in 0..runs {
            results.push(self.run()?);

            if (i + 1) % 100 == 0 {
                info!("Progress: {}/{} runs", i + 1, runs);
            }
        }

        let kpi_sets: Vec<KpiSet> = results.iter().map(|r| r.kpis.clone()).collect();
        let statistics = MetricsCalculator::summarize(&kpi_sets);

        info!("Batch complete");

        Ok(BatchResults {
            seed: self.config.seed,
            profile: self.config.profile.name().to_string(),
            runs: results,
            statistics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orchestrator_single_run() {
        let mut orchestrator = Orchestrator::new(KpiConfig::deterministic()).unwrap();
        let results = orchestrator.run().unwrap();

        assert_eq!(results.seed, Some(42));
        assert_eq!(results.profile, "classic");
        assert_eq!(results.sample.supplier_on_time_flags.len(), 10);
        assert!(results.kpis.inventory_turnover > 0.0);
    }

    #[test]
    fn test_seeded_runs_reproducible() {
        let mut a = Orchestrator::new(KpiConfig::deterministic()).unwrap();
        let mut b = Orchestrator::new(KpiConfig::deterministic()).unwrap();

        let ra = a.run().unwrap();
        let rb = b.run().unwrap();
        assert_eq!(ra.sample, rb.sample);
        assert_eq!(ra.kpis, rb.kpis);
    }

    #[test]
    fn test_batch_run() {
        let config = KpiConfig {
            seed: Some(9),
            ..KpiConfig::derived()
        };
        let mut orchestrator = Orchestrator::new(config).unwrap();
        let batch = orchestrator.run_batch(25).unwrap();

        assert_eq!(batch.runs.len(), 25);
        assert_eq!(batch.statistics.len(), 6);
        for stat in &batch.statistics {
            assert!(stat.min - 1e-9 <= stat.mean && stat.mean <= stat.max + 1e-9);
        }
    }

    #[test]
    fn test_empty_batch_rejected() {
        let mut orchestrator = Orchestrator::new(KpiConfig::deterministic()).unwrap();
        assert!(orchestrator.run_batch(0).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = KpiConfig {
            supplier_deliveries: 0,
            ..Default::default()
        };
        assert!(Orchestrator::new(config).is_err());
    }
}
