//! Metrics calculation across repeated runs

use crate::analytics::kpi::{KpiKind, KpiSet};
use serde::{Deserialize, Serialize};

/// Calculator for batch statistics
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Mean, spread and extremes of each KPI, in display order
    pub fn summarize(sets: &[KpiSet]) -> Vec<KpiStatistic> {
        if sets.is_empty() {
            return vec![];
        }

        KpiKind::ALL
            .into_iter()
            .map(|kind| {
                let values: Vec<f64> = sets.iter().map(|s| s.value(kind)).collect();
                let n = values.len() as f64;
                let mean = values.iter().sum::<f64>() / n;
                let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

                KpiStatistic {
                    kind,
                    label: kind.label().to_string(),
                    mean,
                    min: values.iter().cloned().fold(f64::INFINITY, f64::min),
                    max: values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
                    std_dev: variance.sqrt(),
                    samples: values.len() as u32,
                }
            })
            .collect()
    }

    /// Format statistics as an aligned table
    pub fn format_table(stats: &[KpiStatistic]) -> String {
        let mut out = format!(
            "{:<28} {:>12} {:>12} {:>12} {:>10}\n",
            "Indicator", "Mean", "Min", "Max", "Std dev"
        );
        out.push_str(&format!("{}\n", "-".repeat(78)));

        for stat in stats {
            out.push_str(&format!(
                "{:<28} {:>12} {:>12} {:>12} {:>10.2}\n",
                stat.label,
                stat.kind.format_value(stat.mean),
                stat.kind.format_value(stat.min),
                stat.kind.format_value(stat.max),
                stat.std_dev,
            ));
        }
        out
    }
}

/// Aggregate of one KPI across a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiStatistic {
    pub kind: KpiKind,
    pub label: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub samples: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn set(on_time: f64) -> KpiSet {
        KpiSet {
            on_time_delivery_rate: on_time,
            perfect_order_rate: 77.0,
            inventory_turnover: 3.75,
            transport_cost_per_ton: 50.0,
            supplier_reliability_rate: 70.0,
            gross_margin: 25.0,
        }
    }

    #[test]
    fn test_empty_batch() {
        assert!(MetricsCalculator::summarize(&[]).is_empty());
    }

    #[test]
    fn test_identical_sets_have_no_spread() {
        let stats = MetricsCalculator::summarize(&[set(85.0), set(85.0), set(85.0)]);

        assert_eq!(stats.len(), 6);
        for stat in &stats {
            assert!(stat.std_dev.abs() < EPS);
            assert!((stat.mean - stat.min).abs() < EPS);
            assert!((stat.max - stat.min).abs() < EPS);
            assert_eq!(stat.samples, 3);
        }
    }

    #[test]
    fn test_mean_min_max() {
        let stats = MetricsCalculator::summarize(&[set(80.0), set(90.0)]);
        let on_time = &stats[0];

        assert_eq!(on_time.kind, KpiKind::OnTimeDelivery);
        assert!((on_time.mean - 85.0).abs() < EPS);
        assert!((on_time.min - 80.0).abs() < EPS);
        assert!((on_time.max - 90.0).abs() < EPS);
        assert!((on_time.std_dev - 5.0).abs() < EPS);
    }

    #[test]
    fn test_table_lists_every_kpi() {
        let table = MetricsCalculator::format_table(&MetricsCalculator::summarize(&[set(85.0)]));

        for kind in KpiKind::ALL {
            assert!(table.contains(kind.label()));
        }
    }
}
