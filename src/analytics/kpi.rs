//! KPI definitions and calculation

use crate::errors::{KpiError, KpiResult};
use crate::simulation::sample::Sample;
use serde::{Deserialize, Serialize};

/// The six tracked indicators, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiKind {
    OnTimeDelivery,
    PerfectOrder,
    InventoryTurnover,
    TransportCostPerTon,
    SupplierReliability,
    GrossMargin,
}

/// Unit a KPI is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiUnit {
    Percent,
    Ratio,
    CurrencyPerTon,
}

impl KpiKind {
    pub const ALL: [KpiKind; 6] = [
        KpiKind::OnTimeDelivery,
        KpiKind::PerfectOrder,
        KpiKind::InventoryTurnover,
        KpiKind::TransportCostPerTon,
        KpiKind::SupplierReliability,
        KpiKind::GrossMargin,
    ];

    pub fn label(self) -> &'static str {
        match self {
            KpiKind::OnTimeDelivery => "On-time delivery rate",
            KpiKind::PerfectOrder => "Perfect order rate",
            KpiKind::InventoryTurnover => "Inventory turnover",
            KpiKind::TransportCostPerTon => "Transport cost per ton",
            KpiKind::SupplierReliability => "Supplier reliability rate",
            KpiKind::GrossMargin => "Gross margin",
        }
    }

    pub fn unit(self) -> KpiUnit {
        match self {
            KpiKind::InventoryTurnover => KpiUnit::Ratio,
            KpiKind::TransportCostPerTon => KpiUnit::CurrencyPerTon,
            _ => KpiUnit::Percent,
        }
    }

    /// Format a value with this KPI's precision and unit suffix
    pub fn format_value(self, value: f64) -> String {
        match self.unit() {
            KpiUnit::Percent => format!("{:.1}%", value),
            KpiUnit::Ratio => format!("{:.2}", value),
            KpiUnit::CurrencyPerTon => format!("{:.2} €/t", value),
        }
    }
}

/// Computed indicators for one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSet {
    /// Orders on time / orders (%)
    pub on_time_delivery_rate: f64,
    /// Perfect orders / orders (%)
    pub perfect_order_rate: f64,
    /// Cost of goods sold / average inventory
    pub inventory_turnover: f64,
    /// Transport cost / tonnage
    pub transport_cost_per_ton: f64,
    /// On-time supplier deliveries / deliveries (%)
    pub supplier_reliability_rate: f64,
    /// 1 - cost of goods sold / net sales (%)
    pub gross_margin: f64,
}

impl KpiSet {
    pub fn value(&self, kind: KpiKind) -> f64 {
        match kind {
            KpiKind::OnTimeDelivery => self.on_time_delivery_rate,
            KpiKind::PerfectOrder => self.perfect_order_rate,
            KpiKind::InventoryTurnover => self.inventory_turnover,
            KpiKind::TransportCostPerTon => self.transport_cost_per_ton,
            KpiKind::SupplierReliability => self.supplier_reliability_rate,
            KpiKind::GrossMargin => self.gross_margin,
        }
    }

    /// (kind, value) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (KpiKind, f64)> + '_ {
        KpiKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.value(kind)))
    }
}

/// Calculator for KPI ratios
pub struct KpiCalculator;

impl KpiCalculator {
    /// Compute all six KPIs, rejecting samples with a zero denominator
    pub fn compute(sample: &Sample) -> KpiResult<KpiSet> {
        Self::require_positive("orders", sample.orders)?;
        Self::require_positive("avg_inventory", sample.avg_inventory)?;
        Self::require_positive("net_sales", sample.net_sales)?;
        Self::require_positive("total_tonnage", sample.total_tonnage)?;

        let deliveries = sample.supplier_deliveries();
        if deliveries == 0 {
            return Err(KpiError::InvalidSample {
                field: "supplier_on_time_flags",
                reason: "must not be empty".to_string(),
            });
        }

        let orders = sample.orders as f64;
        let net_sales = sample.net_sales as f64;

        Ok(KpiSet {
            on_time_delivery_rate: sample.orders_on_time as f64 * 100.0 / orders,
            perfect_order_rate: sample.perfect_orders as f64 * 100.0 / orders,
            inventory_turnover: sample.cost_of_goods_sold as f64 / sample.avg_inventory as f64,
            transport_cost_per_ton: sample.total_transport_cost as f64
                / sample.total_tonnage as f64,
            supplier_reliability_rate: sample.supplier_on_time_count() as f64 * 100.0
                / deliveries as f64,
            gross_margin: (net_sales - sample.cost_of_goods_sold as f64) * 100.0 / net_sales,
        })
    }

    fn require_positive(field: &'static str, value: u64) -> KpiResult<()> {
        if value == 0 {
            return Err(KpiError::InvalidSample {
                field,
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn reference_sample() -> Sample {
        let mut flags = vec![true; 7];
        flags.extend([false; 3]);
        Sample {
            orders: 500,
            orders_on_time: 425,
            avg_inventory: 120_000,
            net_sales: 600_000,
            cost_of_goods_sold: 450_000,
            perfect_orders: 385,
            total_transport_cost: 75_000,
            total_tonnage: 1_500,
            supplier_on_time_flags: flags,
        }
    }

    #[test]
    fn test_reference_sample_kpis() {
        let kpis = KpiCalculator::compute(&reference_sample()).unwrap();

        assert!((kpis.on_time_delivery_rate - 85.0).abs() < EPS);
        assert!((kpis.perfect_order_rate - 77.0).abs() < EPS);
        assert!((kpis.inventory_turnover - 3.75).abs() < EPS);
        assert!((kpis.transport_cost_per_ton - 50.0).abs() < EPS);
        assert!((kpis.supplier_reliability_rate - 70.0).abs() < EPS);
        assert!((kpis.gross_margin - 25.0).abs() < EPS);
    }

    #[test]
    fn test_zero_orders_is_invalid_sample() {
        let sample = Sample {
            orders: 0,
            ..reference_sample()
        };

        match KpiCalculator::compute(&sample) {
            Err(KpiError::InvalidSample { field, .. }) => assert_eq!(field, "orders"),
            other => panic!("expected invalid sample, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_denominators_rejected() {
        let zero_inventory = Sample {
            avg_inventory: 0,
            ..reference_sample()
        };
        let zero_sales = Sample {
            net_sales: 0,
            ..reference_sample()
        };
        let zero_tonnage = Sample {
            total_tonnage: 0,
            ..reference_sample()
        };
        let no_suppliers = Sample {
            supplier_on_time_flags: vec![],
            ..reference_sample()
        };

        for sample in [zero_inventory, zero_sales, zero_tonnage, no_suppliers] {
            assert!(matches!(
                KpiCalculator::compute(&sample),
                Err(KpiError::InvalidSample { .. })
            ));
        }
    }

    #[test]
    fn test_supplier_reliability_is_multiple_of_ten() {
        for k in 0..=10 {
            let mut flags = vec![true; k];
            flags.extend(vec![false; 10 - k]);
            let sample = Sample {
                supplier_on_time_flags: flags,
                ..reference_sample()
            };

            let kpis = KpiCalculator::compute(&sample).unwrap();
            assert!((kpis.supplier_reliability_rate - 10.0 * k as f64).abs() < EPS);
        }
    }

    #[test]
    fn test_rates_bounded_when_counts_bounded() {
        let sample = Sample {
            orders_on_time: 500,
            perfect_orders: 0,
            ..reference_sample()
        };
        let kpis = KpiCalculator::compute(&sample).unwrap();

        assert!((0.0..=100.0).contains(&kpis.on_time_delivery_rate));
        assert!((0.0..=100.0).contains(&kpis.perfect_order_rate));
    }

    #[test]
    fn test_format_value_units() {
        assert_eq!(KpiKind::OnTimeDelivery.format_value(85.0), "85.0%");
        assert_eq!(KpiKind::InventoryTurnover.format_value(3.75), "3.75");
        assert_eq!(KpiKind::TransportCostPerTon.format_value(50.0), "50.00 €/t");
    }

    #[test]
    fn test_iter_follows_display_order() {
        let kpis = KpiCalculator::compute(&reference_sample()).unwrap();
        let kinds: Vec<KpiKind> = kpis.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, KpiKind::ALL.to_vec());
    }
}
