//! KPI generation configuration

use crate::analytics::kpi::KpiKind;
use crate::errors::{KpiError, KpiResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Seed used by the deterministic preset
pub const DETERMINISTIC_SEED: u64 = 42;

/// Inclusive integer range for a sampled quantity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: u64,
    pub max: u64,
}

impl IntRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    fn check(&self, name: &str) -> KpiResult<()> {
        if self.min > self.max {
            return Err(KpiError::InvalidConfig(format!(
                "{} range is empty ({} > {})",
                name, self.min, self.max
            )));
        }
        Ok(())
    }

    fn check_positive(&self, name: &str) -> KpiResult<()> {
        self.check(name)?;
        if self.min == 0 {
            return Err(KpiError::InvalidConfig(format!(
                "{} lower bound must be positive",
                name
            )));
        }
        Ok(())
    }
}

/// Inclusive floating-point range for a sampled rate or ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,
}

impl RateRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn check(&self, name: &str) -> KpiResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(KpiError::InvalidConfig(format!(
                "{} range is invalid ({} .. {})",
                name, self.min, self.max
            )));
        }
        Ok(())
    }

    fn check_fraction(&self, name: &str) -> KpiResult<()> {
        self.check(name)?;
        if self.min < 0.0 || self.max > 1.0 {
            return Err(KpiError::InvalidConfig(format!(
                "{} must lie within [0, 1]",
                name
            )));
        }
        Ok(())
    }
}

/// Every field drawn independently from its own range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassicRanges {
    pub orders: IntRange,
    pub orders_on_time: IntRange,
    pub avg_inventory: IntRange,
    pub net_sales: IntRange,
    pub cost_of_goods_sold: IntRange,
    pub perfect_orders: IntRange,
    pub total_transport_cost: IntRange,
    pub total_tonnage: IntRange,
}

impl Default for ClassicRanges {
    fn default() -> Self {
        Self {
            orders: IntRange::new(480, 520),
            orders_on_time: IntRange::new(400, 450),
            avg_inventory: IntRange::new(115_000, 125_000),
            net_sales: IntRange::new(580_000, 620_000),
            cost_of_goods_sold: IntRange::new(430_000, 470_000),
            perfect_orders: IntRange::new(370, 400),
            total_transport_cost: IntRange::new(70_000, 80_000),
            total_tonnage: IntRange::new(1_450, 1_550),
        }
    }
}

/// Counts and amounts derived from sampled rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivedRanges {
    pub orders: IntRange,
    pub on_time_rate: RateRange,
    pub perfect_rate: RateRange,
    pub net_sales: IntRange,
    pub gross_margin: RateRange,
    pub inventory_turnover: RateRange,
    pub total_tonnage: IntRange,
    pub cost_per_ton: RateRange,
}

impl Default for DerivedRanges {
    fn default() -> Self {
        Self {
            orders: IntRange::new(450, 550),
            on_time_rate: RateRange::new(0.80, 0.95),
            perfect_rate: RateRange::new(0.70, 0.85),
            net_sales: IntRange::new(580_000, 620_000),
            gross_margin: RateRange::new(0.20, 0.30),
            inventory_turnover: RateRange::new(3.0, 4.5),
            total_tonnage: IntRange::new(1_300, 1_700),
            cost_per_ton: RateRange::new(40.0, 70.0),
        }
    }
}

/// Which family of ranges the generator draws from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SampleProfile {
    Classic(ClassicRanges),
    Derived(DerivedRanges),
}

impl SampleProfile {
    pub fn name(&self) -> &'static str {
        match self {
            SampleProfile::Classic(_) => "classic",
            SampleProfile::Derived(_) => "derived",
        }
    }
}

impl Default for SampleProfile {
    fn default() -> Self {
        SampleProfile::Classic(ClassicRanges::default())
    }
}

/// Industry baseline per KPI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceBenchmarks {
    pub on_time_delivery_rate: f64,
    pub perfect_order_rate: f64,
    pub inventory_turnover: f64,
    pub transport_cost_per_ton: f64,
    pub supplier_reliability_rate: f64,
    pub gross_margin: f64,
}

impl ReferenceBenchmarks {
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
}

impl Default for ReferenceBenchmarks {
    fn default() -> Self {
        Self {
            on_time_delivery_rate: 95.0,
            perfect_order_rate: 85.0,
            inventory_turnover: 3.5,
            transport_cost_per_ton: 50.0,
            supplier_reliability_rate: 90.0,
            gross_margin: 25.0,
        }
    }
}

/// Display scaling onto the radar's [0, 1] axis.
///
/// These constants only shape the chart; KPI values are never altered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarScaling {
    /// Divisor for percentage KPIs
    pub percent_divisor: f64,
    /// Divisor for inventory turnover
    pub turnover_divisor: f64,
    /// Transport cost mapped to 1.0 (lower cost is better)
    pub transport_cost_floor: f64,
    /// Transport cost span mapped onto one unit of the axis
    pub transport_cost_span: f64,
    /// Divisor for gross margin
    pub margin_divisor: f64,
}

impl Default for RadarScaling {
    fn default() -> Self {
        Self {
            percent_divisor: 100.0,
            turnover_divisor: 4.0,
            transport_cost_floor: 40.0,
            transport_cost_span: 30.0,
            margin_divisor: 30.0,
        }
    }
}

/// Radar chart and recommendation panel settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub references: ReferenceBenchmarks,
    pub scaling: RadarScaling,
    /// A KPI is critical when `actual - reference < -critical_gap`
    pub critical_gap: f64,
    /// Show the critical indicators and recommendations panel
    pub show_panel: bool,
    pub recommendations: Vec<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            references: ReferenceBenchmarks::default(),
            scaling: RadarScaling::default(),
            critical_gap: 5.0,
            show_panel: true,
            recommendations: vec![
                "Optimize delivery routes and consolidate loads".to_string(),
                "Review supplier service-level agreements".to_string(),
                "Improve demand forecasting to reduce idle stock".to_string(),
                "Automate order validation before dispatch".to_string(),
                "Renegotiate purchasing terms with key suppliers".to_string(),
            ],
        }
    }
}

/// Main KPI run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiConfig {
    /// Generator ranges
    pub profile: SampleProfile,

    /// Number of supplier deliveries tracked per sample
    pub supplier_deliveries: usize,

    /// Probability that a single supplier delivery is on time
    pub supplier_on_time_probability: f64,

    /// Fixed seed for reproducible samples; entropy when unset
    pub seed: Option<u64>,

    /// Radar chart settings
    pub chart: ChartConfig,

    /// Output directory for logs and reports
    pub output_dir: String,
}

impl Default for KpiConfig {
    fn default() -> Self {
        Self {
            profile: SampleProfile::default(),
            supplier_deliveries: 10,
            supplier_on_time_probability: 0.7,
            seed: None,
            chart: ChartConfig::default(),
            output_dir: "output".to_string(),
        }
    }
}

impl KpiConfig {
    /// Independent uniform draws per field
    pub fn classic() -> Self {
        Self::default()
    }

    /// Counts derived from sampled rates
    pub fn derived() -> Self {
        Self {
            profile: SampleProfile::Derived(DerivedRanges::default()),
            ..Default::default()
        }
    }

    /// Classic ranges with a fixed seed
    pub fn deterministic() -> Self {
        Self {
            seed: Some(DETERMINISTIC_SEED),
            ..Self::classic()
        }
    }

    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> KpiResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: KpiConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of a loaded configuration
    pub fn with_overrides(mut self, profile: Option<SampleProfile>, seed: Option<u64>) -> Self {
        if let Some(profile) = profile {
            self.profile = profile;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Reject ranges that could produce a zero KPI denominator
    pub fn validate(&self) -> KpiResult<()> {
        match &self.profile {
            SampleProfile::Classic(r) => {
                r.orders.check_positive("orders")?;
                r.orders_on_time.check("orders_on_time")?;
                r.avg_inventory.check_positive("avg_inventory")?;
                r.net_sales.check_positive("net_sales")?;
                r.cost_of_goods_sold.check("cost_of_goods_sold")?;
                r.perfect_orders.check("perfect_orders")?;
                r.total_transport_cost.check("total_transport_cost")?;
                r.total_tonnage.check_positive("total_tonnage")?;
            }
            SampleProfile::Derived(r) => {
                r.orders.check_positive("orders")?;
                r.on_time_rate.check_fraction("on_time_rate")?;
                r.perfect_rate.check_fraction("perfect_rate")?;
                r.net_sales.check_positive("net_sales")?;
                r.gross_margin.check("gross_margin")?;
                r.inventory_turnover.check("inventory_turnover")?;
                r.total_tonnage.check_positive("total_tonnage")?;
                r.cost_per_ton.check("cost_per_ton")?;

                if r.gross_margin.max >= 1.0 {
                    return Err(KpiError::InvalidConfig(
                        "gross_margin must stay below 1".to_string(),
                    ));
                }
                if r.inventory_turnover.min <= 0.0 {
                    return Err(KpiError::InvalidConfig(
                        "inventory_turnover lower bound must be positive".to_string(),
                    ));
                }
                if r.cost_per_ton.min < 0.0 {
                    return Err(KpiError::InvalidConfig(
                        "cost_per_ton must not be negative".to_string(),
                    ));
                }

                // Smallest inventory the derivation can yield
                let min_cogs = (r.net_sales.min as f64 * (1.0 - r.gross_margin.max)).round();
                if (min_cogs / r.inventory_turnover.max).round() < 1.0 {
                    return Err(KpiError::InvalidConfig(
                        "derived avg_inventory could round to zero".to_string(),
                    ));
                }
            }
        }

        if self.supplier_deliveries == 0 {
            return Err(KpiError::InvalidConfig(
                "supplier_deliveries must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.supplier_on_time_probability) {
            return Err(KpiError::InvalidConfig(
                "supplier_on_time_probability must lie within [0, 1]".to_string(),
            ));
        }
        if self.chart.scaling.transport_cost_span == 0.0 {
            return Err(KpiError::InvalidConfig(
                "transport_cost_span must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}
