//! Radar chart geometry
//!
//! Maps KPI values and their reference benchmarks onto a shared [0, 1]
//! axis, lays the axes out around a circle and selects the indicators
//! lagging their reference. Values are not clamped: a KPI far outside the
//! expected band lands outside the unit circle and a non-finite value
//! propagates into the chart as-is.

use crate::analytics::kpi::{KpiKind, KpiSet, KpiUnit};
use crate::config::{ChartConfig, RadarScaling, ReferenceBenchmarks};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

impl RadarScaling {
    /// Map a KPI value onto the radar axis
    pub fn normalize(&self, kind: KpiKind, value: f64) -> f64 {
        match kind {
            KpiKind::InventoryTurnover => value / self.turnover_divisor,
            KpiKind::TransportCostPerTon => {
                1.0 - (value - self.transport_cost_floor) / self.transport_cost_span
            }
            KpiKind::GrossMargin => value / self.margin_divisor,
            _ => {
                debug_assert_eq!(kind.unit(), KpiUnit::Percent);
                value / self.percent_divisor
            }
        }
    }
}

/// Equally spaced axis angles, closed by repeating the first
pub fn axis_angles(count: usize) -> Vec<f64> {
    if count == 0 {
        return vec![];
    }
    let step = 2.0 * PI / count as f64;
    let mut angles: Vec<f64> = (0..count).map(|i| i as f64 * step).collect();
    angles.push(angles[0]);
    angles
}

/// A point on the radar in polar coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarPoint {
    pub angle: f64,
    pub radius: f64,
}

impl PolarPoint {
    /// Cartesian coordinates with the y axis pointing up
    pub fn to_cartesian(self) -> (f64, f64) {
        (self.radius * self.angle.cos(), self.radius * self.angle.sin())
    }
}

/// One spoke of the radar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarAxis {
    pub kind: KpiKind,
    pub label: String,
    pub angle: f64,
    pub actual: f64,
    pub reference: f64,
    pub actual_normalized: f64,
    pub reference_normalized: f64,
}

/// KPI lagging its reference by more than the allowed gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalIndicator {
    pub kind: KpiKind,
    pub label: String,
    pub actual: f64,
    pub reference: f64,
    /// actual - reference, in the KPI's own unit
    pub gap: f64,
}

/// Actual and reference polygons over six KPI axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarChart {
    pub axes: Vec<RadarAxis>,
}

impl RadarChart {
    pub fn build(kpis: &KpiSet, references: &ReferenceBenchmarks, scaling: &RadarScaling) -> Self {
        let angles = axis_angles(KpiKind::ALL.len());

        let axes = KpiKind::ALL
            .into_iter()
            .zip(angles)
            .map(|(kind, angle)| {
                let actual = kpis.value(kind);
                let reference = references.value(kind);
                RadarAxis {
                    kind,
                    label: kind.label().to_string(),
                    angle,
                    actual,
                    reference,
                    actual_normalized: scaling.normalize(kind, actual),
                    reference_normalized: scaling.normalize(kind, reference),
                }
            })
            .collect();

        Self { axes }
    }

    pub fn from_config(kpis: &KpiSet, chart: &ChartConfig) -> Self {
        Self::build(kpis, &chart.references, &chart.scaling)
    }

    /// Closed polygon of the actual values
    pub fn actual_polygon(&self) -> Vec<PolarPoint> {
        self.polygon(|axis| axis.actual_normalized)
    }

    /// Closed polygon of the reference values
    pub fn reference_polygon(&self) -> Vec<PolarPoint> {
        self.polygon(|axis| axis.reference_normalized)
    }

    fn polygon(&self, radius: impl Fn(&RadarAxis) -> f64) -> Vec<PolarPoint> {
        let mut points: Vec<PolarPoint> = self
            .axes
            .iter()
            .map(|axis| PolarPoint {
                angle: axis.angle,
                radius: radius(axis),
            })
            .collect();
        if let Some(&first) = points.first() {
            points.push(first);
        }
        points
    }

    /// Indicators where `actual - reference < -gap`
    pub fn critical_indicators(&self, gap: f64) -> Vec<CriticalIndicator> {
        self.axes
            .iter()
            .filter(|axis| axis.actual - axis.reference < -gap)
            .map(|axis| CriticalIndicator {
                kind: axis.kind,
                label: axis.label.clone(),
                actual: axis.actual,
                reference: axis.reference,
                gap: axis.actual - axis.reference,
            })
            .collect()
    }
}
