//! HTML Report Generation with an SVG radar chart

use crate::analytics::kpi::KpiKind;
use crate::analytics::radar::{axis_angles, CriticalIndicator, PolarPoint, RadarChart};
use crate::config::ChartConfig;
use crate::errors::KpiResult;
use crate::simulation::RunResults;
use anyhow::{Context, Result};
use minijinja::{context, Environment};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use tracing::info;

const REPORT_TEMPLATE: &str = include_str!("templates/radar_report.html");

/// Pixel layout of the radar drawing
#[derive(Debug, Clone, Copy)]
pub struct RadarLayout {
    pub center_x: f64,
    pub center_y: f64,
    /// Pixel radius of the 1.0 ring
    pub radius: f64,
}

impl Default for RadarLayout {
    fn default() -> Self {
        Self {
            center_x: 340.0,
            center_y: 290.0,
            radius: 200.0,
        }
    }
}

impl RadarLayout {
    /// SVG coordinates of a polar point (SVG y grows downwards)
    pub fn project(&self, point: PolarPoint) -> (f64, f64) {
        let (x, y) = point.to_cartesian();
        (self.center_x + x * self.radius, self.center_y - y * self.radius)
    }

    fn points_attr(&self, points: &[PolarPoint]) -> String {
        points
            .iter()
            .map(|&p| {
                let (x, y) = self.project(p);
                format!("{:.1},{:.1}", x, y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Serialize)]
struct SvgLabel {
    x: f64,
    y: f64,
    text: String,
    anchor: &'static str,
}

#[derive(Debug, Serialize)]
struct TableRow {
    label: String,
    actual: String,
    reference: String,
    critical: bool,
}

#[derive(Debug, Serialize)]
struct CriticalRow {
    label: String,
    actual: String,
    reference: String,
    gap: String,
}

fn text_anchor(angle: f64) -> &'static str {
    let c = angle.cos();
    if c > 0.1 {
        "start"
    } else if c < -0.1 {
        "end"
    } else {
        "middle"
    }
}

/// Panel rows with the gap in the indicator's own unit
fn critical_rows(critical: &[CriticalIndicator]) -> Vec<CriticalRow> {
    critical
        .iter()
        .map(|c| CriticalRow {
            label: c.label.clone(),
            actual: c.kind.format_value(c.actual),
            reference: c.kind.format_value(c.reference),
            gap: c.kind.format_value(c.gap),
        })
        .collect()
}

fn markers(layout: &RadarLayout, chart: &RadarChart, actual: bool) -> Vec<SvgLabel> {
    chart
        .axes
        .iter()
        .map(|axis| {
            let (radius, value) = if actual {
                (axis.actual_normalized, axis.actual)
            } else {
                (axis.reference_normalized, axis.reference)
            };
            let (x, y) = layout.project(PolarPoint {
                angle: axis.angle,
                radius,
            });
            SvgLabel {
                x,
                y,
                text: axis.kind.format_value(value),
                anchor: text_anchor(axis.angle),
            }
        })
        .collect()
}

/// Render the HTML report for one run
pub fn render_report(results: &RunResults, chart_config: &ChartConfig) -> KpiResult<String> {
    let layout = RadarLayout::default();
    let chart = RadarChart::from_config(&results.kpis, chart_config);
    let critical = chart.critical_indicators(chart_config.critical_gap);
    let angles = axis_angles(KpiKind::ALL.len());

    let rings: Vec<String> = [0.2, 0.4, 0.6, 0.8, 1.0]
        .iter()
        .map(|&level| {
            let ring: Vec<PolarPoint> = angles
                .iter()
                .map(|&angle| PolarPoint { angle, radius: level })
                .collect();
            layout.points_attr(&ring)
        })
        .collect();

    let spokes: Vec<SvgLabel> = chart
        .axes
        .iter()
        .map(|axis| {
            let (x, y) = layout.project(PolarPoint {
                angle: axis.angle,
                radius: 1.0,
            });
            SvgLabel {
                x,
                y,
                text: String::new(),
                anchor: "middle",
            }
        })
        .collect();

    let axis_labels: Vec<SvgLabel> = chart
        .axes
        .iter()
        .map(|axis| {
            let (x, y) = layout.project(PolarPoint {
                angle: axis.angle,
                radius: 1.18,
            });
            SvgLabel {
                x,
                y,
                text: axis.label.clone(),
                anchor: text_anchor(axis.angle),
            }
        })
        .collect();

    let rows: Vec<TableRow> = chart
        .axes
        .iter()
        .map(|axis| TableRow {
            label: axis.label.clone(),
            actual: axis.kind.format_value(axis.actual),
            reference: axis.kind.format_value(axis.reference),
            critical: critical.iter().any(|c| c.kind == axis.kind),
        })
        .collect();

    let mut env = Environment::new();
    env.add_template("radar_report.html", REPORT_TEMPLATE)?;
    let template = env.get_template("radar_report.html")?;

    let html = template.render(context! {
        generated_at => results.generated_at.format("%d/%m/%Y %H:%M UTC").to_string(),
        profile => &results.profile,
        seed => results.seed,
        center_x => layout.center_x,
        center_y => layout.center_y,
        rings => rings,
        spokes => spokes,
        axis_labels => axis_labels,
        actual_points => layout.points_attr(&chart.actual_polygon()),
        reference_points => layout.points_attr(&chart.reference_polygon()),
        actual_markers => markers(&layout, &chart, true),
        reference_markers => markers(&layout, &chart, false),
        rows => rows,
        show_panel => chart_config.show_panel,
        critical_gap => chart_config.critical_gap,
        critical => critical_rows(&critical),
        recommendations => &chart_config.recommendations,
    })?;

    Ok(html)
}

/// Generate the HTML report and write it to disk
pub fn generate_report(
    results: &RunResults,
    chart_config: &ChartConfig,
    output_path: &str,
) -> Result<String> {
    // Ensure output directory exists
    if let Some(parent) = std::path::Path::new(output_path).parent() {
        fs::create_dir_all(parent)?;
    }

    let html = render_report(results, chart_config)
        .context("Failed to render report")?;

    let mut file = File::create(output_path)
        .context("Failed to create report file")?;
    file.write_all(html.as_bytes())
        .context("Failed to write report file")?;

    info!("Report generated: {}", output_path);
    Ok(output_path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KpiConfig, ReferenceBenchmarks};
    use crate::simulation::Orchestrator;

    fn results() -> RunResults {
        Orchestrator::new(KpiConfig::deterministic())
            .unwrap()
            .run()
            .unwrap()
    }

    #[test]
    fn test_project_first_axis_points_right() {
        let layout = RadarLayout::default();
        let (x, y) = layout.project(PolarPoint {
            angle: 0.0,
            radius: 1.0,
        });

        assert!((x - (layout.center_x + layout.radius)).abs() < 1e-9);
        assert!((y - layout.center_y).abs() < 1e-9);
    }

    #[test]
    fn test_report_contains_chart_and_labels() {
        let html = render_report(&results(), &ChartConfig::default()).unwrap();

        assert!(html.contains("<svg"));
        assert!(html.contains("polygon"));
        for kind in KpiKind::ALL {
            assert!(html.contains(kind.label()));
        }
    }

    #[test]
    fn test_panel_lists_critical_and_recommendations() {
        let chart = ChartConfig {
            references: ReferenceBenchmarks {
                on_time_delivery_rate: 200.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let html = render_report(&results(), &chart).unwrap();

        assert!(html.contains("Critical indicators"));
        for rec in &chart.recommendations {
            assert!(html.contains(rec.as_str()));
        }
    }

    #[test]
    fn test_critical_gap_in_kpi_unit() {
        let critical = vec![
            CriticalIndicator {
                kind: KpiKind::TransportCostPerTon,
                label: KpiKind::TransportCostPerTon.label().to_string(),
                actual: 42.0,
                reference: 50.0,
                gap: -8.0,
            },
            CriticalIndicator {
                kind: KpiKind::InventoryTurnover,
                label: KpiKind::InventoryTurnover.label().to_string(),
                actual: 3.0,
                reference: 3.5,
                gap: -0.5,
            },
        ];
        let rows = critical_rows(&critical);

        assert_eq!(rows[0].gap, "-8.00 €/t");
        assert_eq!(rows[1].gap, "-0.50");
        assert_eq!(rows[1].reference, "3.50");
    }

    #[test]
    fn test_panel_gap_not_labelled_as_points() {
        let chart = ChartConfig {
            references: ReferenceBenchmarks {
                on_time_delivery_rate: 200.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let html = render_report(&results(), &chart).unwrap();

        assert!(html.contains("(gap "));
        assert!(!html.contains("points)"));
    }

    #[test]
    fn test_panel_can_be_hidden() {
        let chart = ChartConfig {
            show_panel: false,
            ..Default::default()
        };
        let html = render_report(&results(), &chart).unwrap();

        assert!(!html.contains("Recommendations"));
    }

    #[test]
    fn test_generate_report_writes_file() {
        let dir = std::env::temp_dir()
            .join(format!("logistics_kpi_report_{}", std::process::id()));
        let path = dir.join("reports/radar.html").to_string_lossy().to_string();

        let written = generate_report(&results(), &ChartConfig::default(), &path).unwrap();
        assert!(fs::read_to_string(&written).unwrap().contains("<html"));

        fs::remove_dir_all(&dir).ok();
    }
}
