//! Console report for a single run

use crate::analytics::kpi::KpiSet;
use crate::simulation::sample::Sample;
use chrono::{DateTime, Local, Utc};

/// Total width of the report banners
pub const REPORT_WIDTH: usize = 60;
/// Width of the KPI label column
pub const LABEL_WIDTH: usize = 28;
/// Width of the right-aligned value column
pub const VALUE_WIDTH: usize = 12;

/// One KPI row of the report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub label: &'static str,
    /// Value with precision and unit applied
    pub display: String,
}

/// Rows in fixed display order
pub fn report_lines(kpis: &KpiSet) -> Vec<ReportLine> {
    kpis.iter()
        .map(|(kind, value)| ReportLine {
            label: kind.label(),
            display: kind.format_value(value),
        })
        .collect()
}

/// Format the full text report, dated in local time
pub fn format_report(sample: &Sample, kpis: &KpiSet, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str(&format!("{:=^width$}\n", " LOGISTICS KPI ", width = REPORT_WIDTH));
    out.push_str(&format!(
        "Analysis date: {}\n\n",
        generated_at.with_timezone(&Local).format("%d/%m/%Y %H:%M")
    ));

    out.push_str("Key indicators:\n");
    for line in report_lines(kpis) {
        out.push_str(&format!(
            "- {:<lw$}: {:>vw$}\n",
            line.label,
            line.display,
            lw = LABEL_WIDTH,
            vw = VALUE_WIDTH
        ));
    }

    out.push('\n');
    out.push_str(&format!(
        "{:-^width$}\n",
        " Calculation details ",
        width = REPORT_WIDTH
    ));
    out.push_str(&format!("Total orders: {}\n", sample.orders));
    out.push_str(&format!("Orders delivered on time: {}\n", sample.orders_on_time));
    out.push_str(&format!("Perfect orders: {}\n", sample.perfect_orders));
    out.push_str(&format!(
        "Supplier reliability: {}/{} on-time deliveries\n",
        sample.supplier_on_time_count(),
        sample.supplier_deliveries()
    ));

    out
}

/// Print the report to stdout
pub fn print_report(sample: &Sample, kpis: &KpiSet, generated_at: DateTime<Utc>) {
    print!("{}", format_report(sample, kpis, generated_at));
}
