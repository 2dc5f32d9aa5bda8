//! KPI calculation, console output, radar charts and reports

pub mod console;
pub mod kpi;
pub mod logger;
pub mod metrics;
pub mod radar;
pub mod report;

pub use console::{format_report, print_report};
pub use kpi::{KpiCalculator, KpiKind, KpiSet};
pub use logger::RunLogger;
pub use metrics::MetricsCalculator;
pub use radar::RadarChart;
pub use report::generate_report;
