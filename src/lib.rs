//! Logistics KPI Generator
//!
//! Draws synthetic logistics quantities, derives six KPIs from them and
//! renders the results as a console report or a radar chart.

pub mod analytics;
pub mod config;
pub mod errors;
pub mod simulation;

pub use analytics::report::generate_report;
pub use config::KpiConfig;
pub use errors::{KpiError, KpiResult};
pub use simulation::orchestrator::Orchestrator;
