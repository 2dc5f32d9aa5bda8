//! Logistics KPI CLI
//!
//! Command-line interface for the synthetic logistics KPI generator.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use logistics_kpi::{
    analytics::{
        console::print_report,
        kpi::KpiKind,
        logger::RunLogger,
        metrics::MetricsCalculator,
        report::generate_report,
    },
    config::{KpiConfig, SampleProfile},
    simulation::Orchestrator,
};

#[derive(Parser)]
#[command(name = "logistics-kpi")]
#[command(version = "0.1.0")]
#[command(about = "Synthetic logistics KPI generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProfileArg {
    /// Every quantity drawn from its own range
    Classic,
    /// Counts derived from sampled rates
    Derived,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one sample and print its KPIs
    Run {
        /// Seed for a reproducible sample
        #[arg(short, long)]
        seed: Option<u64>,

        /// Generator ranges to draw from
        #[arg(short, long, value_enum)]
        profile: Option<ProfileArg>,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for results
        #[arg(short, long)]
        output: Option<String>,

        /// Save the run as JSON and text under the output directory
        #[arg(long)]
        save: bool,

        /// Render the HTML radar report
        #[arg(long)]
        chart: bool,

        /// Leave the critical indicators panel out of the report
        #[arg(long)]
        no_panel: bool,
    },

    /// Generate many samples and print KPI statistics
    Batch {
        /// Number of samples to draw
        #[arg(short, long, default_value = "100")]
        runs: u32,

        /// Seed for a reproducible batch
        #[arg(short, long)]
        seed: Option<u64>,

        /// Generator ranges to draw from
        #[arg(short, long, value_enum)]
        profile: Option<ProfileArg>,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Render the radar report from a saved run
    Report {
        /// Input JSON file with run results
        #[arg(short, long)]
        input: PathBuf,

        /// Output HTML file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON configuration file for references and scaling
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print KPI definitions and chart settings
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match cli.command {
        None => {
            run_once(KpiConfig::default(), false, false)?;
        }

        Some(Commands::Run {
            seed,
            profile,
            config,
            output,
            save,
            chart,
            no_panel,
        }) => {
            let mut config = load_config(config.as_deref(), profile, seed)?;
            if let Some(output) = output {
                config.output_dir = output;
            }
            if no_panel {
                config.chart.show_panel = false;
            }
            run_once(config, save, chart)?;
        }

        Some(Commands::Batch {
            runs,
            seed,
            profile,
            config,
        }) => {
            let config = load_config(config.as_deref(), profile, seed)?;
            run_batch(config, runs)?;
        }

        Some(Commands::Report {
            input,
            output,
            config,
        }) => {
            let config = load_config(config.as_deref(), None, None)?;
            generate_report_from_file(&input, output.as_deref(), &config)?;
        }

        Some(Commands::Info) => {
            print_info(&KpiConfig::default());
        }
    }

    Ok(())
}

fn load_config(
    path: Option<&Path>,
    profile: Option<ProfileArg>,
    seed: Option<u64>,
) -> Result<KpiConfig> {
    let config = match path {
        Some(path) => KpiConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => KpiConfig::default(),
    };

    let profile = profile.map(|p| match p {
        ProfileArg::Classic => KpiConfig::classic().profile,
        ProfileArg::Derived => KpiConfig::derived().profile,
    });

    Ok(config.with_overrides(profile, seed))
}

fn run_once(config: KpiConfig, save: bool, chart: bool) -> Result<()> {
    info!("Profile: {}", config.profile.name());
    if let Some(seed) = config.seed {
        info!("Seed: {}", seed);
    }

    let output_dir = config.output_dir.clone();
    let chart_config = config.chart.clone();

    let mut orchestrator = Orchestrator::new(config)?;
    let results = orchestrator.run()?;

    print_report(&results.sample, &results.kpis, results.generated_at);

    let logger = RunLogger::new(&output_dir);

    if save {
        let json_path = logger.save_results(&results)?;
        logger.save_summary(&results)?;

        println!();
        println!("📁 Results saved to: {}", json_path);
    }

    if chart {
        let report_path = generate_report(&results, &chart_config, &logger.report_path())?;

        println!();
        println!("📊 Report generated: {}", report_path);
        println!("   Open in browser to view the radar chart");
    }

    Ok(())
}

fn run_batch(config: KpiConfig, runs: u32) -> Result<()> {
    let mut orchestrator = Orchestrator::new(config)?;
    let batch = orchestrator.run_batch(runs)?;

    println!();
    println!("{:=^78}", format!(" KPI STATISTICS ({} runs) ", batch.runs.len()));
    print!("{}", MetricsCalculator::format_table(&batch.statistics));
    println!();

    Ok(())
}

fn generate_report_from_file(
    input: &Path,
    output: Option<&Path>,
    config: &KpiConfig,
) -> Result<()> {
    info!("Loading results from: {:?}", input);

    let results = RunLogger::load_results(&input.to_string_lossy())?;

    let output_path = output
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| RunLogger::new(&config.output_dir).report_path());

    generate_report(&results, &config.chart, &output_path)?;

    println!("📊 Report generated: {}", output_path);

    Ok(())
}

fn print_info(config: &KpiConfig) {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║       Logistics KPI Generator - Info                     ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();
    println!("INDICATORS:                     REFERENCE");
    for kind in KpiKind::ALL {
        println!(
            "  • {:<28} {:>12}",
            kind.label(),
            kind.format_value(config.chart.references.value(kind))
        );
    }
    println!();
    println!("PROFILES:");
    for profile in [KpiConfig::classic().profile, KpiConfig::derived().profile] {
        let description = match profile {
            SampleProfile::Classic(_) => "every quantity drawn from its own range",
            SampleProfile::Derived(_) => "counts derived from sampled rates",
        };
        println!("  • {:<10} {}", profile.name(), description);
    }
    println!();
    let s = &config.chart.scaling;
    println!("RADAR SCALING:");
    println!("  percentages          value / {}", s.percent_divisor);
    println!("  inventory turnover   value / {}", s.turnover_divisor);
    println!(
        "  transport cost       1 - (value - {}) / {}",
        s.transport_cost_floor, s.transport_cost_span
    );
    println!("  gross margin         value / {}", s.margin_divisor);
    println!(
        "  critical when        actual - reference < -{}",
        config.chart.critical_gap
    );
    println!();
    println!("USAGE:");
    println!("  logistics-kpi                        # Print one random report");
    println!("  logistics-kpi run --seed 42 --chart  # Reproducible run with radar report");
    println!("  logistics-kpi batch --runs 1000      # KPI statistics over many samples");
    println!("  logistics-kpi report -i run.json     # Re-render a saved run");
    println!();
}
