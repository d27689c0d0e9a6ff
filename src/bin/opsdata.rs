use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

use opsdata::core::metrics::{DashboardSummary, ResourceSummary, ShipmentSummary};
use opsdata::{generate_to_disk, summarize_dir, GenerationConfig, PipelineError};

/// Generate and summarize the synthetic operations datasets
#[derive(Debug, Parser)]
#[command(name = "opsdata", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write resources.csv and delays.csv
    Generate {
        /// Number of staffing assignments
        #[arg(long, default_value_t = 50)]
        resources: usize,
        /// Number of shipments
        #[arg(long, default_value_t = 200)]
        shipments: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Date treated as "now" (YYYY-MM-DD), defaults to today
        #[arg(long)]
        reference_date: Option<NaiveDate>,
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
    /// Load the tables and log the dashboard summary
    Summary {
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Generate {
            resources,
            shipments,
            seed,
            reference_date,
            data_dir,
        } => {
            let mut config = GenerationConfig::new()
                .with_resources(resources)
                .with_shipments(shipments)
                .with_random_seed(seed)
                .with_data_dir(data_dir);
            if let Some(date) = reference_date {
                config = config.with_reference_date(date);
            }
            run_generate(&config)
        }
        Command::Summary { data_dir } => run_summary(&data_dir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", failure_message(&err));
            ExitCode::FAILURE
        }
    }
}

/// What the user is told when a command fails
fn failure_message(err: &PipelineError) -> String {
    match err {
        PipelineError::MissingInput(path) => format!(
            "Data files not found ({}). Please run 'opsdata generate' first.",
            path.display()
        ),
        other => other.to_string(),
    }
}

fn run_generate(config: &GenerationConfig) -> Result<(), PipelineError> {
    info!("Generating data...");
    generate_to_disk(config)?;
    info!("Data generation complete.");
    Ok(())
}

fn run_summary(data_dir: &std::path::Path) -> Result<(), PipelineError> {
    let summary = summarize_dir(data_dir)?;
    report(&summary);
    Ok(())
}

fn no_data(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{:.*}", precision, v))
        .unwrap_or_else(|| "no data".to_string())
}

fn report(summary: &DashboardSummary) {
    report_resources(&summary.resources);
    report_shipments(&summary.shipments);
}

fn report_resources(summary: &ResourceSummary) {
    info!("=== RESOURCE ALLOCATION ===");
    info!("  Total consultants: {}", summary.total);
    info!(
        "  Active now: {} ({})",
        summary.active,
        no_data(summary.active_share.map(|s| s * 100.0), 0)
    );
    info!("  Avg utilization: {}", no_data(summary.avg_utilization, 1));
    info!("  Over-allocated (>100%): {}", summary.over_allocated);
    for department in &summary.utilization_by_department {
        info!(
            "  {:<12} {:.1}% ({} resources)",
            department.department.as_str(),
            department.avg_utilization,
            department.resources
        );
    }
}

fn report_shipments(summary: &ShipmentSummary) {
    info!("=== DELAY ANTICIPATION ===");
    info!("  Total shipments: {}", summary.total);
    info!("  On-time rate: {}", no_data(summary.on_time_rate, 1));
    info!("  Avg delay (days): {}", no_data(summary.avg_delay_days, 1));
    info!("  High risk shipments: {}", summary.high_risk);
    for reason in &summary.delay_reasons {
        let label = reason
            .reason
            .map(|r| r.as_str())
            .unwrap_or(opsdata::core::domain::NO_DELAY_REASON);
        info!("  {:<20} {}", label, reason.count);
    }
    info!("  Shipments under risk review: {}", summary.risk_review.len());
    for row in summary.risk_review.iter().take(10) {
        info!(
            "    {} {} -> {} expected {} [{}] score {}",
            row.shipment_id,
            row.origin,
            row.destination,
            row.expected_arrival,
            row.status,
            row.risk_score
        );
    }
}
