//! Entry points of the generation and aggregation pipeline.

use std::path::Path;

use super::errors::PipelineError;
use super::execution::config::GenerationConfig;
use super::metrics::{DashboardSummary, MetricsAggregator};
use super::snapshot::{Snapshot, SnapshotFiles};

/// Generate a fresh snapshot for the given counts and seed
pub fn generate(config: &GenerationConfig) -> Result<Snapshot, PipelineError> {
    Snapshot::generate(config)
}

/// Generate a snapshot and write both tables to `config.data_dir`
pub fn generate_to_disk(config: &GenerationConfig) -> Result<(Snapshot, SnapshotFiles), PipelineError> {
    let snapshot = Snapshot::generate(config)?;
    let files = snapshot.write_to(&config.data_dir)?;
    Ok((snapshot, files))
}

/// Compute every dashboard rollup of a snapshot
pub fn summarize(snapshot: &Snapshot) -> DashboardSummary {
    MetricsAggregator::summarize(snapshot)
}

/// Load the tables from `data_dir` and summarize them
///
/// Fails with `MissingInput` before any aggregation when a table is absent.
pub fn summarize_dir(data_dir: &Path) -> Result<DashboardSummary, PipelineError> {
    let snapshot = Snapshot::load_from(data_dir)?;
    Ok(summarize(&snapshot))
}
