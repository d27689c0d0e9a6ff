pub mod core;
pub mod macros;

// Re-export commonly used types
pub use crate::core::errors::PipelineError;
pub use crate::core::execution::config::GenerationConfig;
pub use crate::core::metrics::{DashboardSummary, MetricsAggregator};
pub use crate::core::pipeline::{generate, generate_to_disk, summarize, summarize_dir};
pub use crate::core::records::{Resource, Shipment};
pub use crate::core::snapshot::{Snapshot, SnapshotStore};
