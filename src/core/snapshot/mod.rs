//! Immutable snapshots of the two generated tables.

pub mod store;
pub mod table;

use chrono::NaiveDate;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::errors::PipelineError;
use crate::core::execution::config::GenerationConfig;
use crate::core::generation::{
    ResourceGenerator, ShipmentGenerator, RESOURCE_STREAM, SHIPMENT_STREAM,
};
use crate::core::random::RandomSource;
use crate::core::records::{Resource, Shipment, RESOURCE_COLUMNS, SHIPMENT_COLUMNS};

pub use store::{SnapshotKey, SnapshotStore, StoreState};

pub const RESOURCES_FILE: &str = "resources.csv";
pub const SHIPMENTS_FILE: &str = "delays.csv";

/// One generation run's output
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub resources: Vec<Resource>,
    pub shipments: Vec<Shipment>,
}

impl Snapshot {
    /// Generate both tables from a validated configuration
    pub fn generate(config: &GenerationConfig) -> Result<Self, PipelineError> {
        Self::generate_on(config, config.resolved_reference_date())
    }

    /// Generate both tables treating `reference_date` as "now".
    ///
    /// Overrides `config.reference_date`; callers that resolve "today" once
    /// pass it here so every consumer sees the same date.
    pub fn generate_on(
        config: &GenerationConfig,
        reference_date: NaiveDate,
    ) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::InvalidConfig)?;
        GenerationConfig::validate_reference_date(reference_date)
            .map_err(PipelineError::InvalidConfig)?;
        let delay_coin = config.delay_coin().map_err(PipelineError::InvalidConfig)?;
        Ok(Self::generate_at(config, reference_date, delay_coin))
    }

    fn generate_at(
        config: &GenerationConfig,
        reference_date: NaiveDate,
        delay_coin: rand_distr::Bernoulli,
    ) -> Self {
        let root = RandomSource::new(config.random_seed);
        let resources = ResourceGenerator::new(root.fork(RESOURCE_STREAM), reference_date)
            .generate(config.num_resources);
        let shipments =
            ShipmentGenerator::new(root.fork(SHIPMENT_STREAM), reference_date, delay_coin)
                .generate(config.num_shipments);

        info!(
            "Generated snapshot: {} resources, {} shipments (seed {}, reference date {})",
            resources.len(),
            shipments.len(),
            config.random_seed,
            reference_date
        );
        Self {
            resources,
            shipments,
        }
    }

    /// Resources table as CSV bytes
    pub fn resources_csv(&self) -> Result<Vec<u8>, PipelineError> {
        table::encode_rows(&RESOURCE_COLUMNS, &self.resources)
    }

    /// Shipments table as CSV bytes
    pub fn shipments_csv(&self) -> Result<Vec<u8>, PipelineError> {
        table::encode_rows(&SHIPMENT_COLUMNS, &self.shipments)
    }

    /// Write both tables into `data_dir`, creating it if needed
    pub fn write_to(&self, data_dir: &Path) -> Result<SnapshotFiles, PipelineError> {
        fs::create_dir_all(data_dir)?;
        let files = SnapshotFiles::in_dir(data_dir);
        table::write_table(&files.resources, &RESOURCE_COLUMNS, &self.resources)?;
        table::write_table(&files.shipments, &SHIPMENT_COLUMNS, &self.shipments)?;
        Ok(files)
    }

    /// Load both tables from `data_dir`.
    ///
    /// Both files are checked before either is parsed, so a missing table
    /// never yields a half-loaded snapshot.
    pub fn load_from(data_dir: &Path) -> Result<Self, PipelineError> {
        let files = SnapshotFiles::in_dir(data_dir);
        for path in [&files.resources, &files.shipments] {
            if !path.is_file() {
                return Err(PipelineError::MissingInput(path.clone()));
            }
        }

        Ok(Self {
            resources: table::read_table(&files.resources, &RESOURCE_COLUMNS)?,
            shipments: table::read_table(&files.shipments, &SHIPMENT_COLUMNS)?,
        })
    }
}

/// Locations of the two table files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFiles {
    pub resources: PathBuf,
    pub shipments: PathBuf,
}

impl SnapshotFiles {
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            resources: data_dir.join(RESOURCES_FILE),
            shipments: data_dir.join(SHIPMENTS_FILE),
        }
    }
}
