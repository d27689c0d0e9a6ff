//! Synthetic dataset generation.

pub mod resources;
pub mod risk;
pub mod shipments;

pub use resources::ResourceGenerator;
pub use risk::{RiskAssessment, RiskBucket, RiskClassifier};
pub use shipments::{ShipmentDraw, ShipmentGenerator};

/// Stream offsets used to fork one random stream per dataset
pub const RESOURCE_STREAM: u64 = 1;
pub const SHIPMENT_STREAM: u64 = 2;
