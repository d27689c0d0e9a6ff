//! Row types of the two snapshot tables.
//!
//! Field order and serde names define the column order and headers of the
//! tabular contract, so they must not be reordered.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{
    delay_reason_label, DelayReason, Department, Destination, Origin, Project, ResourceStatus, Role,
    ShipmentStatus,
};
use super::types::{ResourceId, ShipmentId};

/// Column headers of the resources table
pub const RESOURCE_COLUMNS: [&str; 9] = [
    "Resource ID",
    "Name",
    "Role",
    "Department",
    "Project",
    "Start Date",
    "End Date",
    "Utilization (%)",
    "Status",
];

/// Column headers of the shipments table
pub const SHIPMENT_COLUMNS: [&str; 9] = [
    "Shipment ID",
    "Origin",
    "Destination",
    "Expected Arrival",
    "Actual Arrival",
    "Status",
    "Delay Days",
    "Risk Score",
    "Primary Delay Reason",
];

/// One staffing assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "Resource ID")]
    pub resource_id: ResourceId,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Role")]
    pub role: Role,
    #[serde(rename = "Department")]
    pub department: Department,
    #[serde(rename = "Project")]
    pub project: Project,
    #[serde(rename = "Start Date")]
    pub start_date: NaiveDate,
    #[serde(rename = "End Date")]
    pub end_date: NaiveDate,
    /// Values above 100 mean the resource is over-allocated
    #[serde(rename = "Utilization (%)")]
    pub utilization_pct: u8,
    #[serde(rename = "Status")]
    pub status: ResourceStatus,
}

impl Resource {
    /// Length of the assignment in days
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    pub fn is_over_allocated(&self) -> bool {
        self.utilization_pct > 100
    }
}

/// One logistics movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    #[serde(rename = "Shipment ID")]
    pub shipment_id: ShipmentId,
    #[serde(rename = "Origin")]
    pub origin: Origin,
    #[serde(rename = "Destination")]
    pub destination: Destination,
    #[serde(rename = "Expected Arrival")]
    pub expected_arrival: NaiveDate,
    /// Absent while the shipment has not arrived
    #[serde(rename = "Actual Arrival")]
    pub actual_arrival: Option<NaiveDate>,
    #[serde(rename = "Status")]
    pub status: ShipmentStatus,
    #[serde(rename = "Delay Days")]
    pub delay_days: i64,
    #[serde(rename = "Risk Score")]
    pub risk_score: u8,
    #[serde(rename = "Primary Delay Reason", with = "delay_reason_label")]
    pub primary_delay_reason: Option<DelayReason>,
}

impl Shipment {
    /// Days between expected and actual arrival, 0 while not arrived
    pub fn observed_delay(expected_arrival: NaiveDate, actual_arrival: Option<NaiveDate>) -> i64 {
        actual_arrival
            .map(|actual| (actual - expected_arrival).num_days())
            .unwrap_or(0)
    }

    pub fn has_arrived(&self) -> bool {
        self.actual_arrival.is_some()
    }
}
