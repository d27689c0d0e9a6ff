//! Dashboard rollups over the snapshot tables.
//!
//! Every aggregate is a pure function of its input slice. Averages over an
//! empty subset come back as `None` ("no data") instead of dividing by zero.

use chrono::NaiveDate;
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeMap;

use super::domain::{
    delay_reason_label, DelayReason, Department, Destination, Origin, ResourceStatus,
    ShipmentStatus,
};
use super::generation::RiskClassifier;
use super::records::{Resource, Shipment};
use super::snapshot::Snapshot;
use super::types::ShipmentId;

/// Shipments scoring above this are counted as high risk
pub const HIGH_RISK_THRESHOLD: u8 = RiskClassifier::HIGH_RISK_THRESHOLD;
/// Shipments scoring above this are listed for risk review
pub const REVIEW_THRESHOLD: u8 = RiskClassifier::REVIEW_THRESHOLD;

/// Mean utilization of one department
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentUtilization {
    pub department: Department,
    pub avg_utilization: f64,
    pub resources: usize,
}

/// Rollup of the resources table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceSummary {
    pub total: usize,
    pub active: usize,
    /// `active / total`, `None` when there are no resources
    pub active_share: Option<f64>,
    pub avg_utilization: Option<f64>,
    pub over_allocated: usize,
    /// Only departments present in the table, in declaration order
    pub utilization_by_department: Vec<DepartmentUtilization>,
}

/// Occurrences of one delay reason among delayed shipments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasonCount {
    #[serde(with = "delay_reason_label")]
    pub reason: Option<DelayReason>,
    pub count: usize,
}

/// Projection of a shipment shown in the risk review table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskReviewRow {
    #[serde(rename = "Shipment ID")]
    pub shipment_id: ShipmentId,
    #[serde(rename = "Origin")]
    pub origin: Origin,
    #[serde(rename = "Destination")]
    pub destination: Destination,
    #[serde(rename = "Expected Arrival")]
    pub expected_arrival: NaiveDate,
    #[serde(rename = "Status")]
    pub status: ShipmentStatus,
    #[serde(rename = "Risk Score")]
    pub risk_score: u8,
    #[serde(rename = "Primary Delay Reason", with = "delay_reason_label")]
    pub primary_delay_reason: Option<DelayReason>,
}

impl From<&Shipment> for RiskReviewRow {
    fn from(shipment: &Shipment) -> Self {
        Self {
            shipment_id: shipment.shipment_id.clone(),
            origin: shipment.origin,
            destination: shipment.destination,
            expected_arrival: shipment.expected_arrival,
            status: shipment.status,
            risk_score: shipment.risk_score,
            primary_delay_reason: shipment.primary_delay_reason,
        }
    }
}

/// A shipment that has arrived, plotted expected vs actual
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelinePoint {
    pub shipment_id: ShipmentId,
    pub origin: Origin,
    pub status: ShipmentStatus,
    pub expected_arrival: NaiveDate,
    pub actual_arrival: NaiveDate,
}

/// Extent of the completed-shipment timeline, for the reference line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineBounds {
    pub expected_min: NaiveDate,
    pub expected_max: NaiveDate,
    pub actual_min: NaiveDate,
    pub actual_max: NaiveDate,
}

/// Rollup of the shipments table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipmentSummary {
    pub total: usize,
    /// Percentage of `On Time` and `Scheduled` shipments
    pub on_time_rate: Option<f64>,
    /// Mean over shipments with a positive delay
    pub avg_delay_days: Option<f64>,
    pub high_risk: usize,
    /// Reasons among `Delayed` shipments, most frequent first
    pub delay_reasons: Vec<ReasonCount>,
    /// Shipments above the review threshold, highest score first
    pub risk_review: Vec<RiskReviewRow>,
    pub timeline: Vec<TimelinePoint>,
    pub timeline_bounds: Option<TimelineBounds>,
}

/// Both rollups of one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub resources: ResourceSummary,
    pub shipments: ShipmentSummary,
}

/// Computes the dashboard rollups
pub struct MetricsAggregator;

impl MetricsAggregator {
    pub fn summarize(snapshot: &Snapshot) -> DashboardSummary {
        DashboardSummary {
            resources: Self::summarize_resources(&snapshot.resources),
            shipments: Self::summarize_shipments(&snapshot.shipments),
        }
    }

    pub fn summarize_resources(resources: &[Resource]) -> ResourceSummary {
        let total = resources.len();
        let active = resources
            .iter()
            .filter(|r| r.status == ResourceStatus::Active)
            .count();
        let avg_utilization = mean(resources.iter().map(|r| f64::from(r.utilization_pct)));
        if avg_utilization.is_none() {
            warn!("[MetricsAggregator] No resources, average utilization has no data");
        }

        let mut by_department: BTreeMap<Department, (u64, usize)> = BTreeMap::new();
        for resource in resources {
            let entry = by_department.entry(resource.department).or_insert((0, 0));
            entry.0 += u64::from(resource.utilization_pct);
            entry.1 += 1;
        }
        let utilization_by_department = by_department
            .into_iter()
            .map(|(department, (sum, count))| DepartmentUtilization {
                department,
                avg_utilization: sum as f64 / count as f64,
                resources: count,
            })
            .collect();

        debug!(
            "[MetricsAggregator] Summarized {} resources ({} active)",
            total, active
        );

        ResourceSummary {
            total,
            active,
            active_share: ratio(active, total),
            avg_utilization,
            over_allocated: resources.iter().filter(|r| r.is_over_allocated()).count(),
            utilization_by_department,
        }
    }

    pub fn summarize_shipments(shipments: &[Shipment]) -> ShipmentSummary {
        let total = shipments.len();
        let on_time = shipments
            .iter()
            .filter(|s| RiskClassifier::counts_as_on_time(s.status))
            .count();
        let avg_delay_days = mean(
            shipments
                .iter()
                .filter(|s| s.delay_days > 0)
                .map(|s| s.delay_days as f64),
        );
        if avg_delay_days.is_none() {
            warn!("[MetricsAggregator] No delayed arrivals, average delay has no data");
        }

        let timeline: Vec<TimelinePoint> = shipments
            .iter()
            .filter_map(|s| {
                s.actual_arrival.map(|actual_arrival| TimelinePoint {
                    shipment_id: s.shipment_id.clone(),
                    origin: s.origin,
                    status: s.status,
                    expected_arrival: s.expected_arrival,
                    actual_arrival,
                })
            })
            .collect();

        debug!(
            "[MetricsAggregator] Summarized {} shipments ({} on time, {} arrived)",
            total,
            on_time,
            timeline.len()
        );

        ShipmentSummary {
            total,
            on_time_rate: ratio(on_time, total).map(|r| r * 100.0),
            avg_delay_days,
            high_risk: shipments
                .iter()
                .filter(|s| RiskClassifier::is_high_risk(s.risk_score))
                .count(),
            delay_reasons: Self::delay_reasons(shipments),
            risk_review: Self::risk_review(shipments),
            timeline_bounds: timeline_bounds(&timeline),
            timeline,
        }
    }

    /// Frequency of delay reasons among `Delayed` shipments
    pub fn delay_reasons(shipments: &[Shipment]) -> Vec<ReasonCount> {
        let mut counts: BTreeMap<Option<DelayReason>, usize> = BTreeMap::new();
        for shipment in shipments
            .iter()
            .filter(|s| s.status == ShipmentStatus::Delayed)
        {
            *counts.entry(shipment.primary_delay_reason).or_insert(0) += 1;
        }

        let mut reasons: Vec<ReasonCount> = counts
            .into_iter()
            .map(|(reason, count)| ReasonCount { reason, count })
            .collect();
        reasons.sort_by(|a, b| b.count.cmp(&a.count));
        reasons
    }

    /// Shipments above the review threshold, highest score first.
    ///
    /// The sort is stable, so equal scores keep their table order.
    pub fn risk_review(shipments: &[Shipment]) -> Vec<RiskReviewRow> {
        let mut rows: Vec<RiskReviewRow> = shipments
            .iter()
            .filter(|s| RiskClassifier::needs_review(s.risk_score))
            .map(RiskReviewRow::from)
            .collect();
        rows.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
        rows
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

fn ratio(part: usize, total: usize) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(part as f64 / total as f64)
    }
}

fn timeline_bounds(points: &[TimelinePoint]) -> Option<TimelineBounds> {
    let first = points.first()?;
    let mut bounds = TimelineBounds {
        expected_min: first.expected_arrival,
        expected_max: first.expected_arrival,
        actual_min: first.actual_arrival,
        actual_max: first.actual_arrival,
    };
    for point in &points[1..] {
        bounds.expected_min = bounds.expected_min.min(point.expected_arrival);
        bounds.expected_max = bounds.expected_max.max(point.expected_arrival);
        bounds.actual_min = bounds.actual_min.min(point.actual_arrival);
        bounds.actual_max = bounds.actual_max.max(point.actual_arrival);
    }
    Some(bounds)
}
