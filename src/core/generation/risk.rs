//! Status and risk classification of shipments.
//!
//! Pure functions only. The shipment generator draws statuses and scores
//! from these rules, and the metrics aggregator reads the on-time and
//! score thresholds back from them.

use chrono::NaiveDate;
use std::ops::RangeInclusive;

use crate::core::domain::ShipmentStatus;
use crate::named_set;

named_set! {
    /// Informational severity label derived from delay length
    pub enum RiskBucket {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Critical => "Critical",
    }
}

/// Outcome of classifying one shipment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    pub status: ShipmentStatus,
    /// Buckets the severity label is drawn from
    pub bucket_candidates: &'static [RiskBucket],
    /// Range the numeric risk score is drawn from
    pub score_range: RangeInclusive<u8>,
    /// False while the expected arrival lies after the reference date
    pub arrived: bool,
}

/// Maps (delayed flag, delay length, expected date vs now) to status and risk
pub struct RiskClassifier;

impl RiskClassifier {
    /// Delays longer than this many days are High or Critical
    pub const SEVERE_DELAY_DAYS: i64 = 7;
    /// Risk score range of shipments that arrived on time
    pub const ON_TIME_SCORES: RangeInclusive<u8> = 1..=20;
    /// Risk score range of every other status
    pub const OPEN_SCORES: RangeInclusive<u8> = 1..=100;
    /// Scores above this are high risk
    pub const HIGH_RISK_THRESHOLD: u8 = 80;
    /// Scores above this are listed for risk review
    pub const REVIEW_THRESHOLD: u8 = 50;

    /// Final status of a shipment.
    ///
    /// Future-dated shipments have not arrived, so the delayed flag turns
    /// into a prediction (`At Risk`) rather than an outcome (`Delayed`).
    pub fn status(is_delayed: bool, expected_arrival: NaiveDate, now: NaiveDate) -> ShipmentStatus {
        match (expected_arrival > now, is_delayed) {
            (true, true) => ShipmentStatus::AtRisk,
            (true, false) => ShipmentStatus::Scheduled,
            (false, true) => ShipmentStatus::Delayed,
            (false, false) => ShipmentStatus::OnTime,
        }
    }

    pub fn bucket_candidates(is_delayed: bool, delay_days: i64) -> &'static [RiskBucket] {
        if !is_delayed {
            &[RiskBucket::Low]
        } else if delay_days > Self::SEVERE_DELAY_DAYS {
            &[RiskBucket::High, RiskBucket::Critical]
        } else {
            &[RiskBucket::Medium]
        }
    }

    pub fn score_range(status: ShipmentStatus) -> RangeInclusive<u8> {
        match status {
            ShipmentStatus::OnTime => Self::ON_TIME_SCORES,
            _ => Self::OPEN_SCORES,
        }
    }

    /// Whether the status counts toward the on-time rate.
    ///
    /// `Scheduled` shipments have no outcome yet and are counted as on time.
    pub fn counts_as_on_time(status: ShipmentStatus) -> bool {
        matches!(status, ShipmentStatus::OnTime | ShipmentStatus::Scheduled)
    }

    pub fn is_high_risk(risk_score: u8) -> bool {
        risk_score > Self::HIGH_RISK_THRESHOLD
    }

    pub fn needs_review(risk_score: u8) -> bool {
        risk_score > Self::REVIEW_THRESHOLD
    }

    pub fn assess(
        is_delayed: bool,
        delay_days: i64,
        expected_arrival: NaiveDate,
        now: NaiveDate,
    ) -> RiskAssessment {
        let status = Self::status(is_delayed, expected_arrival, now);
        RiskAssessment {
            status,
            bucket_candidates: Self::bucket_candidates(is_delayed, delay_days),
            score_range: Self::score_range(status),
            arrived: expected_arrival <= now,
        }
    }
}
