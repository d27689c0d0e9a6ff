// Tests for aggregating generated snapshots
#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::core::domain::{Department, ShipmentStatus};
    use crate::core::execution::config::GenerationConfig;
    use crate::core::metrics::{MetricsAggregator, HIGH_RISK_THRESHOLD, REVIEW_THRESHOLD};
    use crate::core::snapshot::Snapshot;

    fn snapshot() -> Snapshot {
        let config = GenerationConfig::new()
            .with_random_seed(42)
            .with_reference_date(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
        Snapshot::generate(&config).unwrap()
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let snapshot = snapshot();
        assert_eq!(
            MetricsAggregator::summarize(&snapshot),
            MetricsAggregator::summarize(&snapshot)
        );
    }

    #[test]
    fn test_summary_matches_tables() {
        let snapshot = snapshot();
        let summary = MetricsAggregator::summarize(&snapshot);

        assert_eq!(summary.resources.total, 50);
        assert_eq!(summary.shipments.total, 200);

        let utilization = summary.resources.avg_utilization.unwrap();
        assert!((50.0..=120.0).contains(&utilization));

        let department_total: usize = summary
            .resources
            .utilization_by_department
            .iter()
            .map(|d| d.resources)
            .sum();
        assert_eq!(department_total, 50);
        assert!(summary
            .resources
            .utilization_by_department
            .iter()
            .all(|d| Department::ALL.contains(&d.department)));

        let delayed = snapshot
            .shipments
            .iter()
            .filter(|s| s.status == ShipmentStatus::Delayed)
            .count();
        let reason_total: usize = summary.shipments.delay_reasons.iter().map(|r| r.count).sum();
        assert_eq!(reason_total, delayed);

        let rate = summary.shipments.on_time_rate.unwrap();
        assert!((0.0..=100.0).contains(&rate));
    }

    #[test]
    fn test_risk_views_respect_thresholds() {
        let summary = MetricsAggregator::summarize(&snapshot()).shipments;

        assert!(summary.risk_review.iter().all(|r| r.risk_score > REVIEW_THRESHOLD));
        assert!(summary
            .risk_review
            .windows(2)
            .all(|pair| pair[0].risk_score >= pair[1].risk_score));

        let high_in_review = summary
            .risk_review
            .iter()
            .filter(|r| r.risk_score > HIGH_RISK_THRESHOLD)
            .count();
        assert_eq!(high_in_review, summary.high_risk);
    }

    #[test]
    fn test_timeline_only_holds_arrived_shipments() {
        let snapshot = snapshot();
        let summary = MetricsAggregator::summarize(&snapshot).shipments;
        let arrived = snapshot.shipments.iter().filter(|s| s.has_arrived()).count();

        assert_eq!(summary.timeline.len(), arrived);
        if let Some(bounds) = summary.timeline_bounds {
            assert!(bounds.expected_min <= bounds.expected_max);
            assert!(bounds.actual_min <= bounds.actual_max);
            assert!(bounds.actual_min >= bounds.expected_min);
        }
    }
}
