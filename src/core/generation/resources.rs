use chrono::{Duration, NaiveDate};
use log::debug;
use std::collections::HashSet;
use std::ops::RangeInclusive;

use crate::core::domain::{Department, Project, ResourceStatus, Role};
use crate::core::random::RandomSource;
use crate::core::records::Resource;
use crate::core::types::ResourceId;

/// Assignments start at most this many days before the reference date
pub const START_WINDOW_DAYS: i64 = 182;
/// Assignment length in days
pub const DURATION_DAYS: RangeInclusive<i64> = 30..=180;
/// Utilization percentage; above 100 is over-allocation
pub const UTILIZATION_PCT: RangeInclusive<u8> = 50..=120;

/// Length of the opaque resource identifier, in hex characters
const RESOURCE_ID_LEN: usize = 8;

/// Generator of the Resource Allocation dataset
///
/// Every field is sampled independently; status is not correlated with
/// utilization or with the assignment window.
#[derive(Debug, Clone)]
pub struct ResourceGenerator {
    source: RandomSource,
    reference_date: NaiveDate,
}

impl ResourceGenerator {
    pub fn new(source: RandomSource, reference_date: NaiveDate) -> Self {
        Self {
            source,
            reference_date,
        }
    }

    /// Generate `count` staffing assignments
    pub fn generate(&mut self, count: usize) -> Vec<Resource> {
        let mut issued = HashSet::with_capacity(count);
        let resources: Vec<Resource> = (0..count).map(|_| self.next_resource(&mut issued)).collect();

        debug!(
            "[ResourceGenerator] Generated {} resources (seed {}, reference date {})",
            resources.len(),
            self.source.seed(),
            self.reference_date
        );
        resources
    }

    fn next_resource(&mut self, issued: &mut HashSet<String>) -> Resource {
        let window_start = self.reference_date - Duration::days(START_WINDOW_DAYS);
        let start_date = self.source.date_between(window_start, self.reference_date);
        let end_date = start_date + Duration::days(self.source.int_in(DURATION_DAYS));

        Resource {
            resource_id: self.unique_id(issued),
            name: self.source.full_name(),
            role: self.source.choose(Role::ALL),
            department: self.source.choose(Department::ALL),
            project: self.source.choose(Project::ALL),
            start_date,
            end_date,
            utilization_pct: self.source.small_in(UTILIZATION_PCT),
            status: self.source.choose(ResourceStatus::ALL),
        }
    }

    fn unique_id(&mut self, issued: &mut HashSet<String>) -> ResourceId {
        loop {
            let mut id = self.source.uuid().simple().to_string();
            id.truncate(RESOURCE_ID_LEN);
            if issued.insert(id.clone()) {
                return ResourceId::new(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(seed: u64) -> ResourceGenerator {
        let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        ResourceGenerator::new(RandomSource::new(seed), today)
    }

    #[test]
    fn test_generate_count() {
        assert_eq!(generator(1).generate(25).len(), 25);
        assert!(generator(1).generate(0).is_empty());
    }

    #[test]
    fn test_assignment_window() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        for resource in generator(2).generate(300) {
            assert!(resource.end_date > resource.start_date);
            assert!(DURATION_DAYS.contains(&resource.duration_days()));
            assert!(resource.start_date <= today);
            assert!(resource.start_date >= today - Duration::days(START_WINDOW_DAYS));
        }
    }

    #[test]
    fn test_field_ranges_and_ids() {
        let resources = generator(3).generate(300);
        let ids: HashSet<_> = resources.iter().map(|r| r.resource_id.clone()).collect();
        assert_eq!(ids.len(), resources.len());

        for resource in &resources {
            assert!(UTILIZATION_PCT.contains(&resource.utilization_pct));
            assert_eq!(resource.resource_id.as_str().len(), RESOURCE_ID_LEN);
            assert!(resource.name.contains(' '));
        }
    }

    #[test]
    fn test_same_seed_same_resources() {
        assert_eq!(generator(11).generate(40), generator(11).generate(40));
        assert_ne!(generator(11).generate(40), generator(12).generate(40));
    }
}
