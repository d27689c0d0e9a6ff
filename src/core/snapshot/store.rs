use chrono::NaiveDate;
use log::debug;

use super::Snapshot;
use crate::core::errors::PipelineError;
use crate::core::execution::config::GenerationConfig;

/// Parameters a cached snapshot was generated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    pub num_resources: usize,
    pub num_shipments: usize,
    pub random_seed: u64,
    pub reference_date: NaiveDate,
    delay_probability_bits: u64,
}

impl SnapshotKey {
    /// Key of a snapshot generated from `config` with "now" = `reference_date`
    pub fn new(config: &GenerationConfig, reference_date: NaiveDate) -> Self {
        Self {
            num_resources: config.num_resources,
            num_shipments: config.num_shipments,
            random_seed: config.random_seed,
            reference_date,
            delay_probability_bits: config.delay_probability.to_bits(),
        }
    }
}

/// Lifecycle of the cached snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Generated,
    Invalidated,
}

#[derive(Debug)]
struct CachedSnapshot {
    key: SnapshotKey,
    snapshot: Snapshot,
}

/// Session cache of the generated snapshot.
///
/// Generation runs only on first access, after `invalidate()`, or when the
/// requested parameters differ from the cached ones.
#[derive(Debug)]
pub struct SnapshotStore {
    cached: Option<CachedSnapshot>,
    state: StoreState,
    generations: u64,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            cached: None,
            state: StoreState::Uninitialized,
            generations: 0,
        }
    }

    /// Return the cached snapshot for `config`, generating it if needed.
    ///
    /// An unset reference date is resolved to today once, here.
    pub fn get_or_generate(&mut self, config: &GenerationConfig) -> Result<&Snapshot, PipelineError> {
        self.get_or_generate_on(config, config.resolved_reference_date())
    }

    /// Same as `get_or_generate` with "now" fixed to `reference_date`
    pub fn get_or_generate_on(
        &mut self,
        config: &GenerationConfig,
        reference_date: NaiveDate,
    ) -> Result<&Snapshot, PipelineError> {
        let key = SnapshotKey::new(config, reference_date);

        let cached = match self.cached.take() {
            Some(cached) if cached.key == key => cached,
            previous => {
                debug!(
                    "[SnapshotStore] {} -> generating snapshot for {:?}",
                    self.state_name(),
                    key
                );
                match Snapshot::generate_on(config, reference_date) {
                    Ok(snapshot) => {
                        self.generations += 1;
                        CachedSnapshot { key, snapshot }
                    }
                    Err(err) => {
                        self.cached = previous;
                        return Err(err);
                    }
                }
            }
        };

        self.state = StoreState::Generated;
        Ok(&self.cached.insert(cached).snapshot)
    }

    /// Drop the cached snapshot; the next access regenerates it
    pub fn invalidate(&mut self) {
        if self.cached.take().is_some() {
            debug!("[SnapshotStore] Snapshot invalidated");
            self.state = StoreState::Invalidated;
        }
    }

    /// The cached snapshot, if one is held
    pub fn current(&self) -> Option<&Snapshot> {
        self.cached.as_ref().map(|cached| &cached.snapshot)
    }

    /// Parameters of the cached snapshot, if one is held
    pub fn current_key(&self) -> Option<&SnapshotKey> {
        self.cached.as_ref().map(|cached| &cached.key)
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn state_name(&self) -> &'static str {
        match self.state {
            StoreState::Uninitialized => "uninitialized",
            StoreState::Generated => "generated",
            StoreState::Invalidated => "invalidated",
        }
    }

    /// Number of generation runs performed by this store
    pub fn generations(&self) -> u64 {
        self.generations
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64) -> GenerationConfig {
        GenerationConfig::new()
            .with_resources(5)
            .with_shipments(10)
            .with_random_seed(seed)
            .with_reference_date(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap())
    }

    #[test]
    fn test_lifecycle() {
        let mut store = SnapshotStore::new();
        assert_eq!(store.state_name(), "uninitialized");
        assert!(store.current().is_none());

        let first = store.get_or_generate(&config(1)).unwrap().clone();
        assert_eq!(store.state_name(), "generated");
        assert_eq!(store.generations(), 1);

        store.get_or_generate(&config(1)).unwrap();
        assert_eq!(store.generations(), 1, "cached snapshot should be reused");

        store.invalidate();
        assert_eq!(store.state(), StoreState::Invalidated);
        assert_eq!(store.state_name(), "invalidated");
        assert!(store.current().is_none());

        let regenerated = store.get_or_generate(&config(1)).unwrap().clone();
        assert_eq!(store.generations(), 2);
        assert_eq!(regenerated, first);
    }

    #[test]
    fn test_new_parameters_regenerate() {
        let mut store = SnapshotStore::new();
        store.get_or_generate(&config(1)).unwrap();
        store.get_or_generate(&config(2)).unwrap();
        assert_eq!(store.generations(), 2);
    }

    #[test]
    fn test_invalidate_before_generation_is_a_no_op() {
        let mut store = SnapshotStore::new();
        store.invalidate();
        assert_eq!(store.state(), StoreState::Uninitialized);
    }

    #[test]
    fn test_failed_generation_keeps_state() {
        let mut store = SnapshotStore::new();
        store.get_or_generate(&config(1)).unwrap();
        let bad = config(1).with_delay_probability(-1.0);
        assert!(store.get_or_generate(&bad).is_err());
        assert_eq!(store.state_name(), "generated");
        assert!(store.current().is_some());
        assert_eq!(store.generations(), 1);
    }

    #[test]
    fn test_unset_reference_date_is_resolved_once() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let unpinned = GenerationConfig {
            reference_date: None,
            ..config(1)
        };

        let mut store = SnapshotStore::new();
        let cached = store.get_or_generate_on(&unpinned, today).unwrap().clone();
        assert_eq!(store.current_key().unwrap().reference_date, today);
        assert_eq!(cached, Snapshot::generate(&config(1)).unwrap());

        store.get_or_generate_on(&unpinned, today).unwrap();
        assert_eq!(store.generations(), 1);

        store.get_or_generate_on(&unpinned, today.succ_opt().unwrap()).unwrap();
        assert_eq!(store.generations(), 2);
        assert_eq!(store.current_key().unwrap().reference_date, today.succ_opt().unwrap());
    }
}
