//! Configuration for opsdata snapshot generation
//!
//! This module provides the parameters that control one generation run:
//! record counts, the random seed, the reference date treated as "now",
//! and where the snapshot tables are written.

use chrono::{Duration, NaiveDate};
use rand_distr::Bernoulli;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::generation::resources::{DURATION_DAYS, START_WINDOW_DAYS};
use crate::core::generation::shipments::{DELAY_DAYS, FUTURE_WINDOW_DAYS, PAST_WINDOW_DAYS};

/// Shipment IDs are `SHP-` plus five digits, so at most this many are unique
pub const SHIPMENT_ID_CAPACITY: usize = 90_000;

/// Configuration for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Number of staffing assignments to generate
    pub num_resources: usize,
    /// Number of shipments to generate
    pub num_shipments: usize,
    /// Seed of the random stream
    pub random_seed: u64,
    /// Date treated as "now"; today's local date when unset
    pub reference_date: Option<NaiveDate>,
    /// Probability that a shipment misses its expected arrival
    pub delay_probability: f64,
    /// Directory holding `resources.csv` and `delays.csv`
    pub data_dir: PathBuf,
}

impl GenerationConfig {
    /// Create a new configuration with default values
    ///
    /// 50 resources, 200 shipments, seed 42, a 35% delay rate and the
    /// `data` directory.
    pub fn new() -> Self {
        Self {
            num_resources: 50,
            num_shipments: 200,
            random_seed: 42,
            reference_date: None,
            delay_probability: 0.35,
            data_dir: PathBuf::from("data"),
        }
    }

    pub fn with_resources(mut self, count: usize) -> Self {
        self.num_resources = count;
        self
    }

    pub fn with_shipments(mut self, count: usize) -> Self {
        self.num_shipments = count;
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Pin "now" so a run is reproducible across days
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn with_delay_probability(mut self, probability: f64) -> Self {
        self.delay_probability = probability;
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// The date generation treats as "now"
    pub fn resolved_reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// The weighted coin deciding whether a shipment is delayed
    pub fn delay_coin(&self) -> Result<Bernoulli, String> {
        Bernoulli::new(self.delay_probability).map_err(|e| {
            format!("Delay probability {} is not usable: {}", self.delay_probability, e)
        })
    }

    /// Check that every date generated around `date` is representable.
    ///
    /// Resources reach back by the start window and forward by the longest
    /// assignment; shipments reach forward by the future window plus the
    /// longest delay.
    pub fn validate_reference_date(date: NaiveDate) -> Result<(), String> {
        let lookback = START_WINDOW_DAYS.max(PAST_WINDOW_DAYS);
        let lookahead = (*DURATION_DAYS.end()).max(FUTURE_WINDOW_DAYS + *DELAY_DAYS.end());

        let earliest = date.checked_sub_signed(Duration::days(lookback));
        let latest = date.checked_add_signed(Duration::days(lookahead));
        if earliest.is_none() || latest.is_none() {
            return Err(format!(
                "Reference date {} leaves no room for {} days back and {} days ahead",
                date, lookback, lookahead
            ));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.delay_probability) {
            return Err("Delay probability must be between 0 and 1".to_string());
        }

        if self.num_shipments > SHIPMENT_ID_CAPACITY {
            return Err(format!(
                "At most {} shipments can carry unique IDs",
                SHIPMENT_ID_CAPACITY
            ));
        }

        if self.data_dir.as_os_str().is_empty() {
            return Err("Data directory must not be empty".to_string());
        }

        if let Some(date) = self.reference_date {
            Self::validate_reference_date(date)?;
        }

        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new()
    }
}
