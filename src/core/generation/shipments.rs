use chrono::{Duration, NaiveDate};
use log::debug;
use rand_distr::Bernoulli;
use std::collections::HashSet;
use std::ops::RangeInclusive;

use super::risk::RiskClassifier;
use crate::core::domain::{DelayReason, Destination, Origin};
use crate::core::execution::config::SHIPMENT_ID_CAPACITY;
use crate::core::random::RandomSource;
use crate::core::records::Shipment;
use crate::core::types::ShipmentId;

/// Expected arrivals start this many days before the reference date
pub const PAST_WINDOW_DAYS: i64 = 91;
/// and end this many days after it
pub const FUTURE_WINDOW_DAYS: i64 = 30;
/// Length of a delay, in days
pub const DELAY_DAYS: RangeInclusive<i64> = 1..=15;

const SHIPMENT_ID_DIGITS: u32 = 5;

/// The sampled inputs of the shipment state machine.
///
/// A delayed draw carries a delay within `DELAY_DAYS`; any other draw
/// carries zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipmentDraw {
    expected_arrival: NaiveDate,
    is_delayed: bool,
    delay_days: i64,
}

impl ShipmentDraw {
    pub fn new(expected_arrival: NaiveDate, is_delayed: bool, delay_days: i64) -> Result<Self, String> {
        if is_delayed && !DELAY_DAYS.contains(&delay_days) {
            return Err(format!(
                "A delayed shipment needs {} to {} delay days, got {}",
                DELAY_DAYS.start(),
                DELAY_DAYS.end(),
                delay_days
            ));
        }
        if !is_delayed && delay_days != 0 {
            return Err(format!(
                "A shipment that is not delayed has no delay days, got {}",
                delay_days
            ));
        }

        Ok(Self {
            expected_arrival,
            is_delayed,
            delay_days,
        })
    }

    pub fn expected_arrival(&self) -> NaiveDate {
        self.expected_arrival
    }

    pub fn is_delayed(&self) -> bool {
        self.is_delayed
    }

    pub fn delay_days(&self) -> i64 {
        self.delay_days
    }
}

/// Generator of the Delay Anticipation dataset
#[derive(Debug, Clone)]
pub struct ShipmentGenerator {
    source: RandomSource,
    reference_date: NaiveDate,
    delay_coin: Bernoulli,
    issued: HashSet<u32>,
}

impl ShipmentGenerator {
    pub fn new(source: RandomSource, reference_date: NaiveDate, delay_coin: Bernoulli) -> Self {
        Self {
            source,
            reference_date,
            delay_coin,
            issued: HashSet::new(),
        }
    }

    /// Generate `count` shipments
    pub fn generate(&mut self, count: usize) -> Vec<Shipment> {
        self.issued.clear();
        let shipments: Vec<Shipment> = (0..count)
            .map(|_| {
                let draw = self.draw();
                self.build(draw)
            })
            .collect();

        debug!(
            "[ShipmentGenerator] Generated {} shipments (seed {}, reference date {})",
            shipments.len(),
            self.source.seed(),
            self.reference_date
        );
        shipments
    }

    /// Sample the expected arrival, the delay coin and the delay length
    pub fn draw(&mut self) -> ShipmentDraw {
        let window_start = self.reference_date - Duration::days(PAST_WINDOW_DAYS);
        let window_end = self.reference_date + Duration::days(FUTURE_WINDOW_DAYS);
        let expected_arrival = self.source.date_between(window_start, window_end);
        let is_delayed = self.source.flip(&self.delay_coin);
        let delay_days = if is_delayed {
            self.source.int_in(DELAY_DAYS)
        } else {
            0
        };

        ShipmentDraw {
            expected_arrival,
            is_delayed,
            delay_days,
        }
    }

    /// Run the state machine for one draw and sample the remaining fields.
    ///
    /// The delayed flag first decides the observed outcome. A second pass
    /// then turns future-dated shipments into predictions: no actual
    /// arrival, `At Risk` or `Scheduled`, and zero delay days.
    pub fn build(&mut self, draw: ShipmentDraw) -> Shipment {
        let assessment = RiskClassifier::assess(
            draw.is_delayed,
            draw.delay_days,
            draw.expected_arrival,
            self.reference_date,
        );

        let (tentative_arrival, primary_delay_reason) = if draw.is_delayed {
            let bucket = self.source.choose(assessment.bucket_candidates);
            debug!(
                "[ShipmentGenerator] {} day delay, risk bucket {}",
                draw.delay_days, bucket
            );
            (
                draw.expected_arrival + Duration::days(draw.delay_days),
                Some(self.source.choose(DelayReason::ALL)),
            )
        } else {
            (draw.expected_arrival, None)
        };

        let actual_arrival = assessment.arrived.then_some(tentative_arrival);

        Shipment {
            shipment_id: self.unique_id(),
            origin: self.source.choose(Origin::ALL),
            destination: self.source.choose(Destination::ALL),
            expected_arrival: draw.expected_arrival,
            actual_arrival,
            status: assessment.status,
            delay_days: Shipment::observed_delay(draw.expected_arrival, actual_arrival),
            risk_score: self.source.small_in(assessment.score_range),
            primary_delay_reason,
        }
    }

    fn unique_id(&mut self) -> ShipmentId {
        if self.issued.len() >= SHIPMENT_ID_CAPACITY {
            // Five digit space exhausted, continue with wider numbers
            let overflow = 100_000 + (self.issued.len() - SHIPMENT_ID_CAPACITY) as u32;
            self.issued.insert(overflow);
            return ShipmentId::from_number(overflow);
        }

        loop {
            let number = self.source.number_with_digits(SHIPMENT_ID_DIGITS);
            if self.issued.insert(number) {
                return ShipmentId::from_number(number);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::ShipmentStatus;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    fn generator(seed: u64) -> ShipmentGenerator {
        ShipmentGenerator::new(
            RandomSource::new(seed),
            today(),
            Bernoulli::new(0.35).unwrap(),
        )
    }

    fn draw(offset_days: i64, is_delayed: bool, delay_days: i64) -> ShipmentDraw {
        ShipmentDraw::new(today() + Duration::days(offset_days), is_delayed, delay_days).unwrap()
    }

    #[test]
    fn test_forced_past_delay() {
        let shipment = generator(42).build(draw(-10, true, 5));

        assert_eq!(shipment.status, ShipmentStatus::Delayed);
        assert_eq!(shipment.actual_arrival, Some(today() - Duration::days(5)));
        assert_eq!(shipment.delay_days, 5);
        assert!((1..=100).contains(&shipment.risk_score));
        assert!(shipment.primary_delay_reason.is_some());
    }

    #[test]
    fn test_forced_future_delay() {
        let shipment = generator(42).build(draw(10, true, 9));

        assert_eq!(shipment.status, ShipmentStatus::AtRisk);
        assert_eq!(shipment.actual_arrival, None);
        assert_eq!(shipment.delay_days, 0);
        assert!(shipment.primary_delay_reason.is_some());
    }

    #[test]
    fn test_forced_on_time() {
        let shipment = generator(42).build(draw(-3, false, 0));

        assert_eq!(shipment.status, ShipmentStatus::OnTime);
        assert_eq!(shipment.actual_arrival, Some(shipment.expected_arrival));
        assert!((1..=20).contains(&shipment.risk_score));
        assert_eq!(shipment.primary_delay_reason, None);
    }

    #[test]
    fn test_forced_future_on_time_is_scheduled() {
        let shipment = generator(42).build(draw(1, false, 0));

        assert_eq!(shipment.status, ShipmentStatus::Scheduled);
        assert_eq!(shipment.actual_arrival, None);
        assert_eq!(shipment.delay_days, 0);
    }

    #[test]
    fn test_draw_rejects_delay_outside_range() {
        let expected = today() - Duration::days(3);
        assert!(ShipmentDraw::new(expected, true, 0).is_err());
        assert!(ShipmentDraw::new(expected, true, 16).is_err());
        assert!(ShipmentDraw::new(expected, true, 40).is_err());
        assert!(ShipmentDraw::new(expected, false, 4).is_err());

        assert!(ShipmentDraw::new(expected, true, 1).is_ok());
        assert!(ShipmentDraw::new(expected, true, 15).is_ok());
    }

    #[test]
    fn test_sampled_draws_are_valid() {
        let mut generator = generator(11);
        for _ in 0..500 {
            let sampled = generator.draw();
            let checked = ShipmentDraw::new(
                sampled.expected_arrival(),
                sampled.is_delayed(),
                sampled.delay_days(),
            );
            assert_eq!(checked, Ok(sampled));
        }
    }

    #[test]
    fn test_generated_invariants() {
        for shipment in generator(5).generate(500) {
            let future = shipment.expected_arrival > today();
            assert_eq!(shipment.actual_arrival.is_some(), !future);
            assert!(shipment.expected_arrival >= today() - Duration::days(PAST_WINDOW_DAYS));
            assert!(shipment.expected_arrival <= today() + Duration::days(FUTURE_WINDOW_DAYS));
            assert!((1..=100).contains(&shipment.risk_score));
            assert!(shipment.shipment_id.as_str().starts_with(ShipmentId::PREFIX));

            if future {
                assert!(matches!(
                    shipment.status,
                    ShipmentStatus::Scheduled | ShipmentStatus::AtRisk
                ));
                assert_eq!(shipment.delay_days, 0);
            }

            if shipment.status == ShipmentStatus::Delayed {
                assert!(DELAY_DAYS.contains(&shipment.delay_days));
                assert_eq!(
                    shipment.actual_arrival,
                    Some(shipment.expected_arrival + Duration::days(shipment.delay_days))
                );
            }
        }
    }

    #[test]
    fn test_shipment_ids_are_unique() {
        let shipments = generator(6).generate(2_000);
        let ids: HashSet<_> = shipments.iter().map(|s| s.shipment_id.clone()).collect();
        assert_eq!(ids.len(), shipments.len());
    }

    #[test]
    fn test_delay_coin_extremes() {
        let mut never = ShipmentGenerator::new(RandomSource::new(1), today(), Bernoulli::new(0.0).unwrap());
        assert!(never.generate(100).iter().all(|s| s.primary_delay_reason.is_none()));

        let mut always = ShipmentGenerator::new(RandomSource::new(1), today(), Bernoulli::new(1.0).unwrap());
        assert!(always
            .generate(100)
            .iter()
            .all(|s| matches!(s.status, ShipmentStatus::Delayed | ShipmentStatus::AtRisk)));
    }
}
