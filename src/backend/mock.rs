//! Mock feeder implementation for testing and offline use
//!
//! This module provides a feeder transport that generates deterministic
//! weight data without a running feeder service: a bowl that drains at a
//! constant rate and is refilled on a fixed schedule.
//!
//! # Enabling
//!
//! The mock feeder is only available when the `mock-feeder` feature is
//! enabled:
//!
//! ```bash
//! cargo run --features mock-feeder
//! ```
//!
//! At runtime it is swapped in via `BackendCommand::UseMockFeeder(true)`.

use crate::backend::api::FeederApi;
use crate::error::Result;
use crate::types::{Prediction, TimeRange, WeightSample};
use chrono::{DateTime, Duration, Utc};

/// Spacing between generated samples.
const SAMPLE_SPACING_SECS: i64 = 60;

/// Upper bound on generated samples per request, to keep wide ranges cheap.
const MAX_SAMPLES_PER_REQUEST: usize = 720;

/// Bowl weight right after a refill, grams.
const FULL_BOWL_GRAMS: f64 = 200.0;

/// Residue the cat never quite finishes, grams.
const EMPTY_BOWL_GRAMS: f64 = 15.0;

/// Drain rate, grams per minute.
const DRAIN_GRAMS_PER_MIN: f64 = 0.8;

/// Time between refills.
const REFILL_PERIOD_SECS: i64 = 4 * 60 * 60;

/// Generated-data feeder transport.
#[derive(Debug, Default)]
pub struct MockFeederApi;

impl MockFeederApi {
    pub fn new() -> Self {
        Self
    }

    /// Bowl weight at `instant`: linear drain since the last scheduled
    /// refill, clamped to the residue floor.
    fn weight_at(instant: DateTime<Utc>) -> f64 {
        let secs_into_cycle = instant.timestamp().rem_euclid(REFILL_PERIOD_SECS);
        let drained = (secs_into_cycle as f64 / 60.0) * DRAIN_GRAMS_PER_MIN;
        (FULL_BOWL_GRAMS - drained).max(EMPTY_BOWL_GRAMS)
    }
}

impl FeederApi for MockFeederApi {
    fn fetch_weights(&self, range: &TimeRange) -> Result<Vec<WeightSample>> {
        if range.end <= range.start {
            return Ok(Vec::new());
        }

        let mut samples = Vec::new();
        let mut at = range.start;
        while at <= range.end && samples.len() < MAX_SAMPLES_PER_REQUEST {
            samples.push(WeightSample {
                timestamp: at.format("%Y-%m-%d %H:%M:%S").to_string(),
                weight: Self::weight_at(at),
            });
            at = at + Duration::seconds(SAMPLE_SPACING_SECS);
        }
        Ok(samples)
    }

    fn fetch_prediction(&self, range: &TimeRange) -> Result<Prediction> {
        let current = Self::weight_at(range.end);
        Ok(Prediction {
            food_added: FULL_BOWL_GRAMS - current,
            confidence: 0.9,
        })
    }

    fn describe(&self) -> String {
        "mock feeder (generated data)".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_samples_cover_range_in_order() {
        let range = TimeRange::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 10, 0).unwrap(),
        );
        let samples = MockFeederApi::new().fetch_weights(&range).unwrap();
        assert_eq!(samples.len(), 11);
        assert_eq!(samples[0].timestamp, "2024-01-01 09:00:00");
        assert_eq!(samples.last().unwrap().timestamp, "2024-01-01 09:10:00");
    }

    #[test]
    fn test_empty_range_yields_no_samples() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let range = TimeRange::new(at, at - Duration::seconds(1));
        assert!(MockFeederApi::new().fetch_weights(&range).unwrap().is_empty());
    }

    #[test]
    fn test_weight_stays_within_bowl_bounds() {
        let range = TimeRange::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
        );
        for sample in MockFeederApi::new().fetch_weights(&range).unwrap() {
            assert!(sample.weight >= EMPTY_BOWL_GRAMS);
            assert!(sample.weight <= FULL_BOWL_GRAMS);
        }
    }

    #[test]
    fn test_prediction_matches_missing_food() {
        let range = TimeRange::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap(),
        );
        let mock = MockFeederApi::new();
        let prediction = mock.fetch_prediction(&range).unwrap();
        let current = samples_tail_weight(&mock, &range);
        assert!((prediction.food_added - (FULL_BOWL_GRAMS - current)).abs() < 1e-9);
        assert!(prediction.confidence > 0.0 && prediction.confidence <= 1.0);
    }

    fn samples_tail_weight(mock: &MockFeederApi, range: &TimeRange) -> f64 {
        mock.fetch_weights(range).unwrap().last().unwrap().weight
    }
}
