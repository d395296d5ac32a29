//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

use feedwatch::error::Result;
use feedwatch::types::{Prediction, TimeRange, WeightSample};
use feedwatch::FeederApi;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A settle period long enough for the worker loop to act.
pub fn settle() -> Duration {
    Duration::from_millis(150)
}

/// Build a weight sample from literal parts.
pub fn sample(timestamp: &str, weight: f64) -> WeightSample {
    WeightSample {
        timestamp: timestamp.to_string(),
        weight,
    }
}

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

type WeightsFn = dyn Fn(usize, &TimeRange) -> Result<Vec<WeightSample>> + Send + Sync;
type PredictionFn = dyn Fn(usize, &TimeRange) -> Result<Prediction> + Send + Sync;

/// Scripted feeder transport for worker integration tests.
///
/// Responses come from closures keyed by call index; every requested range
/// is recorded for later assertions.
pub struct ScriptedApi {
    weights_fn: Box<WeightsFn>,
    prediction_fn: Box<PredictionFn>,
    weights_calls: AtomicUsize,
    prediction_calls: AtomicUsize,
    pub requested: Arc<Mutex<Vec<TimeRange>>>,
}

impl ScriptedApi {
    pub fn new(
        weights_fn: impl Fn(usize, &TimeRange) -> Result<Vec<WeightSample>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            weights_fn: Box::new(weights_fn),
            prediction_fn: Box::new(|_, _| {
                Ok(Prediction {
                    food_added: 12.34,
                    confidence: 0.876,
                })
            }),
            weights_calls: AtomicUsize::new(0),
            prediction_calls: AtomicUsize::new(0),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_prediction(
        mut self,
        prediction_fn: impl Fn(usize, &TimeRange) -> Result<Prediction> + Send + Sync + 'static,
    ) -> Self {
        self.prediction_fn = Box::new(prediction_fn);
        self
    }

    /// Handle on the recorded ranges, usable after the api is boxed away.
    pub fn range_log(&self) -> Arc<Mutex<Vec<TimeRange>>> {
        self.requested.clone()
    }
}

impl FeederApi for ScriptedApi {
    fn fetch_weights(&self, range: &TimeRange) -> Result<Vec<WeightSample>> {
        let call = self.weights_calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(*range);
        (self.weights_fn)(call, range)
    }

    fn fetch_prediction(&self, range: &TimeRange) -> Result<Prediction> {
        let call = self.prediction_calls.fetch_add(1, Ordering::SeqCst);
        (self.prediction_fn)(call, range)
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}
