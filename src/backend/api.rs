//! FeederApi trait for unified feeder-service access
//!
//! This module provides a common trait for all feeder transports, enabling
//! both the real HTTP client and generated-data implementations for testing
//! and offline use.

use crate::error::Result;
use crate::types::{Prediction, TimeRange, WeightSample};

/// Unified interface to the feeder service
///
/// Implementations must be `Send` so the poll worker can own one across
/// threads. An empty sample list is a valid `Ok` result — the "no data"
/// condition is decided by the caller, not the transport.
///
/// # Example
///
/// ```ignore
/// fn refresh(api: &dyn FeederApi, range: &TimeRange) -> Result<Vec<WeightSample>> {
///     api.fetch_weights(range)
/// }
/// ```
pub trait FeederApi: Send {
    /// Fetch historical weight samples within `range`.
    ///
    /// Fails on transport errors and on bodies that do not parse as a JSON
    /// array of samples. Never retries.
    fn fetch_weights(&self, range: &TimeRange) -> Result<Vec<WeightSample>>;

    /// Fetch the feed prediction derived from the samples within `range`.
    fn fetch_prediction(&self, range: &TimeRange) -> Result<Prediction>;

    /// Human-readable transport description for logs and the status bar.
    fn describe(&self) -> String;
}
