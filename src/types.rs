//! Core data types for feedwatch
//!
//! This module contains the fundamental data structures used throughout
//! the application for representing weight samples, predictions, time
//! ranges, and chart-ready series.
//!
//! # Main Types
//!
//! - [`WeightSample`] - One server-reported weight reading with timestamp
//! - [`Prediction`] - Server-computed feed estimate with confidence score
//! - [`TimeRange`] - A start/end window used to parameterize fetches
//! - [`ChartSeries`] - Chart-ready label/value arrays built from samples
//! - [`FetchStats`] - Counters describing fetch outcomes for the status bar
//!
//! # Invariants
//!
//! [`ChartSeries`] labels and values always have equal length, are
//! positionally paired, and are ordered by ascending sample time. The only
//! way to build a non-empty series is [`ChartSeries::from_samples`], which
//! enforces all three.

use crate::error::{FeedError, Result};
use crate::timestamp;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One weight reading received from the feeder service.
///
/// Immutable once received; never persisted client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSample {
    /// Server-reported timestamp string (see [`crate::timestamp`])
    pub timestamp: String,
    /// Bowl weight in grams
    pub weight: f64,
}

/// Server-computed estimate of food to be added, with confidence score.
///
/// Ephemeral: replaced wholesale on each successful prediction fetch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted feed amount in grams
    pub food_added: f64,
    /// Confidence in the estimate, 0..1
    pub confidence: f64,
}

impl Prediction {
    /// Display text for the predicted amount, e.g. `"12.3g"`.
    pub fn amount_text(&self) -> String {
        format!("{:.1}g", self.food_added)
    }

    /// Display text for the confidence, e.g. `"Confidence: 87.6%"`.
    pub fn confidence_text(&self) -> String {
        format!("Confidence: {:.1}%", self.confidence * 100.0)
    }
}

/// A half-open-ish time window `[start, end]` used to parameterize fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Create a range from explicit instants.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The Live-mode range at `now`: since the last clear if one happened,
    /// otherwise the trailing `window_secs` seconds.
    pub fn live(last_clear: Option<DateTime<Utc>>, now: DateTime<Utc>, window_secs: i64) -> Self {
        let start = last_clear.unwrap_or(now - Duration::seconds(window_secs));
        Self { start, end: now }
    }

    /// The full calendar day `date` in the local timezone:
    /// 00:00:00 through 23:59:59, converted to UTC instants.
    pub fn calendar_day_local(date: NaiveDate) -> Result<Self> {
        let start = date.and_time(NaiveTime::MIN);
        let end = date
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| FeedError::Timestamp(format!("invalid day bounds for {date}")))?;

        let to_utc = |naive| {
            chrono::Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc))
                .ok_or_else(|| {
                    FeedError::Timestamp(format!("{naive} does not exist in the local timezone"))
                })
        };

        Ok(Self {
            start: to_utc(start)?,
            end: to_utc(end)?,
        })
    }

    /// Start of the range in epoch milliseconds, as sent to the service.
    pub fn start_epoch_ms(&self) -> i64 {
        timestamp::epoch_ms(self.start)
    }

    /// End of the range in epoch milliseconds, as sent to the service.
    pub fn end_epoch_ms(&self) -> i64 {
        timestamp::epoch_ms(self.end)
    }
}

/// Chart-ready form of a set of weight samples.
///
/// `labels[i]` is the formatted time label for `values[i]`; both arrays are
/// ordered by ascending sample time. Each refresh replaces the whole series,
/// never appends to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl ChartSeries {
    /// Build a series from raw samples: parse every timestamp, sort
    /// ascending by instant, and format labels.
    ///
    /// Any unparseable timestamp fails the whole conversion, so a malformed
    /// body is reported instead of silently dropping points.
    pub fn from_samples(samples: &[WeightSample]) -> Result<Self> {
        let mut parsed: Vec<(DateTime<Utc>, f64)> = samples
            .iter()
            .map(|sample| {
                timestamp::parse_server_timestamp(&sample.timestamp)
                    .map(|instant| (instant, sample.weight))
            })
            .collect::<Result<_>>()?;

        parsed.sort_by_key(|(instant, _)| *instant);

        let mut labels = Vec::with_capacity(parsed.len());
        let mut values = Vec::with_capacity(parsed.len());
        for (instant, weight) in parsed {
            labels.push(timestamp::chart_label(instant));
            values.push(weight);
        }

        Ok(Self { labels, values })
    }

    /// Formatted time labels, ascending.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Weight values in grams, paired with [`labels`](Self::labels).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of points in the series.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the series has no points.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Empty both arrays.
    pub fn clear(&mut self) {
        self.labels.clear();
        self.values.clear();
    }
}

/// Counters describing fetch outcomes, displayed in the status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FetchStats {
    /// Cycles whose weights fetch returned samples
    pub fetches_ok: u64,
    /// Cycles whose weights fetch failed
    pub fetches_failed: u64,
    /// Cycles whose weights fetch returned an empty array
    pub empty_results: u64,
    /// Total samples received across all cycles
    pub samples_received: u64,
    /// Wall time of the most recent weights fetch in milliseconds
    pub last_fetch_ms: u64,
}

impl FetchStats {
    /// Record a cycle whose weights fetch returned `samples` samples.
    pub fn record_success(&mut self, samples: usize, elapsed_ms: u64) {
        self.fetches_ok += 1;
        self.samples_received += samples as u64;
        self.last_fetch_ms = elapsed_ms;
    }

    /// Record a cycle whose weights fetch returned an empty array.
    pub fn record_empty(&mut self, elapsed_ms: u64) {
        self.empty_results += 1;
        self.last_fetch_ms = elapsed_ms;
    }

    /// Record a cycle whose weights fetch failed.
    pub fn record_failure(&mut self) {
        self.fetches_failed += 1;
    }

    /// Success rate as a percentage over all completed cycles.
    pub fn success_rate(&self) -> f64 {
        let total = self.fetches_ok + self.empty_results + self.fetches_failed;
        if total == 0 {
            100.0
        } else {
            ((self.fetches_ok + self.empty_results) as f64 / total as f64) * 100.0
        }
    }
}
