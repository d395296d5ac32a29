//! Shared state and action types for the frontend
//!
//! This module defines the UI-side state container and the action type
//! panels emit. Panels receive state via borrowing and return
//! [`AppAction`]s instead of mutating state or talking to the backend
//! directly, which keeps the layout code testable.

use crate::backend::BackendMessage;
use crate::frontend::notifications::ToastStack;
use crate::types::{ChartSeries, FetchStats, Prediction, TimeRange};
use chrono::{Local, NaiveDateTime, TimeZone, Utc};

/// Input formats accepted in the start/end date-time fields, tried in order.
const INPUT_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

/// Actions that any panel can emit
///
/// The app translates these into backend commands and input mutations in
/// one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Pin the range currently typed into the two inputs
    ApplyFilter,
    /// Fill the inputs with today's bounds and pin them
    ShowToday,
    /// Fill the inputs with yesterday's bounds and pin them
    ShowYesterday,
    /// Reset to Live mode, clearing chart and prediction
    Clear,
    /// Swap between the HTTP transport and generated data
    #[cfg(feature = "mock-feeder")]
    ToggleMockFeeder(bool),
}

/// All UI-visible state, mutated only by [`UiState::apply`] and the input
/// widgets.
pub struct UiState {
    /// Current chart contents; replaced wholesale on each refresh
    pub chart: ChartSeries,
    /// Most recent successful prediction, if any
    pub prediction: Option<Prediction>,
    /// Raw text of the start date-time input
    pub start_input: String,
    /// Raw text of the end date-time input
    pub end_input: String,
    /// Display-only mode indicator (the worker owns the real state)
    pub filtered: bool,
    /// Latest fetch counters from the worker
    pub stats: FetchStats,
    /// Most recent error notice, shown in the status bar until the next one
    pub last_error: Option<String>,
    /// Transient notifications
    pub toasts: ToastStack,
    /// Whether the worker thread is still alive
    pub backend_alive: bool,
    /// Whether the generated-data transport is active
    #[cfg(feature = "mock-feeder")]
    pub mock_feeder: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            chart: ChartSeries::default(),
            prediction: None,
            start_input: String::new(),
            end_input: String::new(),
            filtered: false,
            stats: FetchStats::default(),
            last_error: None,
            toasts: ToastStack::default(),
            backend_alive: true,
            #[cfg(feature = "mock-feeder")]
            mock_feeder: false,
        }
    }
}

impl UiState {
    /// Apply one backend message.
    pub fn apply(&mut self, message: BackendMessage) {
        match message {
            BackendMessage::ChartUpdated(series) => {
                self.chart = series;
            }
            BackendMessage::ChartCleared => {
                self.chart.clear();
                self.prediction = None;
                self.filtered = false;
            }
            BackendMessage::PredictionUpdated(prediction) => {
                self.prediction = Some(prediction);
            }
            BackendMessage::Notice { message, is_error } => {
                if is_error {
                    self.last_error = Some(message.clone());
                }
                self.toasts.push(message, is_error);
            }
            BackendMessage::Stats(stats) => {
                self.stats = stats;
            }
            BackendMessage::Shutdown => {
                self.backend_alive = false;
            }
        }
    }

    /// The range pinned by the two inputs, when both parse.
    pub fn input_range(&self) -> Option<TimeRange> {
        let start = parse_input(&self.start_input)?;
        let end = parse_input(&self.end_input)?;
        Some(TimeRange::new(local_to_utc(start)?, local_to_utc(end)?))
    }

    /// Fill both inputs from a local-time range.
    pub fn set_inputs(&mut self, range: &TimeRange) {
        let format = |instant: chrono::DateTime<Utc>| {
            instant
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        };
        self.start_input = format(range.start);
        self.end_input = format(range.end);
    }

    /// Empty both inputs.
    pub fn clear_inputs(&mut self) {
        self.start_input.clear();
        self.end_input.clear();
    }
}

/// Parse one date-time input as a naive local timestamp.
pub fn parse_input(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
}

fn local_to_utc(naive: NaiveDateTime) -> Option<chrono::DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}
