//! Poll worker thread implementation
//!
//! This module contains the main worker loop that runs in a separate thread
//! and owns the refresh state machine. It communicates with the UI thread
//! through crossbeam channels.
//!
//! # Responsibilities
//!
//! - **Command processing**: filter changes, explicit refreshes, clears
//! - **Cadence control**: automatic cycles in Live mode at the configured
//!   interval, suppressed entirely in Filtered mode
//! - **Fetch cycles**: weights → chart series → prediction, with the
//!   empty-result short-circuit
//! - **Statistics**: fetch outcome counters for the status bar
//!
//! # Serialization of refreshes
//!
//! Each fetch cycle runs synchronously on this thread, so cycles can never
//! overlap: a timer tick that would land mid-fetch is absorbed, and the next
//! loop iteration re-evaluates the cadence. Commands arriving mid-cycle are
//! processed after the cycle completes, so the last write to chart state
//! always reflects the most recent user intent.

use crate::backend::api::FeederApi;
use crate::backend::{BackendCommand, BackendMessage};
use crate::config::AppConfig;
use crate::types::{ChartSeries, FetchStats, TimeRange};
use chrono::{DateTime, Utc};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "mock-feeder")]
use crate::backend::{HttpFeederApi, MockFeederApi};

/// Loop granularity between cadence checks.
const IDLE_SLEEP: Duration = Duration::from_millis(20);

/// Informational notice shown when a range has no samples.
const NO_DATA_MESSAGE: &str = "No data available for the selected range.";

/// Informational notice shown after a clear.
const CLEARED_MESSAGE: &str = "Chart cleared. New data will be shown from now.";

/// The poll worker: refresh state machine plus fetch-cycle execution.
pub struct PollWorker {
    /// Application configuration
    config: AppConfig,
    /// Command receiver from the UI
    command_rx: Receiver<BackendCommand>,
    /// Message sender to the UI
    message_tx: Sender<BackendMessage>,
    /// Running flag
    running: Arc<AtomicBool>,
    /// Feeder transport (HTTP or generated data)
    api: Box<dyn FeederApi>,
    /// Pinned window while in Filtered mode; `None` means Live mode
    filter: Option<TimeRange>,
    /// Instant of the last clear; anchors the Live range until the next clear
    last_clear: Option<DateTime<Utc>>,
    /// When the previous cycle ran; `None` forces an immediate first cycle
    last_cycle: Option<Instant>,
    /// Fetch outcome counters
    stats: FetchStats,
}

impl PollWorker {
    pub fn new(
        config: AppConfig,
        api: Box<dyn FeederApi>,
        command_rx: Receiver<BackendCommand>,
        message_tx: Sender<BackendMessage>,
        running: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            command_rx,
            message_tx,
            running,
            api,
            filter: None,
            last_clear: None,
            last_cycle: None,
            stats: FetchStats::default(),
        }
    }

    /// Run the main worker loop.
    pub fn run(&mut self) {
        tracing::info!(transport = %self.api.describe(), "Poll worker started");

        while self.running.load(Ordering::SeqCst) {
            if !self.process_commands() {
                break;
            }

            // Automatic cadence applies in Live mode only; Filtered mode
            // fetches exclusively on explicit commands.
            if self.filter.is_none() && self.cycle_due() {
                self.run_cycle();
            }

            std::thread::sleep(IDLE_SLEEP);
        }

        let _ = self.message_tx.try_send(BackendMessage::Shutdown);
        tracing::info!("Poll worker stopped");
    }

    /// Process pending commands. Returns false when the UI side is gone.
    fn process_commands(&mut self) -> bool {
        loop {
            match self.command_rx.try_recv() {
                Ok(command) => {
                    if !self.handle_command(command) {
                        return false;
                    }
                }
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => {
                    self.running.store(false, Ordering::SeqCst);
                    return false;
                }
            }
        }
    }

    /// Apply one command. Returns false on shutdown.
    fn handle_command(&mut self, command: BackendCommand) -> bool {
        match command {
            BackendCommand::SetFilter(range) => {
                tracing::debug!(?range, "Entering filtered mode");
                self.filter = Some(range);
                self.run_cycle();
            }
            BackendCommand::Refresh => {
                self.run_cycle();
            }
            BackendCommand::Clear => {
                self.last_clear = Some(Utc::now());
                self.filter = None;
                // Restart the cadence so the next fetch is one full interval
                // away, anchored at the clear instant.
                self.last_cycle = Some(Instant::now());
                self.send(BackendMessage::ChartCleared);
                self.notify(CLEARED_MESSAGE, false);
            }
            #[cfg(feature = "mock-feeder")]
            BackendCommand::UseMockFeeder(enabled) => {
                self.api = if enabled {
                    Box::new(MockFeederApi::new())
                } else {
                    Box::new(HttpFeederApi::new(&self.config.server))
                };
                tracing::info!(transport = %self.api.describe(), "Transport swapped");
            }
            BackendCommand::Shutdown => {
                self.running.store(false, Ordering::SeqCst);
                return false;
            }
        }
        true
    }

    /// True when Live mode owes an automatic cycle.
    fn cycle_due(&self) -> bool {
        let interval = Duration::from_millis(self.config.poll.interval_ms);
        self.last_cycle.map_or(true, |at| at.elapsed() >= interval)
    }

    /// The range the next cycle should fetch.
    fn effective_range(&self, now: DateTime<Utc>) -> TimeRange {
        match self.filter {
            Some(range) => range,
            None => TimeRange::live(self.last_clear, now, self.config.poll.live_window_secs),
        }
    }

    /// One fetch cycle: weights → chart series → prediction.
    ///
    /// Every failure is local to this cycle; the loop carries on regardless.
    fn run_cycle(&mut self) {
        self.last_cycle = Some(Instant::now());
        let range = self.effective_range(Utc::now());

        let started = Instant::now();
        let outcome = self.api.fetch_weights(&range);
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Err(e) => {
                tracing::warn!("Weights fetch failed: {}", e);
                self.stats.record_failure();
                self.notify(format!("Failed to fetch data: {}", e), true);
            }
            Ok(samples) if samples.is_empty() => {
                tracing::debug!(?range, "No samples in range");
                self.stats.record_empty(elapsed_ms);
                self.notify(NO_DATA_MESSAGE, false);
            }
            Ok(samples) => match ChartSeries::from_samples(&samples) {
                Err(e) => {
                    tracing::warn!("Weights response unusable: {}", e);
                    self.stats.record_failure();
                    self.notify(format!("Failed to read data: {}", e), true);
                }
                Ok(series) => {
                    self.stats.record_success(samples.len(), elapsed_ms);
                    tracing::debug!(points = series.len(), "Chart updated");
                    self.send(BackendMessage::ChartUpdated(series));
                    self.fetch_prediction(&range);
                }
            },
        }

        self.send(BackendMessage::Stats(self.stats));
    }

    /// Fetch and publish the prediction for the range just charted.
    /// On failure the prior prediction display stays untouched.
    fn fetch_prediction(&mut self, range: &TimeRange) {
        match self.api.fetch_prediction(range) {
            Ok(prediction) => self.send(BackendMessage::PredictionUpdated(prediction)),
            Err(e) => {
                tracing::warn!("Prediction fetch failed: {}", e);
                self.notify(format!("Failed to fetch prediction: {}", e), true);
            }
        }
    }

    fn notify(&self, message: impl Into<String>, is_error: bool) {
        self.send(BackendMessage::Notice {
            message: message.into(),
            is_error,
        });
    }

    fn send(&self, message: BackendMessage) {
        if let Err(e) = self.message_tx.try_send(message) {
            tracing::warn!("Dropping backend message: {}", e);
        }
    }
}
