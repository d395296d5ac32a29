//! Backend module for feeder-service polling
//!
//! This module handles all feeder-service communication in a separate thread
//! to keep the UI responsive. It uses crossbeam channels for thread-safe
//! communication with the frontend.
//!
//! # Architecture
//!
//! The backend runs in a separate thread from the UI, communicating via
//! channels:
//!
//! - [`BackendCommand`] - Messages sent from UI to backend (filter, refresh, clear)
//! - [`BackendMessage`] - Messages sent from backend to UI (chart data, notices)
//! - [`FrontendHandle`] - UI-side handle for sending commands and receiving messages
//! - [`FeedBackend`] - Main backend entry point, run on a dedicated thread
//!
//! # Components
//!
//! - [`FeederApi`] - Transport seam between the poll worker and the service
//! - [`HttpFeederApi`] - Production HTTP transport
//! - [`MockFeederApi`] - Generated-data transport (feature-gated)
//! - [`PollWorker`] - Main worker loop: refresh state machine + fetch cycles
//!
//! # Example
//!
//! ```ignore
//! use feedwatch::backend::FeedBackend;
//! use feedwatch::config::AppConfig;
//!
//! let config = AppConfig::default();
//! let (backend, frontend) = FeedBackend::new(config);
//!
//! std::thread::spawn(move || backend.run());
//!
//! frontend.refresh();
//! for msg in frontend.drain() {
//!     // apply to UI state
//! }
//! ```

pub mod api;
pub mod http;
#[cfg(feature = "mock-feeder")]
pub mod mock;
pub mod worker;

pub use api::FeederApi;
pub use http::HttpFeederApi;
#[cfg(feature = "mock-feeder")]
pub use mock::MockFeederApi;
pub use worker::PollWorker;

use crate::config::AppConfig;
use crate::types::{ChartSeries, FetchStats, Prediction, TimeRange};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Channel capacity for both directions
const CHANNEL_CAPACITY: usize = 256;

/// Message sent from the UI to the backend
#[derive(Debug, Clone)]
pub enum BackendCommand {
    /// Pin an explicit time window and fetch it immediately (enters Filtered mode)
    SetFilter(TimeRange),
    /// Run a fetch cycle now with the current effective range
    Refresh,
    /// Reset to Live mode anchored at this instant; clears chart and prediction
    Clear,
    /// Swap between the HTTP transport and the generated-data transport
    #[cfg(feature = "mock-feeder")]
    UseMockFeeder(bool),
    /// Stop the worker loop
    Shutdown,
}

/// Message sent from the backend to the UI
#[derive(Debug, Clone)]
pub enum BackendMessage {
    /// A fetch cycle produced a new full chart series (replace, never append)
    ChartUpdated(ChartSeries),
    /// Chart and prediction display must be emptied immediately
    ChartCleared,
    /// A fresh prediction for the most recently charted range
    PredictionUpdated(Prediction),
    /// Transient user-facing notice (toast)
    Notice { message: String, is_error: bool },
    /// Updated fetch counters for the status bar
    Stats(FetchStats),
    /// Worker has exited
    Shutdown,
}

/// UI-side handle: typed command senders plus a non-blocking message drain.
pub struct FrontendHandle {
    command_tx: Sender<BackendCommand>,
    message_rx: Receiver<BackendMessage>,
    running: Arc<AtomicBool>,
}

impl FrontendHandle {
    /// Pin a time window and fetch it immediately.
    pub fn set_filter(&self, range: TimeRange) {
        self.send(BackendCommand::SetFilter(range));
    }

    /// Trigger a fetch cycle with the current effective range.
    pub fn refresh(&self) {
        self.send(BackendCommand::Refresh);
    }

    /// Clear the chart and return to Live mode anchored at now.
    pub fn clear(&self) {
        self.send(BackendCommand::Clear);
    }

    /// Swap the worker's transport at runtime.
    #[cfg(feature = "mock-feeder")]
    pub fn use_mock_feeder(&self, enabled: bool) {
        self.send(BackendCommand::UseMockFeeder(enabled));
    }

    /// Signal the worker to stop.
    pub fn shutdown(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.send(BackendCommand::Shutdown);
    }

    /// Drain all pending backend messages without blocking.
    pub fn drain(&self) -> Vec<BackendMessage> {
        self.message_rx.try_iter().collect()
    }

    fn send(&self, command: BackendCommand) {
        if let Err(e) = self.command_tx.try_send(command) {
            tracing::warn!("Dropping backend command: {}", e);
        }
    }
}

/// Main backend entry point. Owns the [`PollWorker`]; run on its own thread.
pub struct FeedBackend {
    worker: PollWorker,
}

impl FeedBackend {
    /// Create a backend with the production HTTP transport.
    pub fn new(config: AppConfig) -> (Self, FrontendHandle) {
        let api = Box::new(HttpFeederApi::new(&config.server));
        Self::with_api(config, api)
    }

    /// Create a backend with an explicit transport (tests, mock feeder).
    pub fn with_api(config: AppConfig, api: Box<dyn FeederApi>) -> (Self, FrontendHandle) {
        let (command_tx, command_rx) = bounded(CHANNEL_CAPACITY);
        let (message_tx, message_rx) = bounded(CHANNEL_CAPACITY);
        let running = Arc::new(AtomicBool::new(true));

        let worker = PollWorker::new(config, api, command_rx, message_tx, running.clone());
        let handle = FrontendHandle {
            command_tx,
            message_rx,
            running,
        };

        (Self { worker }, handle)
    }

    /// Run the worker loop until shutdown. Consumes the backend.
    pub fn run(mut self) {
        self.worker.run();
    }
}
