//! # Feedwatch: Cat Feeder Dashboard
//!
//! A desktop dashboard that polls a cat-feeder service for bowl weight
//! readings and predicted feed amounts, and renders them as a time-series
//! chart with simple date-range filtering.
//!
//! ## Architecture
//!
//! - **Backend**: polls the feeder service over HTTP in a separate thread
//!   and owns the Live/Filtered refresh state machine
//! - **Frontend**: renders the UI using eframe/egui with egui_plot for the
//!   weight chart
//! - **Communication**: crossbeam channels for thread-safe data transfer
//!
//! ## Configuration
//!
//! Settings (service URL, poll cadence, chart bounds) are stored in the
//! platform-appropriate data directory under `feedwatch`:
//!
//! - **Linux**: `~/.local/share/feedwatch/feedwatch.toml`
//! - **macOS**: `~/Library/Application Support/feedwatch/feedwatch.toml`
//! - **Windows**: `%APPDATA%\feedwatch\feedwatch.toml`
//!
//! ## Example
//!
//! ```ignore
//! use feedwatch::{backend::FeedBackend, config::AppConfig, frontend::FeedWatchApp};
//!
//! fn main() -> eframe::Result<()> {
//!     let config = AppConfig::load_or_default();
//!     let (backend, handle) = FeedBackend::new(config.clone());
//!
//!     std::thread::spawn(move || backend.run());
//!
//!     eframe::run_native(
//!         "Feedwatch",
//!         eframe::NativeOptions::default(),
//!         Box::new(|cc| Ok(Box::new(FeedWatchApp::new(cc, handle, &config)))),
//!     )
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod frontend;
pub mod timestamp;
pub mod types;

// Re-export commonly used types
pub use backend::{BackendCommand, BackendMessage, FeedBackend, FeederApi, FrontendHandle};
pub use config::AppConfig;
pub use error::{FeedError, Result};
pub use frontend::FeedWatchApp;
pub use types::{ChartSeries, FetchStats, Prediction, TimeRange, WeightSample};
