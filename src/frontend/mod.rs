//! Frontend module for the egui UI
//!
//! This module provides the main UI components using eframe/egui. It
//! receives data from the poll worker through crossbeam channels and
//! renders it each frame.
//!
//! # Architecture
//!
//! The frontend never blocks on the network: every frame it drains pending
//! [`crate::backend::BackendMessage`]s into [`UiState`], renders the controls, chart,
//! prediction panel, status bar and toast overlay, and translates any
//! [`AppAction`]s the panels emitted into backend commands.
//!
//! # Submodules
//!
//! - [`state`] - UI state container and action types
//! - [`plot`] - Chart rendering with egui_plot
//! - `panels` - Range controls and prediction display
//! - [`notifications`] - Transient toast stack
//! - `status_bar` - Bottom bar with mode and fetch stats

pub mod notifications;
mod panels;
mod plot;
pub mod state;
mod status_bar;

pub use notifications::{Toast, ToastStack};
pub use plot::ChartView;
pub use state::{AppAction, UiState};

use crate::backend::FrontendHandle;
use crate::config::AppConfig;
use crate::types::TimeRange;
use std::time::Duration;

/// How often to repaint while idle, so backend messages keep draining.
const IDLE_REPAINT: Duration = Duration::from_millis(200);

/// Main application state for the feed monitor
pub struct FeedWatchApp {
    /// Handle to the poll worker
    handle: FrontendHandle,
    /// All UI-visible state
    state: UiState,
    /// Chart rendering configuration
    chart_view: ChartView,
}

impl FeedWatchApp {
    /// Create the application.
    pub fn new(_cc: &eframe::CreationContext<'_>, handle: FrontendHandle, config: &AppConfig) -> Self {
        Self {
            handle,
            state: UiState::default(),
            chart_view: ChartView::from_config(&config.chart),
        }
    }

    /// Drain pending backend messages into UI state.
    fn drain_messages(&mut self) {
        for message in self.handle.drain() {
            self.state.apply(message);
        }
    }

    /// Translate a panel action into input mutations and backend commands.
    fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::ApplyFilter => {
                if let Some(range) = self.state.input_range() {
                    self.state.filtered = true;
                    self.handle.set_filter(range);
                }
            }
            AppAction::ShowToday => {
                self.pin_calendar_day(chrono::Local::now().date_naive());
            }
            AppAction::ShowYesterday => {
                self.pin_calendar_day(chrono::Local::now().date_naive() - chrono::Duration::days(1));
            }
            AppAction::Clear => {
                // Empty the axes right away; the worker echoes ChartCleared
                // and re-anchors the Live range.
                self.state.chart.clear();
                self.state.prediction = None;
                self.state.filtered = false;
                self.state.clear_inputs();
                self.handle.clear();
            }
            #[cfg(feature = "mock-feeder")]
            AppAction::ToggleMockFeeder(enabled) => {
                self.state.mock_feeder = enabled;
                self.handle.use_mock_feeder(enabled);
            }
        }
    }

    /// Pin a full local calendar day: fill the inputs and enter Filtered mode.
    fn pin_calendar_day(&mut self, date: chrono::NaiveDate) {
        match TimeRange::calendar_day_local(date) {
            Ok(range) => {
                self.state.set_inputs(&range);
                self.state.filtered = true;
                self.handle.set_filter(range);
            }
            Err(e) => {
                tracing::warn!("Could not compute day bounds: {}", e);
                self.state.toasts.push(format!("Invalid day: {}", e), true);
            }
        }
    }
}

impl eframe::App for FeedWatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_messages();

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            actions.extend(panels::render_controls(ui, &mut self.state));
            ui.add_space(2.0);
            panels::render_prediction(ui, &self.state);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            status_bar::render_status_bar(ui, &self.state);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_view.render(ui, &self.state.chart);
        });

        self.state.toasts.show(ctx);

        for action in actions {
            self.handle_action(action);
        }

        // Keep draining even when the user is idle.
        ctx.request_repaint_after(IDLE_REPAINT);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.handle.shutdown();
    }
}
