//! Feedwatch - Main Entry Point
//!
//! Desktop dashboard for cat-feeder weight readings and feed predictions.

use feedwatch::{backend::FeedBackend, config::AppConfig, frontend::FeedWatchApp};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,feedwatch=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting feedwatch");

    let config = AppConfig::load_or_default();
    tracing::info!(service = %config.server.base_url, "Using feeder service");

    // Spawn the poll worker thread
    let (backend, handle) = FeedBackend::new(config.clone());
    let worker_handle = std::thread::spawn(move || backend.run());

    // Configure eframe options
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 600.0])
            .with_min_inner_size([640.0, 400.0])
            .with_title("Feedwatch"),
        ..Default::default()
    };

    // Run the eframe application; the app shuts the worker down on exit
    let result = eframe::run_native(
        "Feedwatch",
        native_options,
        Box::new(|cc| Ok(Box::new(FeedWatchApp::new(cc, handle, &config)))),
    );

    tracing::info!("Shutting down...");
    let _ = worker_handle.join();

    result
}
