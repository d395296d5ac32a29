//! Status bar panel — bottom bar showing mode, fetch stats, and error info.

use crate::frontend::state::UiState;
use egui::{Color32, RichText, Ui};

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, state: &UiState) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let (mode_color, mode_text) = if !state.backend_alive {
            (Color32::RED, "Stopped")
        } else if state.filtered {
            (Color32::YELLOW, "Filtered")
        } else {
            (Color32::GREEN, "Live")
        };
        ui.colored_label(mode_color, "●");
        ui.label(RichText::new(mode_text).small());

        ui.separator();

        let stats = &state.stats;
        ui.label(RichText::new(format!("Fetches: {}", stats.fetches_ok)).small());

        ui.separator();

        let error_color = if stats.fetches_failed > 0 {
            Color32::LIGHT_RED
        } else {
            Color32::GRAY
        };
        ui.colored_label(
            error_color,
            RichText::new(format!("Failed: {}", stats.fetches_failed)).small(),
        );

        ui.separator();

        ui.label(RichText::new(format!("Samples: {}", stats.samples_received)).small());

        ui.separator();

        ui.label(RichText::new(format!("Last: {} ms", stats.last_fetch_ms)).small());

        // Error message, right-aligned
        if let Some(error) = &state.last_error {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.colored_label(Color32::RED, RichText::new(error).small());
            });
        }
    });
}
