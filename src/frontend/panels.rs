//! Reusable panel components: range controls and prediction display
//!
//! Panels borrow [`UiState`] and return [`AppAction`]s; the app translates
//! actions into backend commands in one place.

use crate::frontend::state::{AppAction, UiState};
use egui::{Color32, RichText, Ui};

/// Render the date-range controls. Returns the actions the user triggered.
pub fn render_controls(ui: &mut Ui, state: &mut UiState) -> Vec<AppAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.label("Start:");
        ui.add(
            egui::TextEdit::singleline(&mut state.start_input)
                .hint_text("YYYY-MM-DD HH:MM:SS")
                .desired_width(170.0),
        );

        ui.label("End:");
        ui.add(
            egui::TextEdit::singleline(&mut state.end_input)
                .hint_text("YYYY-MM-DD HH:MM:SS")
                .desired_width(170.0),
        );

        let both_parse = state.input_range().is_some();
        if ui
            .add_enabled(both_parse, egui::Button::new("Apply"))
            .clicked()
        {
            actions.push(AppAction::ApplyFilter);
        }

        ui.separator();

        if ui.button("Today").clicked() {
            actions.push(AppAction::ShowToday);
        }
        if ui.button("Yesterday").clicked() {
            actions.push(AppAction::ShowYesterday);
        }
        if ui.button("Clear").clicked() {
            actions.push(AppAction::Clear);
        }

        #[cfg(feature = "mock-feeder")]
        {
            ui.separator();
            let mut mock = state.mock_feeder;
            if ui.checkbox(&mut mock, "Mock feeder").changed() {
                actions.push(AppAction::ToggleMockFeeder(mock));
            }
        }
    });

    actions
}

/// Render the prediction panel: predicted amount and confidence.
pub fn render_prediction(ui: &mut Ui, state: &UiState) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("Next feed:").strong());
        match &state.prediction {
            Some(prediction) => {
                ui.label(
                    RichText::new(prediction.amount_text())
                        .strong()
                        .color(Color32::from_rgb(120, 200, 255)),
                );
                ui.label(RichText::new(prediction.confidence_text()).small());
            }
            None => {
                ui.label(RichText::new("—").weak());
            }
        }
    });
}
