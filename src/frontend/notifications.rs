//! Transient toast notifications
//!
//! Notices from the backend (fetch failures, "no data", clear confirmations)
//! are shown as stacked toasts in the top-right corner and auto-dismissed
//! after five seconds. Repeating the most recent message refreshes its
//! timer instead of stacking a duplicate, so a quiet range polled every
//! second shows one steady notice rather than a column of them.

use egui::{Align2, Color32, Context, RichText};
use std::time::{Duration, Instant};

/// How long a toast stays visible.
const TOAST_TTL: Duration = Duration::from_secs(5);

/// One transient message.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub is_error: bool,
    created: Instant,
}

/// Fixed-order stack of live toasts.
#[derive(Debug, Default)]
pub struct ToastStack {
    toasts: Vec<Toast>,
}

impl ToastStack {
    /// Add a toast, or refresh the timer of an identical trailing one.
    pub fn push(&mut self, message: impl Into<String>, is_error: bool) {
        self.push_at(message, is_error, Instant::now());
    }

    fn push_at(&mut self, message: impl Into<String>, is_error: bool, now: Instant) {
        let message = message.into();
        if let Some(last) = self.toasts.last_mut() {
            if last.message == message && last.is_error == is_error {
                last.created = now;
                return;
            }
        }
        self.toasts.push(Toast {
            message,
            is_error,
            created: now,
        });
    }

    /// Drop expired toasts.
    pub fn prune(&mut self) {
        self.prune_at(Instant::now());
    }

    fn prune_at(&mut self, now: Instant) {
        self.toasts
            .retain(|toast| now.duration_since(toast.created) < TOAST_TTL);
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Prune and draw the stack as a floating overlay.
    pub fn show(&mut self, ctx: &Context) {
        self.prune();
        if self.toasts.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toast_stack"))
            .anchor(Align2::RIGHT_TOP, [-12.0, 12.0])
            .interactable(false)
            .show(ctx, |ui| {
                for toast in &self.toasts {
                    let fill = if toast.is_error {
                        Color32::from_rgb(140, 30, 30)
                    } else {
                        Color32::from_rgb(30, 110, 50)
                    };
                    egui::Frame::default()
                        .fill(fill)
                        .corner_radius(4.0)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new(&toast.message).color(Color32::WHITE));
                        });
                    ui.add_space(4.0);
                }
            });
    }
}
