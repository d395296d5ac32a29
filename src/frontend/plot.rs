//! Chart rendering module using egui_plot
//!
//! Renders the single weight series as a line chart. The x axis is the
//! sample index with time labels mapped through an axis formatter, so labels
//! stay evenly spaced however irregular the sample times are. The y axis is
//! inverted by plotting negated values and formatting the magnitude: a
//! fuller bowl (more grams) sits lower, so the line climbing means the food
//! is running out.

use crate::config::ChartConfig;
use crate::types::ChartSeries;
use egui::Ui;
use egui_plot::{Corner, Legend, Line, Plot, PlotPoints};

/// Series name shown in the legend.
const SERIES_NAME: &str = "Weight of Cat Food (g)";

/// Chart view configuration.
#[derive(Debug, Clone)]
pub struct ChartView {
    /// Draw smaller weights higher
    invert_y: bool,
    /// Suggested lower bound of the weight axis in grams
    suggested_min: f64,
    /// Suggested upper bound of the weight axis in grams
    suggested_max: f64,
    /// Line width
    line_width: f32,
}

impl ChartView {
    /// Create a view from chart configuration.
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            invert_y: config.invert_y,
            suggested_min: config.suggested_min_grams,
            suggested_max: config.suggested_max_grams,
            line_width: config.line_width,
        }
    }

    /// Sign applied to values before plotting.
    fn sign(&self) -> f64 {
        if self.invert_y {
            -1.0
        } else {
            1.0
        }
    }

    /// Render the chart into `ui`.
    pub fn render(&self, ui: &mut Ui, series: &ChartSeries) {
        let sign = self.sign();
        let points: Vec<[f64; 2]> = series
            .values()
            .iter()
            .enumerate()
            .map(|(index, weight)| [index as f64, sign * weight])
            .collect();

        let axis_labels = series.labels().to_vec();
        let hover_labels = series.labels().to_vec();

        Plot::new("weight_chart")
            .legend(Legend::default().position(Corner::RightTop))
            .include_y(sign * self.suggested_min)
            .include_y(sign * self.suggested_max)
            .x_axis_formatter(move |mark, _range| {
                let index = mark.value.round();
                if index < 0.0 || (mark.value - index).abs() > f64::EPSILON {
                    return String::new();
                }
                axis_labels
                    .get(index as usize)
                    .cloned()
                    .unwrap_or_default()
            })
            .y_axis_formatter(|mark, _range| format!("{:.0}", mark.value.abs()))
            .label_formatter(move |name, point| {
                let label = hover_labels
                    .get(point.x.round().max(0.0) as usize)
                    .map(String::as_str)
                    .unwrap_or("");
                if name.is_empty() {
                    format!("{}\n{:.1} g", label, point.y.abs())
                } else {
                    format!("{}\n{}\n{:.1} g", name, label, point.y.abs())
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(SERIES_NAME, PlotPoints::from(points)).width(self.line_width));
            });
    }
}
