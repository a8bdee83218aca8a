//! Chart Plotter Module
//! Draws the interactive frequency chart using egui_plot.

use super::spec::BarChartSpec;
use egui::{Align2, Color32};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Text};

const BAR_WIDTH: f64 = 0.7;

pub struct ChartPlotter;

impl ChartPlotter {
    pub fn to_color32(rgb: [u8; 3]) -> Color32 {
        Color32::from_rgb(rgb[0], rgb[1], rgb[2])
    }

    /// Bar chart: one bar per term in spec order, value label above each bar.
    pub fn draw_bar_chart(ui: &mut egui::Ui, spec: &BarChartSpec, height: f32) {
        let x_labels: Vec<String> = spec.bars.iter().map(|b| b.label.clone()).collect();
        let max = spec.max_value() as f64;
        let label_offset = (max * 0.03).max(0.05);

        let bars: Vec<Bar> = spec
            .bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                Bar::new(i as f64, bar.value as f64)
                    .width(BAR_WIDTH)
                    .name(&bar.label)
                    .fill(Self::to_color32(bar.color))
            })
            .collect();

        Plot::new("frequency_chart")
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .show_grid([false, true])
            .x_axis_label(spec.x_label.as_str())
            .y_axis_label(spec.y_label.as_str())
            .include_y(0.0)
            .include_y(max * 1.15 + 0.5)
            .x_axis_formatter(move |mark, _range| {
                let v = mark.value;
                if v < 0.0 || (v - v.round()).abs() > 1e-6 {
                    return String::new();
                }
                x_labels.get(v.round() as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name(spec.y_label.as_str()));

                for (i, bar) in spec.bars.iter().enumerate() {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(i as f64, bar.value as f64 + label_offset),
                            bar.value.to_string(),
                        )
                        .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            });
    }
}
