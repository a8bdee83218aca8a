//! Chart Viewer Widget
//! Central panel with the word cloud card and the frequency chart card.
//! Cards sit side by side when the window is wide enough, stacked otherwise.

use crate::charts::{BarChartSpec, ChartPlotter};
use crate::refresh::DashboardSnapshot;
use egui::{Color32, RichText, ScrollArea, TextureHandle, TextureOptions};

const CHART_SPACING: f32 = 15.0;
const CARD_WIDTH: f32 = 620.0;
const CHART_HEIGHT: f32 = 420.0;

pub const WORD_CLOUD_TITLE: &str = "Opiniões — E-lixo";
pub const BAR_CHART_TITLE: &str = "Contagem de palavras";
pub const NO_DATA_TEXT: &str = "Sem dados suficientes.";

#[derive(Default)]
pub struct ChartViewer {
    word_cloud: Option<TextureHandle>,
    chart: Option<BarChartSpec>,
    /// Shown above the cards when the run produced nothing.
    pub message: Option<String>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.word_cloud = None;
        self.chart = None;
        self.message = None;
    }

    /// Upload the snapshot's raster and keep its chart spec.
    pub fn set_snapshot(&mut self, ctx: &egui::Context, snapshot: &DashboardSnapshot) {
        self.word_cloud = snapshot.word_cloud.as_ref().map(|img| {
            let size = [img.width() as usize, img.height() as usize];
            let image = egui::ColorImage::from_rgb(size, img.as_raw());
            ctx.load_texture("word_cloud", image, TextureOptions::LINEAR)
        });
        self.chart = snapshot.report.chart.clone();
        self.message = snapshot.report.status_message();
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        if let Some(message) = &self.message {
            ui.label(RichText::new(message).size(14.0).color(Color32::from_rgb(23, 162, 184)));
            ui.add_space(CHART_SPACING);
        }

        let side_by_side = ui.available_width() >= 2.0 * (CARD_WIDTH + CHART_SPACING);

        ScrollArea::vertical()
            .id_salt("chart_viewer")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if side_by_side {
                    ui.horizontal_top(|ui| {
                        self.draw_word_cloud_card(ui);
                        ui.add_space(CHART_SPACING);
                        self.draw_bar_chart_card(ui);
                    });
                } else {
                    self.draw_word_cloud_card(ui);
                    ui.add_space(CHART_SPACING);
                    self.draw_bar_chart_card(ui);
                }
            });
    }

    fn card(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(2.0, Color32::from_rgb(40, 167, 69)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(CARD_WIDTH - 24.0);
                ui.vertical(|ui| {
                    ui.label(RichText::new(title).size(18.0).strong());
                    ui.add_space(8.0);
                    add_contents(ui);
                });
            });
    }

    fn no_data(ui: &mut egui::Ui) {
        ui.allocate_ui(egui::vec2(ui.available_width(), CHART_HEIGHT), |ui| {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new(NO_DATA_TEXT).size(16.0).color(Color32::GRAY));
            });
        });
    }

    fn draw_word_cloud_card(&self, ui: &mut egui::Ui) {
        Self::card(ui, WORD_CLOUD_TITLE, |ui| match &self.word_cloud {
            Some(texture) => {
                ui.add(
                    egui::Image::new(texture)
                        .max_width(ui.available_width())
                        .max_height(CHART_HEIGHT)
                        .maintain_aspect_ratio(true),
                );
            }
            None => Self::no_data(ui),
        });
    }

    fn draw_bar_chart_card(&self, ui: &mut egui::Ui) {
        Self::card(ui, BAR_CHART_TITLE, |ui| match &self.chart {
            Some(spec) => ChartPlotter::draw_bar_chart(ui, spec, CHART_HEIGHT),
            None => Self::no_data(ui),
        });
    }
}
