//! Collapsible debug section under the charts.

use crate::analysis::DebugInfo;
use egui::{RichText, ScrollArea};

pub const DEBUG_TITLE: &str = "Informações de Depuração";

pub struct DebugPanel;

impl DebugPanel {
    pub fn show(ui: &mut egui::Ui, info: &DebugInfo) {
        egui::CollapsingHeader::new(RichText::new(DEBUG_TITLE).strong())
            .id_salt("debug_panel")
            .default_open(false)
            .show(ui, |ui| {
                ui.label(format!("Colunas: {}", info.columns.join(", ")));
                ui.add_space(5.0);

                ScrollArea::horizontal().id_salt("debug_preview").show(ui, |ui| {
                    ui.label(RichText::new(&info.preview).monospace().size(11.0));
                });
                ui.add_space(5.0);

                ui.label(format!("Tokens extraídos: {}", info.token_count));
                if !info.first_tokens.is_empty() {
                    ui.label(format!("Primeiros tokens: {}", info.first_tokens.join(", ")));
                }
            });
    }
}
