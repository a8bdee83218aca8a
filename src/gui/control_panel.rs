//! Control Panel Widget
//! Left side panel with data source info, refresh/export controls and status.

use egui::{Color32, RichText};

/// Left side panel with source details and the dashboard actions.
pub struct ControlPanel {
    pub source: String,
    pub model_name: Option<String>,
    pub error: Option<String>,
    pub status: String,
    pub is_busy: bool,
    pub export_enabled: bool,
    pub last_refresh: Option<String>,
}

impl ControlPanel {
    pub fn new(source: String) -> Self {
        Self {
            source,
            model_name: None,
            error: None,
            status: "Pronto".to_string(),
            is_busy: false,
            export_enabled: false,
            last_refresh: None,
        }
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Fetch failure banner. Cleared on the next successful run.
    pub fn set_error(&mut self, error: &str) {
        self.error = Some(format!("Erro ao carregar dados: {}", error));
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("♻ Percepções")
                    .size(22.0)
                    .color(Color32::from_rgb(40, 167, 69)),
            );
            ui.label(
                RichText::new("Nuvem de palavras do questionário")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Fonte de dados").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.add(egui::Label::new(RichText::new(&self.source).size(11.0)).wrap());
                if let Some(when) = &self.last_refresh {
                    ui.label(
                        RichText::new(format!("Atualizado: {}", when))
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                }
            });

        if let Some(model) = &self.model_name {
            ui.add_space(8.0);
            ui.label(RichText::new(format!("Modelo carregado: {}", model)).size(12.0));
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(!self.is_busy, |ui| {
                let button = egui::Button::new(RichText::new("⟳ Atualizar").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Refresh;
                }
            });

            ui.add_space(8.0);

            ui.add_enabled_ui(self.export_enabled && !self.is_busy, |ui| {
                let export_button = egui::Button::new(RichText::new("💾 Exportar").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(export_button).clicked() {
                    action = ControlPanelAction::Export;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📊 Estado").size(14.0).strong());
        ui.add_space(5.0);

        if self.is_busy {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new(&self.status).size(11.0).color(Color32::GRAY));
            });
        } else {
            ui.label(RichText::new(&self.status).size(11.0).color(Color32::GRAY));
        }

        if let Some(error) = &self.error {
            ui.add_space(8.0);
            egui::Frame::none()
                .fill(Color32::from_rgb(80, 20, 24))
                .rounding(5.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.add(
                        egui::Label::new(
                            RichText::new(error)
                                .size(12.0)
                                .color(Color32::from_rgb(220, 53, 69)),
                        )
                        .wrap(),
                    );
                });
        }

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Refresh,
    Export,
}
