use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EncuestaViewerApp {
    pub state: AppState,
}

impl Default for EncuestaViewerApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for EncuestaViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters + export ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: filtered table + charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(view) = self.state.view.clone() else {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Abra un archivo para ver las respuestas  (Archivo → Abrir…)");
                });
                return;
            };

            egui::ScrollArea::vertical()
                .id_salt("panel_central")
                .auto_shrink([false, false])
                .show(ui, |ui: &mut egui::Ui| {
                    table::filtered_table(ui, &view);
                    charts::visualizations(ui, &self.state);
                });
        });
    }
}
