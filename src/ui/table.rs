use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::FilteredView;
use crate::data::model::CellValue;

// ---------------------------------------------------------------------------
// Filtered-data table (central panel)
// ---------------------------------------------------------------------------

/// Render the current filtered view as a table. An empty view renders its
/// header row only.
pub fn filtered_table(ui: &mut Ui, view: &FilteredView) {
    if view.columns.is_empty() {
        ui.label("Sin columnas que mostrar.");
        return;
    }

    egui::ScrollArea::horizontal()
        .id_salt("tabla_filtrada")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .max_scroll_height(360.0)
                .columns(Column::auto().at_least(120.0).clip(true), view.columns.len())
                .header(22.0, |mut header| {
                    for col in &view.columns {
                        header.col(|ui| {
                            ui.strong(col);
                        });
                    }
                })
                .body(|mut body| {
                    for rec in &view.records {
                        body.row(20.0, |mut row| {
                            for col in &view.columns {
                                row.col(|ui| {
                                    match rec.get(col) {
                                        CellValue::Link { text, url } => {
                                            ui.hyperlink_to(text, url);
                                        }
                                        other => {
                                            ui.label(other.to_string());
                                        }
                                    };
                                });
                            }
                        });
                    }
                });
        });

    if view.is_empty() {
        ui.label("Sin resultados para los filtros actuales.");
    }
}
