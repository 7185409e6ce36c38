use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export;
use crate::data::sections;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filtros");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("Ningún archivo cargado.");
        return;
    }

    if ui.button("Restablecer Filtros").clicked() {
        state.reset_filters();
    }
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            country_filter(ui, state);
            institution_filter(ui, state);
            keyword_filter(ui, state);
            section_filter(ui, state);

            ui.separator();
            download_button(ui, state);
        });
}

fn country_filter(ui: &mut Ui, state: &mut AppState) {
    let Some(ds) = &state.dataset else { return };
    let options = ds.countries();
    let selected = state.criteria.countries.clone();

    let header = format!("Seleccione el país  ({}/{})", selected.len(), options.len());
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("filtro_pais")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("Todos").clicked() {
                    state.select_all_countries();
                }
                if ui.small_button("Ninguno").clicked() {
                    state.select_no_countries();
                }
            });
            for country in &options {
                let mut checked = selected.contains(country);
                if ui.checkbox(&mut checked, country).changed() {
                    state.toggle_country(country);
                }
            }
        });
}

fn institution_filter(ui: &mut Ui, state: &mut AppState) {
    // Cascading: only institutions of the selected countries are offered.
    let options = state.institution_options();
    let selected = state.criteria.institutions.clone();

    let header = format!(
        "Seleccione la universidad  ({}/{})",
        selected.iter().filter(|i| options.contains(i)).count(),
        options.len()
    );
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("filtro_universidad")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("Todas").clicked() {
                    state.select_all_institutions();
                }
                if ui.small_button("Ninguna").clicked() {
                    state.select_no_institutions();
                }
            });
            for institution in &options {
                let mut checked = selected.contains(institution);
                if ui.checkbox(&mut checked, institution).changed() {
                    state.toggle_institution(institution);
                }
            }
        });
}

fn keyword_filter(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.strong("Buscar por palabra clave");
    let mut keyword = state.criteria.keyword.clone();
    if ui.text_edit_singleline(&mut keyword).changed() {
        state.set_keyword(keyword);
    }
}

fn section_filter(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.strong("Filtre por sección de preguntas");
    let current = state.criteria.section.clone();
    egui::ComboBox::from_id_salt("filtro_seccion")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for label in sections::section_labels() {
                if ui.selectable_label(current == label, label).clicked() {
                    state.set_section(label.to_string());
                }
            }
        });
}

fn download_button(ui: &mut Ui, state: &mut AppState) {
    // Cloned so the export cannot hold a borrow across the status update.
    let Some(view) = state.view.clone() else { return };

    if ui.button("Descargar datos filtrados").clicked() {
        let target = rfd::FileDialog::new()
            .set_title("Guardar datos filtrados")
            .set_file_name(export::EXPORT_FILE_NAME)
            .add_filter("Excel", &["xlsx"])
            .save_file();

        if let Some(path) = target {
            match export::to_xlsx(&view).and_then(|bytes| {
                std::fs::write(&path, bytes).map_err(anyhow::Error::from)
            }) {
                Ok(()) => {
                    log::info!("exported {} rows to {}", view.len(), path.display());
                    state.status_message =
                        Some(format!("Exportado: {}", path.display()));
                }
                Err(e) => {
                    log::error!("export failed: {e:#}");
                    state.status_message = Some(format!("Error: {e:#}"));
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Archivo", |ui: &mut Ui| {
            if ui.button("Abrir…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} respuestas cargadas, {} visibles",
                ds.len(),
                state.visible_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir respuestas de la encuesta")
        .add_filter("Archivos soportados", &["xlsx", "xls", "csv", "json"])
        .add_filter("Excel", &["xlsx", "xls"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} responses with columns {:?}",
                    dataset.len(),
                    dataset.columns
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
