use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::generate_palette;
use crate::data::aggregate::{acceptance_column, count_by};
use crate::data::model::INSTITUTION_COLUMN;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart stack (central panel, below the table)
// ---------------------------------------------------------------------------

/// Staff-profile questions that get their own distribution chart whenever
/// they are present in the current view.
const STAFF_PROFILE_QUESTIONS: [&str; 4] = [
    "34- ¿Cuál es el promedio de años de experiencia del personal dedicado a las actividades de promoción de carreras STEM en su universidad?",
    "35- ¿Cuál es la edad promedio del personal dedicado a actividades de promoción de carreras STEM en su universidad?",
    "36- ¿Cuántas personas conforman el equipo dedicado a actividades de promoción de carreras STEM en su universidad?",
    "37- ¿Cuál es el porcentaje de mujeres dedicadas a actividades de promoción de carreras STEM en su universidad?",
];

/// Render every chart fed by the current view.
pub fn visualizations(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else { return };

    ui.add_space(12.0);
    ui.heading("Visualizaciones");

    let institution_counts = count_by(view, INSTITUTION_COLUMN);
    let colors: Vec<Color32> = institution_counts
        .iter()
        .map(|(label, _)| {
            state
                .institution_colors
                .as_ref()
                .map(|cm| cm.color_for(label))
                .unwrap_or(Color32::LIGHT_BLUE)
        })
        .collect();
    bar_chart(
        ui,
        "respuestas_por_universidad",
        "Número de Respuestas por Universidad",
        &institution_counts,
        Some(&colors),
    );

    if let Some(column) = acceptance_column(view) {
        let counts = count_by(view, column);
        bar_chart(
            ui,
            "respuestas_aceptadas",
            "Distribución de Respuestas Aceptadas",
            &counts,
            None,
        );
    }

    for question in STAFF_PROFILE_QUESTIONS {
        if view.columns.iter().any(|c| c == question) {
            let counts = count_by(view, question);
            bar_chart(
                ui,
                question,
                &format!("Distribución de respuestas para: {question}"),
                &counts,
                None,
            );
        }
    }
}

/// One bar per distinct value; the legend carries the value labels.
fn bar_chart(
    ui: &mut Ui,
    id: &str,
    title: &str,
    counts: &[(String, u64)],
    colors: Option<&[Color32]>,
) {
    ui.add_space(8.0);
    ui.strong(title);

    if counts.is_empty() {
        ui.label("Sin datos para graficar.");
        return;
    }

    let fallback = generate_palette(counts.len());

    Plot::new(id)
        .legend(Legend::default())
        .height(240.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        // The x positions are arbitrary indices; the legend names the bars.
        .show_axes([false, true])
        .y_axis_label("Número de Respuestas")
        .show(ui, |plot_ui| {
            for (i, (label, count)) in counts.iter().enumerate() {
                let color = colors
                    .and_then(|cs| cs.get(i).copied())
                    .unwrap_or(fallback[i]);
                let bar = Bar::new(i as f64, *count as f64).fill(color);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(label).color(color));
            }
        });
}
