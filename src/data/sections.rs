use std::ops::Range;

use crate::data::model::is_identity_column;
use crate::error::SurveyError;

// ---------------------------------------------------------------------------
// Section table: questionnaire section → question number range
// ---------------------------------------------------------------------------

/// Sentinel section label selecting every column of the dataset.
pub const ALL_QUESTIONS: &str = "Todas las preguntas";

/// Question numbers covered by each section of the questionnaire.
/// Question columns follow the `"<n>- <text>"` naming convention.
const SECTIONS: [(&str, Range<u32>); 9] = [
    ("SECCIÓN I: Caracterización de la Población", 1..12),
    (
        "Parte I.I: Caracterización de estudiantes en educación media, a nivel nacional",
        1..5,
    ),
    (
        "Parte I.II: Caracterización de estudiantes de pregrado de su universidad",
        5..12,
    ),
    ("SECCIÓN II: Actividades de Promoción de Carreras STEM", 12..22),
    ("SECCIÓN III: Actividades de Apoyo Financiero", 22..26),
    (
        "SECCIÓN IV: Actividades para Evaluar la Permanencia Estudiantil",
        26..29,
    ),
    ("SECCIÓN V: Actividades con Perspectiva de Género", 29..33),
    (
        "SECCIÓN VI: Caracterización del Staff encargado de la promoción de carreras STEM",
        33..40,
    ),
    ("SECCIÓN VII: Preguntas de Cierre", 40..42),
];

/// All selectable section labels, the sentinel first (UI combo order).
pub fn section_labels() -> Vec<&'static str> {
    let mut labels = vec![ALL_QUESTIONS];
    labels.extend(SECTIONS.iter().map(|(label, _)| *label));
    labels
}

/// Resolve a section label to the matching subset of `columns`.
///
/// The sentinel resolves to every column unchanged. Any other label keeps the
/// columns whose name starts with `"<n>-"` for a question number `n` in the
/// section's range, plus the identity columns so downstream grouping always
/// has them. Order is preserved from the input.
pub fn resolve(columns: &[String], label: &str) -> Result<Vec<String>, SurveyError> {
    if label == ALL_QUESTIONS {
        return Ok(columns.to_vec());
    }

    let range = SECTIONS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, range)| range.clone())
        .ok_or_else(|| SurveyError::InvalidSection {
            label: label.to_string(),
        })?;

    let prefixes: Vec<String> = range.map(|n| format!("{n}-")).collect();

    Ok(columns
        .iter()
        .filter(|col| {
            is_identity_column(col) || prefixes.iter().any(|p| col.starts_with(p.as_str()))
        })
        .cloned()
        .collect())
}
