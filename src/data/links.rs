use super::filter::FilteredView;
use super::model::CellValue;

// ---------------------------------------------------------------------------
// Document-link annotation
// ---------------------------------------------------------------------------

/// Display text shown for a document hyperlink.
pub const LINK_DISPLAY_TEXT: &str = "Documento";

/// Placeholder shown when an institution provided no link.
pub const LINK_UNAVAILABLE: &str = "No disponible";

/// Rewrite the named columns of `view` into rendering-ready hyperlinks.
///
/// Non-null values become `CellValue::Link` with the fixed display text and
/// the original value as target; blank cells become the unavailable
/// placeholder. Idempotent: values that are already links pass through, so
/// annotating twice never double-wraps.
pub fn annotate_links(mut view: FilteredView, columns: &[&str]) -> FilteredView {
    let present: Vec<String> = view
        .columns
        .iter()
        .filter(|col| columns.contains(&col.as_str()))
        .cloned()
        .collect();

    for col in &present {
        for rec in &mut view.records {
            let annotated = match rec.values.get(col) {
                None | Some(CellValue::Null) => CellValue::String(LINK_UNAVAILABLE.to_string()),
                Some(CellValue::Link { text, url }) => CellValue::Link {
                    text: text.clone(),
                    url: url.clone(),
                },
                Some(other) => CellValue::Link {
                    text: LINK_DISPLAY_TEXT.to_string(),
                    url: other.to_string(),
                },
            };
            rec.values.insert(col.clone(), annotated);
        }
    }
    view
}
