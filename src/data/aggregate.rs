use std::collections::HashMap;

use super::filter::FilteredView;
use super::model::is_identity_column;

// ---------------------------------------------------------------------------
// Frequency tables for the chart panel
// ---------------------------------------------------------------------------

/// Count occurrences of each distinct non-null value in `column`.
///
/// Ordered by descending count; ties keep first-seen order (stable sort over
/// the insertion-ordered accumulator). A missing column or one holding only
/// blanks yields an empty table, not an error.
pub fn count_by(view: &FilteredView, column: &str) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for rec in &view.records {
        let val = rec.get(column);
        if val.is_null() {
            continue;
        }
        let label = val.to_string();
        match index.get(&label) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(label.clone(), counts.len());
                counts.push((label, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// The column charted as "accepted responses": the first non-identity column
/// of the view. `None` when the view holds identity columns only.
pub fn acceptance_column(view: &FilteredView) -> Option<&str> {
    view.columns
        .iter()
        .find(|col| !is_identity_column(col))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, SurveyRecord, COUNTRY_COLUMN, INSTITUTION_COLUMN};
    use std::collections::BTreeMap;

    fn view(rows: &[Option<&str>]) -> FilteredView {
        let records = rows
            .iter()
            .map(|v| {
                let mut m = BTreeMap::new();
                if let Some(s) = v {
                    m.insert(
                        INSTITUTION_COLUMN.to_string(),
                        CellValue::String(s.to_string()),
                    );
                }
                SurveyRecord::new(m)
            })
            .collect();
        FilteredView {
            columns: vec![INSTITUTION_COLUMN.to_string()],
            records,
        }
    }

    #[test]
    fn counts_sum_to_non_null_values_and_sort_descending() {
        let v = view(&[
            Some("PUCP"),
            Some("U. Andes"),
            Some("PUCP"),
            None,
            Some("PUCP"),
            Some("U. Andes"),
        ]);
        let counts = count_by(&v, INSTITUTION_COLUMN);

        assert_eq!(
            counts,
            vec![("PUCP".to_string(), 3), ("U. Andes".to_string(), 2)]
        );
        let total: u64 = counts.iter().map(|(_, c)| c).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let v = view(&[Some("B"), Some("A"), Some("A"), Some("B")]);
        let counts = count_by(&v, INSTITUTION_COLUMN);
        assert_eq!(counts, vec![("B".to_string(), 2), ("A".to_string(), 2)]);
    }

    #[test]
    fn all_null_column_yields_empty_table() {
        let v = view(&[None, None]);
        assert!(count_by(&v, INSTITUTION_COLUMN).is_empty());
        assert!(count_by(&v, "no existe").is_empty());
    }

    #[test]
    fn acceptance_column_skips_identity_columns() {
        let v = FilteredView {
            columns: vec![
                COUNTRY_COLUMN.to_string(),
                INSTITUTION_COLUMN.to_string(),
                "12- ¿Realiza actividades de promoción STEM?".to_string(),
            ],
            records: vec![],
        };
        assert_eq!(
            acceptance_column(&v),
            Some("12- ¿Realiza actividades de promoción STEM?")
        );

        let identity_only = FilteredView {
            columns: vec![COUNTRY_COLUMN.to_string(), INSTITUTION_COLUMN.to_string()],
            records: vec![],
        };
        assert_eq!(acceptance_column(&identity_only), None);
    }
}
