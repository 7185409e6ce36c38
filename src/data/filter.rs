use std::collections::{BTreeMap, BTreeSet};

use super::model::{
    is_identity_column, CellValue, SurveyDataset, SurveyRecord, COUNTRY_COLUMN, INSTITUTION_COLUMN,
};
use super::sections;
use crate::error::SurveyError;

// ---------------------------------------------------------------------------
// Filter criteria: the user's current selections
// ---------------------------------------------------------------------------

/// Current filter selections. Lives in the session state and is the only
/// input (besides the dataset) to the filter pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Selected countries. An empty set yields an empty view.
    pub countries: BTreeSet<String>,
    /// Selected institutions. An empty set yields an empty view.
    pub institutions: BTreeSet<String>,
    /// Selected question section label.
    pub section: String,
    /// Case-insensitive substring matched against column names. Empty means
    /// no keyword filtering.
    pub keyword: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            countries: BTreeSet::new(),
            institutions: BTreeSet::new(),
            section: sections::ALL_QUESTIONS.to_string(),
            keyword: String::new(),
        }
    }
}

/// Initialise a [`FilterCriteria`] with every country and institution
/// selected (i.e., show everything).
pub fn init_criteria(dataset: &SurveyDataset) -> FilterCriteria {
    FilterCriteria {
        countries: dataset.countries().into_iter().collect(),
        institutions: dataset.institutions().into_iter().collect(),
        section: sections::ALL_QUESTIONS.to_string(),
        keyword: String::new(),
    }
}

/// Institutions observed among the rows matching `countries`.
///
/// Feeds the cascading institution selector: the options offered depend on
/// the current country selection, never on the full dataset.
pub fn institutions_in(dataset: &SurveyDataset, countries: &BTreeSet<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    for rec in &dataset.records {
        if !countries.contains(&rec.get(COUNTRY_COLUMN).to_string()) {
            continue;
        }
        let inst = rec.get(INSTITUTION_COLUMN);
        if !inst.is_null() {
            seen.insert(inst.to_string());
        }
    }
    seen.into_iter().collect()
}

// ---------------------------------------------------------------------------
// FilteredView: the derived row/column subset
// ---------------------------------------------------------------------------

/// The filtered result: a column and row subset of the dataset, recomputed
/// from scratch on every criteria change and discarded after render/export.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    /// Columns in dataset order. Always contains the identity columns.
    pub columns: Vec<String>,
    /// Surviving rows, narrowed to `columns`.
    pub records: Vec<SurveyRecord>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Value of `column` in row `row`, `Null` when blank or out of view.
    pub fn value(&self, row: usize, column: &str) -> &CellValue {
        self.records
            .get(row)
            .map(|rec| rec.get(column))
            .unwrap_or(&CellValue::Null)
    }
}

/// Apply `criteria` to `dataset`, producing the filtered view.
///
/// Pure: same inputs, same output, no side effects. Row predicates run
/// first, then the column subset (section, then keyword narrowing it).
/// The identity columns survive every step so grouping and aggregation
/// downstream never lose their keys.
pub fn apply(
    dataset: &SurveyDataset,
    criteria: &FilterCriteria,
) -> Result<FilteredView, SurveyError> {
    let mut columns = sections::resolve(&dataset.columns, &criteria.section)?;

    if !criteria.keyword.is_empty() {
        let needle = criteria.keyword.to_lowercase();
        columns.retain(|col| is_identity_column(col) || col.to_lowercase().contains(&needle));
    }

    let records = dataset
        .records
        .iter()
        .filter(|rec| {
            criteria
                .countries
                .contains(&rec.get(COUNTRY_COLUMN).to_string())
                && criteria
                    .institutions
                    .contains(&rec.get(INSTITUTION_COLUMN).to_string())
        })
        .map(|rec| narrow_record(rec, &columns))
        .collect();

    Ok(FilteredView { columns, records })
}

fn narrow_record(record: &SurveyRecord, columns: &[String]) -> SurveyRecord {
    let values: BTreeMap<String, CellValue> = columns
        .iter()
        .filter_map(|col| {
            record
                .values
                .get(col)
                .map(|val| (col.clone(), val.clone()))
        })
        .collect();
    SurveyRecord::new(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, institution: &str, extra: &[(&str, &str)]) -> SurveyRecord {
        let mut values: BTreeMap<String, CellValue> = BTreeMap::new();
        values.insert(
            COUNTRY_COLUMN.to_string(),
            CellValue::String(country.to_string()),
        );
        values.insert(
            INSTITUTION_COLUMN.to_string(),
            CellValue::String(institution.to_string()),
        );
        for (k, v) in extra {
            values.insert(k.to_string(), CellValue::String(v.to_string()));
        }
        SurveyRecord::new(values)
    }

    fn dataset() -> SurveyDataset {
        let q29 = "29- ¿Realiza actividades con perspectiva de género?";
        let q40 = "40- ¿Desea recibir los resultados del estudio?";
        SurveyDataset::from_records(
            vec![
                COUNTRY_COLUMN.to_string(),
                INSTITUTION_COLUMN.to_string(),
                q29.to_string(),
                q40.to_string(),
            ],
            vec![
                record("Colombia", "U. Andes", &[(q29, "Sí"), (q40, "Sí")]),
                record("Colombia", "U. Nacional", &[(q29, "No"), (q40, "Sí")]),
                record("Perú", "PUCP", &[(q29, "Sí"), (q40, "No")]),
            ],
        )
    }

    fn all_selected(ds: &SurveyDataset) -> FilterCriteria {
        init_criteria(ds)
    }

    #[test]
    fn default_criteria_keep_every_row_and_column() {
        let ds = dataset();
        let view = apply(&ds, &all_selected(&ds)).unwrap();
        assert_eq!(view.columns, ds.columns);
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn apply_is_deterministic() {
        let ds = dataset();
        let criteria = all_selected(&ds);
        assert_eq!(apply(&ds, &criteria).unwrap(), apply(&ds, &criteria).unwrap());
    }

    #[test]
    fn country_filter_keeps_only_matching_rows() {
        let ds = dataset();
        let mut criteria = all_selected(&ds);
        criteria.countries = BTreeSet::from(["Colombia".to_string()]);

        let view = apply(&ds, &criteria).unwrap();
        assert_eq!(view.len(), 2);
        for row in 0..view.len() {
            assert_eq!(view.value(row, COUNTRY_COLUMN).to_string(), "Colombia");
        }
        // Cascading policy: institution options come from the Colombia rows.
        assert_eq!(
            institutions_in(&ds, &criteria.countries),
            vec!["U. Andes", "U. Nacional"]
        );
    }

    #[test]
    fn empty_country_selection_yields_empty_view() {
        let ds = dataset();
        let mut criteria = all_selected(&ds);
        criteria.countries.clear();

        let view = apply(&ds, &criteria).unwrap();
        assert!(view.is_empty());
        // Not an error: columns are still available for an empty-state render.
        assert!(!view.columns.is_empty());
    }

    #[test]
    fn institution_filter_narrows_rows() {
        let ds = dataset();
        let mut criteria = all_selected(&ds);
        criteria.institutions = BTreeSet::from(["PUCP".to_string()]);

        let view = apply(&ds, &criteria).unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view.value(0, INSTITUTION_COLUMN).to_string(), "PUCP");
    }

    #[test]
    fn keyword_filters_columns_but_keeps_identity() {
        let ds = dataset();
        let mut criteria = all_selected(&ds);
        criteria.keyword = "género".to_string();

        let view = apply(&ds, &criteria).unwrap();
        assert_eq!(
            view.columns,
            vec![
                COUNTRY_COLUMN.to_string(),
                INSTITUTION_COLUMN.to_string(),
                "29- ¿Realiza actividades con perspectiva de género?".to_string(),
            ]
        );
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let ds = dataset();
        let mut criteria = all_selected(&ds);
        criteria.keyword = "GÉNERO".to_string();
        // 'É' lowercases to 'é', so the accented header still matches.
        let view = apply(&ds, &criteria).unwrap();
        assert_eq!(view.columns.len(), 3);
    }

    #[test]
    fn keyword_narrows_the_section_subset_instead_of_resetting_it() {
        let ds = dataset();
        let mut criteria = all_selected(&ds);
        criteria.section = "SECCIÓN VII: Preguntas de Cierre".to_string();
        criteria.keyword = "género".to_string();

        // Section VII has no género question, so only identity columns stay.
        let view = apply(&ds, &criteria).unwrap();
        assert_eq!(
            view.columns,
            vec![COUNTRY_COLUMN.to_string(), INSTITUTION_COLUMN.to_string()]
        );
    }

    #[test]
    fn view_rows_are_a_subset_and_universidad_is_always_present() {
        let ds = dataset();
        let mut criteria = all_selected(&ds);
        criteria.keyword = "nada-que-coincida".to_string();
        criteria.countries = BTreeSet::from(["Perú".to_string()]);

        let view = apply(&ds, &criteria).unwrap();
        assert!(view.len() <= ds.len());
        assert!(view.columns.iter().any(|c| c == INSTITUTION_COLUMN));
    }

    #[test]
    fn unknown_section_propagates_invalid_section() {
        let ds = dataset();
        let mut criteria = all_selected(&ds);
        criteria.section = "SECCIÓN Z".to_string();
        assert!(matches!(
            apply(&ds, &criteria),
            Err(SurveyError::InvalidSection { .. })
        ));
    }
}
