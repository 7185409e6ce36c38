use std::collections::BTreeSet;

use crate::color::ColorMap;
use crate::data::filter::{self, FilterCriteria, FilteredView};
use crate::data::links::annotate_links;
use crate::data::model::{SurveyDataset, DOCUMENT_LINK_COLUMN};

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering. Filter selections
/// persist across recomputation cycles and reset to defaults on request;
/// nothing else in the application is mutable.
pub struct AppState {
    /// Loaded dataset (None until the user opens a file).
    pub dataset: Option<SurveyDataset>,

    /// The user's current filter selections.
    pub criteria: FilterCriteria,

    /// The filtered view under the current criteria (cached per change).
    pub view: Option<FilteredView>,

    /// Colors for the per-institution chart bars.
    pub institution_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            criteria: FilterCriteria::default(),
            view: None,
            institution_colors: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, select everything, compute the view.
    pub fn set_dataset(&mut self, dataset: SurveyDataset) {
        self.criteria = filter::init_criteria(&dataset);
        self.institution_colors = Some(ColorMap::new(&dataset.institutions()));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Reset every filter to its default (everything selected).
    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria = filter::init_criteria(ds);
        } else {
            self.criteria = FilterCriteria::default();
        }
        self.refilter();
    }

    /// Recompute the cached view from the current criteria.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            self.view = None;
            return;
        };
        match filter::apply(ds, &self.criteria) {
            Ok(view) => {
                self.view = Some(annotate_links(view, &[DOCUMENT_LINK_COLUMN]));
            }
            Err(e) => {
                // Section labels come from the fixed combo list, so this is
                // unreachable through the UI; surface it instead of crashing.
                log::error!("filter failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.view = None;
            }
        }
    }

    /// Institution options under the current country selection (cascading).
    pub fn institution_options(&self) -> Vec<String> {
        self.dataset
            .as_ref()
            .map(|ds| filter::institutions_in(ds, &self.criteria.countries))
            .unwrap_or_default()
    }

    /// Toggle one country. The institution options cascade from the country
    /// selection, so the institution set is re-derived and fully selected.
    pub fn toggle_country(&mut self, country: &str) {
        if !self.criteria.countries.remove(country) {
            self.criteria.countries.insert(country.to_string());
        }
        self.criteria.institutions = self.institution_options().into_iter().collect();
        self.refilter();
    }

    /// Toggle one institution.
    pub fn toggle_institution(&mut self, institution: &str) {
        if !self.criteria.institutions.remove(institution) {
            self.criteria.institutions.insert(institution.to_string());
        }
        self.refilter();
    }

    /// Select every country (and, cascading, every institution).
    pub fn select_all_countries(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria.countries = ds.countries().into_iter().collect();
            self.criteria.institutions = self.institution_options().into_iter().collect();
            self.refilter();
        }
    }

    /// Deselect every country. Leaves the institution selection untouched;
    /// the empty country set already empties the view.
    pub fn select_no_countries(&mut self) {
        self.criteria.countries = BTreeSet::new();
        self.refilter();
    }

    pub fn select_all_institutions(&mut self) {
        self.criteria.institutions = self.institution_options().into_iter().collect();
        self.refilter();
    }

    pub fn select_no_institutions(&mut self) {
        self.criteria.institutions = BTreeSet::new();
        self.refilter();
    }

    /// Switch the question section.
    pub fn set_section(&mut self, section: String) {
        self.criteria.section = section;
        self.refilter();
    }

    /// Update the keyword filter.
    pub fn set_keyword(&mut self, keyword: String) {
        self.criteria.keyword = keyword;
        self.refilter();
    }

    /// Number of responses in the current view, for the top-bar summary.
    pub fn visible_count(&self) -> usize {
        self.view.as_ref().map(|v| v.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, SurveyRecord, COUNTRY_COLUMN, INSTITUTION_COLUMN};
    use std::collections::BTreeMap;

    fn record(country: &str, institution: &str) -> SurveyRecord {
        let mut values: BTreeMap<String, CellValue> = BTreeMap::new();
        values.insert(
            COUNTRY_COLUMN.to_string(),
            CellValue::String(country.to_string()),
        );
        values.insert(
            INSTITUTION_COLUMN.to_string(),
            CellValue::String(institution.to_string()),
        );
        SurveyRecord::new(values)
    }

    fn state() -> AppState {
        let ds = SurveyDataset::from_records(
            vec![COUNTRY_COLUMN.to_string(), INSTITUTION_COLUMN.to_string()],
            vec![
                record("Colombia", "U. Andes"),
                record("Colombia", "U. Nacional"),
                record("Perú", "PUCP"),
            ],
        );
        let mut st = AppState::default();
        st.set_dataset(ds);
        st
    }

    #[test]
    fn loading_a_dataset_selects_everything() {
        let st = state();
        assert_eq!(st.criteria.countries.len(), 2);
        assert_eq!(st.criteria.institutions.len(), 3);
        assert_eq!(st.visible_count(), 3);
    }

    #[test]
    fn deselecting_a_country_cascades_to_institution_options() {
        let mut st = state();
        st.toggle_country("Perú");

        assert_eq!(st.institution_options(), vec!["U. Andes", "U. Nacional"]);
        // Cascade re-selects all remaining options.
        assert_eq!(st.criteria.institutions.len(), 2);
        assert_eq!(st.visible_count(), 2);
    }

    #[test]
    fn reset_restores_the_default_selection() {
        let mut st = state();
        st.toggle_country("Perú");
        st.set_keyword("género".to_string());
        st.reset_filters();

        assert_eq!(st.criteria.countries.len(), 2);
        assert_eq!(st.criteria.keyword, "");
        assert_eq!(st.visible_count(), 3);
    }

    #[test]
    fn select_none_empties_the_view_without_erroring() {
        let mut st = state();
        st.select_no_countries();
        assert_eq!(st.visible_count(), 0);
        assert!(st.view.is_some());
    }
}
