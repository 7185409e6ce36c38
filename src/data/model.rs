use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Well-known columns of the questionnaire
// ---------------------------------------------------------------------------

/// Country identity column, always preserved through filtering.
pub const COUNTRY_COLUMN: &str = "País";

/// Institution identity column, always preserved through filtering.
pub const INSTITUTION_COLUMN: &str = "Universidad";

/// The consent question, matched by its full header text.
pub const CONSENT_COLUMN: &str = "Antes de comenzar la encuesta, es importante informarle que los datos proporcionados serán tratados de forma confidencial y utilizados únicamente para los fines del proyecto ELA4ATTRACT ¿Está de acuerdo con el tratamiento de sus datos para este propósito?";

/// Exact answer that opts an institution into data use.
pub const CONSENT_ACCEPTED: &str = "Sí, estoy de acuerdo";

/// Column holding links to supporting documents.
pub const DOCUMENT_LINK_COLUMN: &str = "Enlace a los documentos";

/// Columns removed at load time: the consent question (already enforced by
/// the row pre-filter) and personal data of the survey coordinator.
pub const DROPPED_COLUMNS: [&str; 3] = [
    CONSENT_COLUMN,
    "Nombre completo de quién coordina el diligenciamiento de la encuesta",
    "Correo electrónico institucional",
];

/// Whether a column is one of the two identity columns.
pub fn is_identity_column(name: &str) -> bool {
    name == COUNTRY_COLUMN || name == INSTITUTION_COLUMN
}

// ---------------------------------------------------------------------------
// CellValue – a single cell of a survey response
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring what spreadsheet readers produce.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date string kept as text for simplicity.
    Date(String),
    /// A document hyperlink produced by the link annotator.
    Link { text: String, url: String },
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
                Date(_) => 5,
                Link { .. } => 6,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) | (Date(a), Date(b)) => a.cmp(b),
            (Link { url: a, .. }, Link { url: b, .. }) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) | CellValue::Date(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Link { text, url } => {
                text.hash(state);
                url.hash(state);
            }
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Link { text, .. } => write!(f, "{text}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// SurveyRecord – one response row
// ---------------------------------------------------------------------------

/// A single survey response (one row of the source spreadsheet).
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyRecord {
    /// Dynamic columns: column_name → value. Absent key means a blank cell.
    pub values: BTreeMap<String, CellValue>,
}

impl SurveyRecord {
    pub fn new(values: BTreeMap<String, CellValue>) -> Self {
        SurveyRecord { values }
    }

    /// Value of a column, `Null` when the cell is blank.
    pub fn get(&self, column: &str) -> &CellValue {
        self.values.get(column).unwrap_or(&CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// SurveyDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset, immutable after the load-time consent pre-filter.
#[derive(Debug, Clone)]
pub struct SurveyDataset {
    /// All responses (rows).
    pub records: Vec<SurveyRecord>,
    /// Column names in file order. Order matters for display and export.
    pub columns: Vec<String>,
    /// For each column the sorted set of unique values.
    pub unique_values: BTreeMap<String, BTreeSet<CellValue>>,
}

impl SurveyDataset {
    /// Build the unique-value index from the loaded records.
    pub fn from_records(columns: Vec<String>, records: Vec<SurveyRecord>) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = BTreeMap::new();

        for rec in &records {
            for (col, val) in &rec.values {
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }
        SurveyDataset {
            records,
            columns,
            unique_values,
        }
    }

    /// Number of responses.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct non-null country values, sorted.
    pub fn countries(&self) -> Vec<String> {
        self.distinct_strings(COUNTRY_COLUMN)
    }

    /// Distinct non-null institution values, sorted.
    pub fn institutions(&self) -> Vec<String> {
        self.distinct_strings(INSTITUTION_COLUMN)
    }

    fn distinct_strings(&self, column: &str) -> Vec<String> {
        self.unique_values
            .get(column)
            .map(|vals| {
                vals.iter()
                    .filter(|v| !v.is_null())
                    .map(|v| v.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}
