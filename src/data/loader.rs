use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use calamine::{open_workbook_auto, DataType, Reader};
use serde_json::Value as JsonValue;

use super::model::{
    CellValue, SurveyDataset, SurveyRecord, CONSENT_ACCEPTED, CONSENT_COLUMN, COUNTRY_COLUMN,
    DROPPED_COLUMNS, INSTITUTION_COLUMN,
};
use crate::error::SurveyError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a survey-response dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xls` – the forms export (recommended)
/// * `.csv`           – header row with column names, one response per row
/// * `.json`          – `[{ "País": "...", "Universidad": "...", ... }, ...]`
///
/// Whatever the format, the dataset goes through the same load-time
/// normalization: required-column check, consent row pre-filter, noise
/// column removal, and institution-name cleanup. After that it is frozen
/// for the rest of the session.
pub fn load_file(path: &Path) -> Result<SurveyDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let (columns, records) = match ext.as_str() {
        "xlsx" | "xls" => load_xlsx(path)?,
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    finalize(columns, records)
}

// ---------------------------------------------------------------------------
// Load-time normalization
// ---------------------------------------------------------------------------

/// Required-column check, consent pre-filter, column drop, name cleanup.
fn finalize(
    mut columns: Vec<String>,
    mut records: Vec<SurveyRecord>,
) -> Result<SurveyDataset> {
    for required in [COUNTRY_COLUMN, INSTITUTION_COLUMN, CONSENT_COLUMN] {
        if !columns.iter().any(|c| c == required) {
            return Err(SurveyError::MissingRequiredColumn {
                column: required.to_string(),
            }
            .into());
        }
    }

    // Keep only institutions that opted in to data use.
    records.retain(|rec| rec.get(CONSENT_COLUMN).to_string() == CONSENT_ACCEPTED);

    // The consent answer is now uniform and the coordinator's personal data
    // has no business in the dashboard.
    columns.retain(|c| !DROPPED_COLUMNS.contains(&c.as_str()));
    for rec in &mut records {
        for dropped in DROPPED_COLUMNS {
            rec.values.remove(dropped);
        }
    }

    // Forms exports carry literal "\n" escapes inside institution names.
    for rec in &mut records {
        if let Some(CellValue::String(name)) = rec.values.get_mut(INSTITUTION_COLUMN) {
            *name = name
                .replace("\\n", " ")
                .replace('\n', " ")
                .trim()
                .to_string();
        }
    }

    let dataset = SurveyDataset::from_records(columns, records);
    log::info!(
        "loaded {} consenting responses across {} columns",
        dataset.len(),
        dataset.columns.len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// XLSX loader
// ---------------------------------------------------------------------------

fn load_xlsx(path: &Path) -> Result<(Vec<String>, Vec<SurveyRecord>)> {
    // open_workbook_auto sniffs the container, so legacy .xls exports work too.
    let mut workbook = open_workbook_auto(path).context("opening spreadsheet")?;

    let worksheets = workbook.worksheets();
    let range = match worksheets.as_slice() {
        [] => bail!("xlsx file contains no worksheets"),
        [(_, range)] => range,
        [(name, range), ..] => {
            log::warn!("xlsx file has several worksheets, reading '{name}'");
            range
        }
    };

    let mut rows = range.rows();
    let header = rows.next().context("xlsx file has no header row")?;

    // Column positions with a usable name; blank trailing headers are common
    // in forms exports and carry no data worth keeping.
    let columns_indexed: Vec<(usize, String)> = header
        .iter()
        .enumerate()
        .filter_map(|(idx, cell)| match cell {
            DataType::String(s) if !s.trim().is_empty() => Some((idx, s.trim().to_string())),
            _ => None,
        })
        .collect();

    let mut records = Vec::new();
    for row in rows {
        let mut values = BTreeMap::new();
        for (idx, name) in &columns_indexed {
            let value = row.get(*idx).map(excel_cell).unwrap_or(CellValue::Null);
            if !value.is_null() {
                values.insert(name.clone(), value);
            }
        }
        records.push(SurveyRecord::new(values));
    }

    let columns = columns_indexed.into_iter().map(|(_, name)| name).collect();
    Ok((columns, records))
}

fn excel_cell(cell: &DataType) -> CellValue {
    match cell {
        DataType::Int(i) => CellValue::Integer(*i),
        DataType::Float(f) => CellValue::Float(*f),
        DataType::String(s) if s.trim().is_empty() => CellValue::Null,
        DataType::String(s) => CellValue::String(s.trim().to_string()),
        DataType::Bool(b) => CellValue::Bool(*b),
        DataType::DateTime(serial) => CellValue::Date(serial.to_string()),
        _ => CellValue::Null,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, every other cell type-guessed.
fn load_csv(path: &Path) -> Result<(Vec<String>, Vec<SurveyRecord>)> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let mut values = BTreeMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            let Some(name) = headers.get(col_idx) else {
                continue;
            };
            let value = guess_cell_type(value);
            if !value.is_null() {
                values.insert(name.clone(), value);
            }
        }
        records.push(SurveyRecord::new(values));
    }

    Ok((headers, records))
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "País": "Colombia", "Universidad": "U. Andes", "1- ...": "..." },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<(Vec<String>, Vec<SurveyRecord>)> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut values = BTreeMap::new();
        for (key, val) in obj {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
            let value = json_to_cell(val);
            if !value.is_null() {
                values.insert(key.clone(), value);
            }
        }
        records.push(SurveyRecord::new(values));
    }

    Ok((columns, records))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) if s.trim().is_empty() => CellValue::Null,
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    fn csv_content() -> String {
        let header: Vec<String> = [
            "Marca temporal",
            CONSENT_COLUMN,
            COUNTRY_COLUMN,
            INSTITUTION_COLUMN,
            "1- ¿Cuántos estudiantes de educación media hay a nivel nacional?",
        ]
        .iter()
        .map(|h| format!("\"{h}\""))
        .collect();

        let mut out = header.join(",");
        out.push('\n');
        out.push_str("2024-06-20,\"Sí, estoy de acuerdo\",Colombia,\"Universidad de los Andes\\nBogotá\",520000\n");
        out.push_str("2024-06-21,\"No estoy de acuerdo\",Perú,PUCP,310000\n");
        out.push_str("2024-06-22,\"Sí, estoy de acuerdo\",Perú,PUCP,310000\n");
        out
    }

    #[test]
    fn csv_load_applies_consent_prefilter_and_drops_noise_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "respuestas.csv", &csv_content());

        let ds = load_file(&path).unwrap();
        // The dissenting row is gone, the consent column too.
        assert_eq!(ds.len(), 2);
        assert!(!ds.columns.iter().any(|c| c == CONSENT_COLUMN));
        assert!(ds.columns.iter().any(|c| c == COUNTRY_COLUMN));
    }

    #[test]
    fn institution_names_are_cleaned_of_escaped_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "respuestas.csv", &csv_content());

        let ds = load_file(&path).unwrap();
        assert!(ds
            .institutions()
            .contains(&"Universidad de los Andes Bogotá".to_string()));
    }

    #[test]
    fn missing_consent_column_fails_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "truncado.csv",
            "País,Universidad\nColombia,U. Andes\n",
        );

        let err = load_file(&path).unwrap_err();
        let survey_err = err.downcast_ref::<SurveyError>().unwrap();
        assert!(matches!(
            survey_err,
            SurveyError::MissingRequiredColumn { .. }
        ));
    }

    #[test]
    fn json_records_load_with_consent_prefilter() {
        let dir = tempfile::tempdir().unwrap();
        let json = format!(
            r#"[
              {{"{consent}": "{yes}", "País": "Chile", "Universidad": "U. de Chile", "2- Pregunta": 7}},
              {{"{consent}": "No", "País": "Chile", "Universidad": "UC", "2- Pregunta": null}}
            ]"#,
            consent = CONSENT_COLUMN,
            yes = CONSENT_ACCEPTED,
        );
        let path = write_temp(&dir, "respuestas.json", &json);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.countries(), vec!["Chile"]);
        assert_eq!(
            *ds.records[0].get("2- Pregunta"),
            CellValue::Integer(7)
        );
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "respuestas.parquet", "");
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn xlsx_written_by_the_exporter_loads_back() {
        use rust_xlsxwriter::Workbook;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("respuestas.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let header = [
            CONSENT_COLUMN,
            COUNTRY_COLUMN,
            INSTITUTION_COLUMN,
            "5- ¿Cuántos estudiantes de pregrado tiene su universidad?",
        ];
        for (col, name) in header.iter().enumerate() {
            sheet.write_string(0, col as u16, *name).unwrap();
        }
        sheet.write_string(1, 0, CONSENT_ACCEPTED).unwrap();
        sheet.write_string(1, 1, "México").unwrap();
        sheet.write_string(1, 2, "UNAM").unwrap();
        sheet.write_number(1, 3, 360000.0).unwrap();
        workbook.save(&path).unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.countries(), vec!["México"]);
        assert_eq!(
            *ds.records[0].get("5- ¿Cuántos estudiantes de pregrado tiene su universidad?"),
            CellValue::Float(360000.0)
        );
    }
}
