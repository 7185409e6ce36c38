use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Url, Workbook};

use super::filter::FilteredView;
use super::model::CellValue;

// ---------------------------------------------------------------------------
// Filtered-view export
// ---------------------------------------------------------------------------

/// Default file name offered by the download dialog.
pub const EXPORT_FILE_NAME: &str = "datos_filtrados.xlsx";

/// Serialize `view` to an xlsx byte buffer: one sheet named `Sheet1`, the
/// header row followed by the data rows in view order, no index column.
/// Link cells are written as real hyperlinks. An empty view produces a
/// header-only sheet.
pub fn to_xlsx(view: &FilteredView) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_fmt = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Sheet1").context("naming export sheet")?;

    for (col, name) in view.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header_fmt)?;
    }

    for (row, rec) in view.records.iter().enumerate() {
        let row = (row + 1) as u32;
        for (col, name) in view.columns.iter().enumerate() {
            let col = col as u16;
            match rec.get(name) {
                CellValue::Null => {}
                CellValue::String(s) => {
                    worksheet.write_string(row, col, s)?;
                }
                CellValue::Integer(i) => {
                    worksheet.write_number(row, col, *i as f64)?;
                }
                CellValue::Float(v) => {
                    worksheet.write_number(row, col, *v)?;
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean(row, col, *b)?;
                }
                CellValue::Date(d) => {
                    worksheet.write_string(row, col, d)?;
                }
                CellValue::Link { text, url } => {
                    worksheet.write_url_with_text(row, col, Url::new(url), text)?;
                }
            }
        }
    }

    workbook
        .save_to_buffer()
        .context("serializing export workbook")
}
