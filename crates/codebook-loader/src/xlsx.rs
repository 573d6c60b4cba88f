//! Excel (`.xlsx`) workbook backed by calamine.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};

use crate::sheet::{Row, Sheet, Workbook};
use crate::types::{CodebookError, CodebookResult, SheetError};

/// An open `.xlsx` workbook.
///
/// The underlying file stays open until the value is dropped.
pub struct XlsxWorkbook {
    inner: Xlsx<BufReader<File>>,
}

impl std::fmt::Debug for XlsxWorkbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XlsxWorkbook")
            .field("sheets", &self.inner.sheet_names())
            .finish()
    }
}

impl XlsxWorkbook {
    /// Opens the workbook at `path`.
    ///
    /// # Errors
    /// Returns an error if the file is missing or is not a readable xlsx file.
    pub fn open<P: AsRef<Path>>(path: P) -> CodebookResult<Self> {
        let path = path.as_ref();
        let inner = open_workbook::<Xlsx<_>, _>(path).map_err(|e| CodebookError::Workbook {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { inner })
    }
}

impl Workbook for XlsxWorkbook {
    fn sheet(&mut self, name: &str) -> Result<Sheet, SheetError> {
        if !self.inner.sheet_names().iter().any(|sheet| sheet == name) {
            return Err(SheetError::NotFound {
                name: name.to_string(),
            });
        }

        let range = self
            .inner
            .worksheet_range(name)
            .map_err(|e| SheetError::Read {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        Ok(Sheet::from_rows(name, range_to_rows(&range)))
    }

    fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names()
    }
}

/// Converts a used range into rows anchored at cell A1.
///
/// calamine ranges start at the first used cell, so leading blank rows
/// and columns are restored to keep row 0 meaning the sheet's first row.
fn range_to_rows(range: &Range<Data>) -> Vec<Row> {
    let Some((first_row, first_col)) = range.start() else {
        return Vec::new();
    };

    let mut rows = vec![Row::default(); first_row as usize];
    let padding = std::iter::repeat(String::new()).take(first_col as usize);
    for cells in range.rows() {
        rows.push(Row::new(
            padding
                .clone()
                .chain(cells.iter().map(cell_text)),
        ));
    }
    rows
}

/// Renders a cell as text.
///
/// Integral numbers drop their fraction, dates render as `YYYY-MM-DD`.
pub fn cell_text(data: &Data) -> String {
    match data {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_number(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => value.format("%Y-%m-%d").to_string(),
            None => format_number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => s.split('T').next().unwrap_or("").to_string(),
        _ => String::new(),
    }
}

fn format_number(value: f64) -> String {
    // f64 Display already omits ".0" for integral values
    value.to_string()
}


#[cfg(test)]
mod tests {
    use super::*;
    use super::fixtures::{write_workbook, Cell};
    use tempfile::TempDir;

    #[test]
    fn test_cell_text_numbers() {
        assert_eq!(cell_text(&Data::Float(33.0)), "33");
        assert_eq!(cell_text(&Data::Float(4.5)), "4.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
    }

    #[test]
    fn test_cell_text_strings_and_blanks() {
        assert_eq!(cell_text(&Data::String("  SNOMED ".to_string())), "SNOMED");
        assert_eq!(cell_text(&Data::Bool(true)), "true");
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(
            cell_text(&Data::DateTimeIso("2021-03-15T00:00:00".to_string())),
            "2021-03-15"
        );
    }

    #[test]
    fn test_range_to_rows_restores_offset() {
        let mut range = Range::new((1, 1), (2, 2));
        range.set_value((1, 1), Data::String("version".to_string()));
        range.set_value((1, 2), Data::Float(33.0));

        let rows = range_to_rows(&range);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_empty());
        assert_eq!(rows[1].cell(0), "");
        assert_eq!(rows[1].cell(1), "version");
        assert_eq!(rows[1].cell(2), "33");
        assert!(rows[2].is_empty());
    }

    #[test]
    fn test_reads_sheets_from_xlsx_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("codebook.xlsx");
        write_workbook(
            &path,
            &[
                (
                    "Info",
                    vec![
                        vec![Cell::Text("version"), Cell::Number(33.0)],
                        vec![Cell::Text("effectiveDate"), Cell::Date(44270.0)],
                    ],
                ),
                (
                    "offset",
                    vec![
                        vec![],
                        vec![Cell::Blank, Cell::Text(" code "), Cell::Number(4.5)],
                    ],
                ),
            ],
        );

        let mut workbook = XlsxWorkbook::open(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Info", "offset"]);

        let info = workbook.sheet("Info").unwrap();
        assert_eq!(info.name(), "Info");
        assert_eq!(info.row(0).unwrap().cell(1), "33");
        assert_eq!(info.row(1).unwrap().cell(1), "2021-03-15");

        let offset = workbook.sheet("offset").unwrap();
        assert_eq!(offset.last_row_index(), Some(1));
        assert!(offset.row(0).unwrap().is_empty());
        assert_eq!(offset.row(1).unwrap().cell(0), "");
        assert_eq!(offset.row(1).unwrap().cell(1), "code");
        assert_eq!(offset.row(1).unwrap().cell(2), "4.5");
    }

    #[test]
    fn test_sheet_lookup_is_exact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("codebook.xlsx");
        write_workbook(&path, &[("Info", vec![vec![Cell::Text("version")]])]);

        let mut workbook = XlsxWorkbook::open(&path).unwrap();
        assert_eq!(
            workbook.sheet("info"),
            Err(SheetError::NotFound {
                name: "info".to_string()
            })
        );
        assert!(matches!(
            workbook.sheet("Missing"),
            Err(SheetError::NotFound { .. })
        ));
    }

    #[test]
    fn test_open_non_workbook_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();
        assert!(matches!(
            XlsxWorkbook::open(&path),
            Err(CodebookError::Workbook { .. })
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let result = XlsxWorkbook::open("/nonexistent/codebook.xlsx");
        assert!(matches!(result, Err(CodebookError::Workbook { .. })));
    }
}
